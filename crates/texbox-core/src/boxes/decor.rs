//! Boxes that wrap exactly one base box.

use super::{Geometry, TexBox};
use crate::color::Color;
use crate::error::Result;
use crate::graphics::Graphics;

/// Outline color used by [`DebugBox`].
pub const DEBUG_COLOR: Color = Color::RED;

const DEBUG_STROKE: f32 = 0.1;

/// A base drawn under a scale transform.
#[derive(Debug, Clone)]
pub struct ScaleBox {
    pub(super) geometry: Geometry,
    pub(super) base: Box<TexBox>,
    sx: f32,
    sy: f32,
}

impl ScaleBox {
    /// A negative `sy` flips the base, swapping its height and depth.
    pub fn new(base: TexBox, sx: f32, sy: f32) -> Self {
        let (height, depth) = if sy > 0.0 {
            (base.height() * sy, base.depth() * sy)
        } else {
            (-base.depth() * sy, -base.height() * sy)
        };
        Self {
            geometry: Geometry::new(
                base.width() * sx.abs(),
                height,
                depth,
                base.shift() * sy,
            ),
            base: Box::new(base),
            sx,
            sy,
        }
    }

    pub fn factors(&self) -> (f32, f32) {
        (self.sx, self.sy)
    }

    pub fn base(&self) -> &TexBox {
        &self.base
    }

    pub(super) fn draw(&self, g: &mut dyn Graphics, x: f32, y: f32) -> Result<()> {
        if self.sx == 0.0 || self.sy == 0.0 {
            return Ok(());
        }
        let offset = if self.sx < 0.0 {
            self.geometry.width
        } else {
            0.0
        };
        g.save();
        g.translate(x + offset, y);
        g.scale(self.sx, self.sy);
        let result = self.base.draw(g, 0.0, 0.0);
        g.restore();
        result
    }
}

/// A base drawn with its own foreground and an optional background fill.
#[derive(Debug, Clone)]
pub struct ColorBox {
    pub(super) geometry: Geometry,
    pub(super) base: Box<TexBox>,
    foreground: Option<Color>,
    background: Option<Color>,
}

impl ColorBox {
    pub fn new(base: TexBox, foreground: Option<Color>, background: Option<Color>) -> Self {
        Self {
            geometry: *base.geometry(),
            base: Box::new(base),
            foreground,
            background,
        }
    }

    pub fn base(&self) -> &TexBox {
        &self.base
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn into_base(self) -> TexBox {
        *self.base
    }

    /// Same colors around a different base.
    pub(crate) fn rewrap(&self, base: TexBox) -> Self {
        let shift = self.geometry.shift;
        let mut wrapped = Self::new(base, self.foreground, self.background);
        wrapped.geometry.shift = shift;
        wrapped.geometry.atom_type = self.geometry.atom_type;
        wrapped
    }

    pub(super) fn draw(&self, g: &mut dyn Graphics, x: f32, y: f32) -> Result<()> {
        let prev = g.color();
        let result = self.paint(g, x, y);
        g.set_color(prev);
        result
    }

    fn paint(&self, g: &mut dyn Graphics, x: f32, y: f32) -> Result<()> {
        let Geometry {
            width,
            height,
            depth,
            ..
        } = self.geometry;
        if let Some(bg) = self.background {
            g.set_color(bg);
            g.fill_rect(x, y - height, width, height + depth)?;
        }
        if let Some(fg) = self.foreground {
            g.set_color(fg);
        }
        self.base.draw(g, x, y)
    }
}

/// A base drawn with its outline and baseline.
#[derive(Debug, Clone)]
pub struct DebugBox {
    pub(super) geometry: Geometry,
    pub(super) base: Box<TexBox>,
}

impl DebugBox {
    pub fn new(base: TexBox) -> Self {
        Self {
            geometry: *base.geometry(),
            base: Box::new(base),
        }
    }

    pub fn base(&self) -> &TexBox {
        &self.base
    }

    pub(super) fn draw(&self, g: &mut dyn Graphics, x: f32, y: f32) -> Result<()> {
        self.base.draw(g, x, y)?;
        let Geometry {
            width,
            height,
            depth,
            ..
        } = self.geometry;
        let prev = g.color();
        g.set_color(DEBUG_COLOR);
        let mut result = g.stroke_rect(x, y - height, width, height + depth, DEBUG_STROKE);
        if result.is_ok() && depth > 0.0 {
            result = g.draw_line(x, y, x + width, y, DEBUG_STROKE);
        }
        g.set_color(prev);
        result
    }
}
