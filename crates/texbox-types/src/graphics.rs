//! Drawing surface trait.
//!
//! Boxes never talk to a platform API. They draw through the [`Graphics`]
//! trait, which a host implements on top of its canvas. Coordinates are in
//! user space; `translate` and `scale` compose onto the current transform,
//! and `save` / `restore` bracket any change to transform or color.
//!
//! [`Recorder`] is a complete in-memory implementation that captures every
//! call as a device-space [`DrawCommand`]. It backs the demo binary and the
//! test suites.

use serde::Serialize;

use crate::color::Color;
use crate::error::Result;

/// Drawing surface consumed by the box tree.
///
/// # Core Methods (required)
///
/// `color`, `set_color`, `translate`, `scale`, `save`, `restore`,
/// `fill_rect` and `draw_glyph`.
///
/// # Derived Primitives (optional, with defaults)
///
/// `stroke_rect` and `draw_line` fall back to `fill_rect`, so a minimal
/// surface only needs to fill axis-aligned rectangles and place glyphs.
pub trait Graphics {
    /// Current drawing color.
    fn color(&self) -> Color;

    fn set_color(&mut self, color: Color);

    /// Move the origin by `(dx, dy)` user units.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Multiply the current transform by a scale.
    fn scale(&mut self, sx: f32, sy: f32);

    /// Push the current transform and color.
    fn save(&mut self);

    /// Pop the state pushed by the matching `save`.
    ///
    /// An unbalanced `restore` returns to the identity transform and black.
    fn restore(&mut self);

    /// Fill a rectangle whose top-left corner is `(x, y)` in the current color.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<()>;

    /// Draw one glyph with its baseline origin at `(x, y)`.
    ///
    /// `size` is the em size in user units.
    fn draw_glyph(&mut self, glyph: char, x: f32, y: f32, size: f32, italic: bool)
    -> Result<()>;

    /// Draw the outline of a rectangle, `stroke` wide, inside its bounds.
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, stroke: f32) -> Result<()> {
        let sw = stroke.min(w / 2.0).min(h / 2.0).max(0.0);
        self.fill_rect(x, y, w, sw)?;
        self.fill_rect(x, y + h - sw, w, sw)?;
        self.fill_rect(x, y + sw, sw, h - 2.0 * sw)?;
        self.fill_rect(x + w - sw, y + sw, sw, h - 2.0 * sw)?;
        Ok(())
    }

    /// Draw a line between two points.
    ///
    /// Diagonal lines have no default rendering; surfaces must override for
    /// diagonal support.
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) -> Result<()> {
        if y1 == y2 {
            self.fill_rect(x1.min(x2), y1 - width / 2.0, (x1 - x2).abs(), width)?;
        } else if x1 == x2 {
            self.fill_rect(x1 - width / 2.0, y1.min(y2), width, (y1 - y2).abs())?;
        }
        Ok(())
    }
}

/// A recorded draw call, in device coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Glyph {
        glyph: char,
        x: f32,
        y: f32,
        size: f32,
        italic: bool,
        color: Color,
    },
}

/// Transform and color captured by `save`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SurfaceState {
    color: Color,
    sx: f32,
    sy: f32,
    tx: f32,
    ty: f32,
}

impl SurfaceState {
    const INITIAL: Self = Self {
        color: Color::BLACK,
        sx: 1.0,
        sy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };
}

/// A surface that records every draw call after applying the transform.
#[derive(Debug, Clone)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
    state: SurfaceState,
    saved: Vec<SurfaceState>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            state: SurfaceState::INITIAL,
            saved: Vec::new(),
        }
    }

    /// Current `(sx, sy, tx, ty)` transform.
    pub fn transform(&self) -> (f32, f32, f32, f32) {
        let s = &self.state;
        (s.sx, s.sy, s.tx, s.ty)
    }

    /// Number of `save` calls not yet matched by `restore`.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        let s = &self.state;
        (s.tx + x * s.sx, s.ty + y * s.sy)
    }

    /// Count of `FillRect` calls.
    pub fn fill_rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count()
    }

    /// The glyphs drawn so far, in call order.
    pub fn glyphs(&self) -> Vec<char> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Glyph { glyph, .. } => Some(*glyph),
                DrawCommand::FillRect { .. } => None,
            })
            .collect()
    }
}

impl Graphics for Recorder {
    fn color(&self) -> Color {
        self.state.color
    }

    fn set_color(&mut self, color: Color) {
        self.state.color = color;
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.tx += dx * self.state.sx;
        self.state.ty += dy * self.state.sy;
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.sx *= sx;
        self.state.sy *= sy;
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        self.state = self.saved.pop().unwrap_or(SurfaceState::INITIAL);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<()> {
        let (x1, y1) = self.map(x, y);
        let (x2, y2) = self.map(x + w, y + h);
        self.commands.push(DrawCommand::FillRect {
            x: x1.min(x2),
            y: y1.min(y2),
            w: (x2 - x1).abs(),
            h: (y2 - y1).abs(),
            color: self.state.color,
        });
        Ok(())
    }

    fn draw_glyph(
        &mut self,
        glyph: char,
        x: f32,
        y: f32,
        size: f32,
        italic: bool,
    ) -> Result<()> {
        let (x, y) = self.map(x, y);
        self.commands.push(DrawCommand::Glyph {
            glyph,
            x,
            y,
            size: size * self.state.sy.abs(),
            italic,
            color: self.state.color,
        });
        Ok(())
    }
}
