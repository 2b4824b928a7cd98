use super::{Geometry, TexBox};
use crate::color::Color;
use crate::env::GlyphMetrics;
use crate::error::Result;
use crate::graphics::Graphics;

/// One glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct CharBox {
    pub(super) geometry: Geometry,
    ch: char,
    size: f32,
    italic: bool,
}

impl CharBox {
    /// `metrics` are in box units; `size` is the em size the glyph is drawn at.
    pub fn new(ch: char, metrics: GlyphMetrics, size: f32, italic: bool) -> Self {
        let width = if italic {
            metrics.width + metrics.italic
        } else {
            metrics.width
        };
        Self {
            geometry: Geometry::new(width, metrics.height, metrics.depth, 0.0),
            ch,
            size,
            italic,
        }
    }

    pub fn ch(&self) -> char {
        self.ch
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub(super) fn draw(&self, g: &mut dyn Graphics, x: f32, y: f32) -> Result<()> {
        g.draw_glyph(self.ch, x, y, self.size, self.italic)
    }
}

/// An invisible box with fixed geometry.
///
/// Negative metrics are allowed; they act as kerns.
#[derive(Debug, Clone, PartialEq)]
pub struct StrutBox {
    pub(super) geometry: Geometry,
}

impl StrutBox {
    pub fn new(width: f32, height: f32, depth: f32, shift: f32) -> Self {
        Self {
            geometry: Geometry::new(width, height, depth, shift),
        }
    }

    pub fn empty() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// A strut occupying the same space as `b`.
    pub fn footprint(b: &TexBox) -> Self {
        Self::new(b.width(), b.height(), b.depth(), b.shift())
    }
}

/// Horizontal spacing, optionally a line-break opportunity.
#[derive(Debug, Clone, PartialEq)]
pub struct GlueBox {
    pub(super) geometry: Geometry,
    breakable: bool,
}

impl GlueBox {
    pub fn new(width: f32, breakable: bool) -> Self {
        Self {
            geometry: Geometry::new(width, 0.0, 0.0, 0.0),
            breakable,
        }
    }

    pub fn is_breakable(&self) -> bool {
        self.breakable
    }
}

/// A filled rectangle sitting on the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBox {
    pub(super) geometry: Geometry,
    color: Option<Color>,
}

impl RuleBox {
    pub fn new(thickness: f32, width: f32, shift: f32, color: Option<Color>) -> Self {
        Self {
            geometry: Geometry::new(width, thickness, 0.0, shift),
            color,
        }
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub(super) fn draw(&self, g: &mut dyn Graphics, x: f32, y: f32) -> Result<()> {
        let Geometry {
            width,
            height,
            depth,
            ..
        } = self.geometry;
        let Some(color) = self.color else {
            return g.fill_rect(x, y - height, width, height + depth);
        };
        let prev = g.color();
        g.set_color(color);
        let result = g.fill_rect(x, y - height, width, height + depth);
        g.set_color(prev);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{DrawCommand, Recorder};

    #[test]
    fn italic_correction_widens() {
        let m = GlyphMetrics {
            width: 5.0,
            height: 4.0,
            depth: 0.0,
            italic: 0.5,
        };
        assert_eq!(CharBox::new('f', m, 10.0, true).geometry.width, 5.5);
        assert_eq!(CharBox::new('f', m, 10.0, false).geometry.width, 5.0);
    }

    #[test]
    fn footprint_copies_geometry() {
        let mut b: TexBox = StrutBox::new(3.0, 2.0, 1.0, 0.0).into();
        b.set_shift(0.25);
        let f = StrutBox::footprint(&b);
        assert_eq!(f.geometry, Geometry::new(3.0, 2.0, 1.0, 0.25));
    }

    #[test]
    fn rule_draws_above_baseline_in_own_color() {
        let mut g = Recorder::new();
        let rule = RuleBox::new(2.0, 10.0, 0.0, Some(Color::RED));
        rule.draw(&mut g, 1.0, 5.0).unwrap();
        assert_eq!(
            g.commands,
            vec![DrawCommand::FillRect {
                x: 1.0,
                y: 3.0,
                w: 10.0,
                h: 2.0,
                color: Color::RED,
            }]
        );
        assert_eq!(g.color(), Color::BLACK);
    }

    #[test]
    fn glue_is_space() {
        let glue: TexBox = GlueBox::new(1.0, true).into();
        assert!(glue.is_space());
        assert!(glue.is_breakable());
        let fixed: TexBox = GlueBox::new(1.0, false).into();
        assert!(!fixed.is_breakable());
    }
}
