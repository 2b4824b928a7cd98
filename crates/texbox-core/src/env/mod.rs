//! Styling context for atom-to-box conversion.
//!
//! [`Env`] is the mutable state threaded through `create_box`: the math
//! style, font-style flags, the selected math font and its letter
//! convention, and the line-width settings used by the splitter. Atoms
//! that change it for their children do so through the scoped helpers
//! (`with_style`, `with_font_style`, `scoped`), which restore the previous
//! values when the closure returns.
//!
//! Box units are TeX points at the reference size [`FIXED_TEXT_SIZE`]: a
//! text-style em is `FIXED_TEXT_SIZE` units wide.

pub mod font;
pub mod style;

use std::rc::Rc;

pub use font::{FixedMetricsFont, FontContext, GlyphMetrics, MathConstants, MathFont};
pub use style::{FontStyle, LetterStyle, MathStyle};

use crate::units::UnitType;

/// Em size, in box units, of text-style glyphs.
pub const FIXED_TEXT_SIZE: f32 = 10.0;

/// The styling context.
#[derive(Debug, Clone)]
pub struct Env {
    style: MathStyle,
    font_style: FontStyle,
    letter_style: LetterStyle,
    fonts: FontContext,
    text_width: f32,
    line_space: f32,
}

impl Env {
    /// A context in `style` using the font currently selected in `fonts`.
    pub fn new(style: MathStyle, fonts: FontContext) -> Self {
        Self {
            style,
            font_style: FontStyle::empty(),
            letter_style: LetterStyle::default(),
            fonts,
            text_width: f32::INFINITY,
            line_space: 0.0,
        }
    }

    // -------------------------------------------------------------------
    // Style
    // -------------------------------------------------------------------

    pub fn style(&self) -> MathStyle {
        self.style
    }

    pub fn set_style(&mut self, style: MathStyle) {
        self.style = style;
    }

    /// Run `f` in `style`, restoring the current style afterwards.
    pub fn with_style<R>(&mut self, style: MathStyle, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.style;
        self.style = style;
        let out = f(self);
        self.style = saved;
        out
    }

    pub fn font_style(&self) -> FontStyle {
        self.font_style
    }

    pub fn set_font_style(&mut self, font_style: FontStyle) {
        self.font_style = font_style;
    }

    pub fn add_font_style(&mut self, flags: FontStyle) {
        self.font_style.insert(flags);
    }

    pub fn remove_font_style(&mut self, flags: FontStyle) {
        self.font_style.remove(flags);
    }

    /// Run `f` with `flags` added, restoring the previous flags afterwards.
    pub fn with_font_style<R>(&mut self, flags: FontStyle, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.font_style;
        self.font_style.insert(flags);
        let out = f(self);
        self.font_style = saved;
        out
    }

    /// Run `f`, then restore both the math style and the font-style flags.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let (style, font_style) = (self.style, self.font_style);
        let out = f(self);
        self.style = style;
        self.font_style = font_style;
        out
    }

    // -------------------------------------------------------------------
    // Fonts
    // -------------------------------------------------------------------

    /// Switch math font and letter convention.
    ///
    /// An unregistered name keeps the current font; the letter style still
    /// changes.
    pub fn select_math_font(&mut self, name: &str, letter_style: LetterStyle) {
        if let Err(e) = self.fonts.select(name) {
            log::warn!("{e}, keeping `{}`", self.fonts.current().name());
        }
        self.letter_style = letter_style;
    }

    pub fn math_font(&self) -> &Rc<dyn MathFont> {
        self.fonts.current()
    }

    pub fn letter_style(&self) -> LetterStyle {
        self.letter_style
    }

    /// Em size in box units for `style`.
    pub fn size_in(&self, style: MathStyle) -> f32 {
        FIXED_TEXT_SIZE * style.size_factor()
    }

    /// Em size in box units for the current style.
    pub fn size(&self) -> f32 {
        self.size_in(self.style)
    }

    /// A font parameter scaled to box units in the current style.
    pub fn constant(&self, pick: impl Fn(&MathConstants) -> f32) -> f32 {
        pick(self.math_font().constants()) * self.size()
    }

    /// A font parameter scaled to box units in `style`.
    pub fn constant_in(&self, style: MathStyle, pick: impl Fn(&MathConstants) -> f32) -> f32 {
        pick(self.math_font().constants()) * self.size_in(style)
    }

    pub fn rule_thickness(&self) -> f32 {
        self.constant(|c| c.default_rule_thickness)
    }

    pub fn x_height(&self) -> f32 {
        self.constant(|c| c.x_height)
    }

    pub fn axis_height(&self) -> f32 {
        self.constant(|c| c.axis_height)
    }

    pub fn quad(&self) -> f32 {
        self.constant(|c| c.quad)
    }

    /// Metrics of `ch` in box units for the current style and flags.
    pub fn glyph(&self, ch: char) -> GlyphMetrics {
        scale_metrics(self.math_font().glyph(ch, self.font_style), self.size())
    }

    /// Display-size variant of a big operator, in box units.
    pub fn big_glyph(&self, ch: char) -> GlyphMetrics {
        scale_metrics(self.math_font().big_glyph(ch, self.font_style), self.size())
    }

    /// Whether `ch` is drawn slanted in the current context.
    pub fn is_italic(&self, ch: char) -> bool {
        !self.font_style.contains(FontStyle::RM) && self.letter_style.is_italic(ch)
    }

    // -------------------------------------------------------------------
    // Line layout
    // -------------------------------------------------------------------

    pub fn set_text_width(&mut self, unit: UnitType, width: f32) {
        self.text_width = unit.to_units(width, self);
    }

    /// Target line width in box units; infinite when unset.
    pub fn text_width(&self) -> f32 {
        self.text_width
    }

    pub fn set_line_space(&mut self, unit: UnitType, space: f32) {
        self.line_space = unit.to_units(space, self);
    }

    pub fn line_space(&self) -> f32 {
        self.line_space
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new(MathStyle::Display, FontContext::with_defaults())
    }
}

fn scale_metrics(m: GlyphMetrics, size: f32) -> GlyphMetrics {
    GlyphMetrics {
        width: m.width * size,
        height: m.height * size,
        depth: m.depth * size,
        italic: m.italic * size,
    }
}
