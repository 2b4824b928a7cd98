//! Math font metrics.
//!
//! A [`MathFont`] answers glyph metrics and the TeX math parameters in em
//! units; the styling context scales them to box units for the current
//! style. Real font loading lives outside the engine. [`FixedMetricsFont`]
//! is a self-contained font with deterministic metrics by character class,
//! which is what the demo binary and the test suites lay out with.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::style::FontStyle;
use crate::error::{Result, TexError};

/// Glyph metrics in em.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphMetrics {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub italic: f32,
}

impl GlyphMetrics {
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            italic: 0.0,
        }
    }

    fn scaled(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
            depth: self.depth * factor,
            italic: self.italic * factor,
        }
    }
}

/// TeX math parameters, in em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathConstants {
    pub axis_height: f32,
    pub x_height: f32,
    pub quad: f32,
    pub default_rule_thickness: f32,
    pub sup1: f32,
    pub sup2: f32,
    pub sup3: f32,
    pub sub1: f32,
    pub sub2: f32,
    pub sup_drop: f32,
    pub sub_drop: f32,
    pub big_op_spacing1: f32,
    pub big_op_spacing2: f32,
    pub big_op_spacing3: f32,
    pub big_op_spacing4: f32,
    pub big_op_spacing5: f32,
    pub script_space: f32,
}

impl Default for MathConstants {
    /// Computer Modern values.
    fn default() -> Self {
        Self {
            axis_height: 0.25,
            x_height: 0.431,
            quad: 1.0,
            default_rule_thickness: 0.04,
            sup1: 0.413,
            sup2: 0.363,
            sup3: 0.289,
            sub1: 0.15,
            sub2: 0.247,
            sup_drop: 0.386,
            sub_drop: 0.05,
            big_op_spacing1: 0.111,
            big_op_spacing2: 0.167,
            big_op_spacing3: 0.2,
            big_op_spacing4: 0.6,
            big_op_spacing5: 0.1,
            script_space: 0.05,
        }
    }
}

/// Source of glyph metrics for one math font set.
pub trait MathFont: fmt::Debug {
    fn name(&self) -> &str;

    /// Metrics of `ch` at text size.
    fn glyph(&self, ch: char, style: FontStyle) -> GlyphMetrics;

    fn constants(&self) -> &MathConstants;

    /// Metrics of the display-size variant of a big operator.
    fn big_glyph(&self, ch: char, style: FontStyle) -> GlyphMetrics {
        self.glyph(ch, style).scaled(1.4)
    }
}

/// Characters drawn as big operators.
pub fn is_big_operator(ch: char) -> bool {
    matches!(
        ch,
        '\u{2211}' | '\u{220f}' | '\u{2210}' | '\u{222b}' | '\u{222e}' | '\u{22c3}' | '\u{22c2}'
    )
}

/// A font with metrics derived from character classes.
#[derive(Debug, Clone)]
pub struct FixedMetricsFont {
    name: String,
    constants: MathConstants,
}

impl FixedMetricsFont {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constants: MathConstants::default(),
        }
    }

    pub fn with_constants(mut self, constants: MathConstants) -> Self {
        self.constants = constants;
        self
    }

    fn class_metrics(&self, ch: char) -> GlyphMetrics {
        let x = self.constants.x_height;
        match ch {
            'b' | 'd' | 'f' | 'h' | 'k' | 'l' | 't' => GlyphMetrics::new(0.5, 0.694, 0.0),
            'g' | 'p' | 'q' | 'y' => GlyphMetrics::new(0.5, x, 0.194),
            'j' => GlyphMetrics::new(0.35, 0.66, 0.194),
            'i' => GlyphMetrics::new(0.3, 0.66, 0.0),
            'a'..='z' => GlyphMetrics::new(0.5, x, 0.0),
            'A'..='Z' => GlyphMetrics {
                italic: 0.05,
                ..GlyphMetrics::new(0.75, 0.683, 0.0)
            },
            '0'..='9' => GlyphMetrics::new(0.5, 0.644, 0.0),
            '(' | ')' | '[' | ']' | '{' | '}' | '|' => GlyphMetrics::new(0.389, 0.75, 0.25),
            '+' | '-' | '\u{2212}' | '=' | '<' | '>' | '\u{00d7}' | '\u{2264}' | '\u{2265}' => {
                GlyphMetrics::new(0.778, 0.583, 0.083)
            },
            ',' | ';' => GlyphMetrics::new(0.278, 0.106, 0.194),
            '.' => GlyphMetrics::new(0.278, 0.106, 0.0),
            c if is_big_operator(c) => GlyphMetrics::new(0.944, 0.75, 0.25),
            '\u{23de}' | '\u{23df}' | '\u{203e}' | '_' => GlyphMetrics::new(0.5, 0.12, 0.0),
            _ => GlyphMetrics::new(0.6, 0.683, 0.0),
        }
    }
}

impl MathFont for FixedMetricsFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn glyph(&self, ch: char, style: FontStyle) -> GlyphMetrics {
        let m = self.class_metrics(ch);
        if style.contains(FontStyle::BF) {
            GlyphMetrics {
                width: m.width * 1.1,
                ..m
            }
        } else {
            m
        }
    }

    fn constants(&self) -> &MathConstants {
        &self.constants
    }
}

/// Name of the font set registered by [`FontContext::with_defaults`].
pub const DEFAULT_MATH_VERSION: &str = "tex";

/// Registered math fonts and the one currently selected.
#[derive(Debug, Clone)]
pub struct FontContext {
    fonts: HashMap<String, Rc<dyn MathFont>>,
    current: Rc<dyn MathFont>,
}

impl FontContext {
    /// A context holding only `font`, selected.
    pub fn new(font: Rc<dyn MathFont>) -> Self {
        let mut fonts = HashMap::new();
        fonts.insert(font.name().to_string(), Rc::clone(&font));
        Self {
            fonts,
            current: font,
        }
    }

    /// A context with the fixed-metrics `tex` font.
    pub fn with_defaults() -> Self {
        Self::new(Rc::new(FixedMetricsFont::new(DEFAULT_MATH_VERSION)))
    }

    /// Register `font` under its own name, replacing any previous entry.
    pub fn register(&mut self, font: Rc<dyn MathFont>) {
        log::debug!("registering math font `{}`", font.name());
        self.fonts.insert(font.name().to_string(), font);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Make `name` the current font.
    pub fn select(&mut self, name: &str) -> Result<()> {
        let font = self
            .fonts
            .get(name)
            .ok_or_else(|| TexError::Config(format!("unknown math version `{name}`")))?;
        self.current = Rc::clone(font);
        Ok(())
    }

    pub fn current(&self) -> &Rc<dyn MathFont> {
        &self.current
    }
}

impl Default for FontContext {
    fn default() -> Self {
        Self::with_defaults()
    }
}
