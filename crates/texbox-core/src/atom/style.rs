//! Atoms that change the styling context.

use super::{AtomRef, create_opt};
use crate::boxes::TexBox;
use crate::env::{Env, FontStyle, LetterStyle, MathStyle};

/// Typesets its base in at least the size of `style`.
///
/// The requested style only takes effect when it is larger than the
/// inherited one; a base inside smaller surroundings is never shrunk
/// further by this atom. Roman letters are switched off for the base.
#[derive(Debug, Clone)]
pub struct MathAtom {
    pub base: Option<AtomRef>,
    pub style: MathStyle,
}

impl MathAtom {
    pub fn new(base: Option<AtomRef>, style: MathStyle) -> Self {
        Self { base, style }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        env.scoped(|env| {
            env.remove_font_style(FontStyle::RM);
            if self.style < env.style() {
                env.set_style(self.style);
            }
            create_opt(self.base.as_deref(), env)
        })
    }
}

/// Selects a math font for everything after it.
#[derive(Debug, Clone, PartialEq)]
pub struct MathFontAtom {
    pub name: String,
    pub letter_style: LetterStyle,
}

impl MathFontAtom {
    pub fn new(name: impl Into<String>, letter_style: LetterStyle) -> Self {
        Self {
            name: name.into(),
            letter_style,
        }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        env.select_math_font(&self.name, self.letter_style);
        TexBox::empty()
    }
}

/// Upright letters for its base.
#[derive(Debug, Clone, Default)]
pub struct RomanAtom {
    pub base: Option<AtomRef>,
}

impl RomanAtom {
    pub fn new(base: Option<AtomRef>) -> Self {
        Self { base }
    }

    pub(crate) fn create_box(&self, env: &mut Env) -> TexBox {
        let Some(base) = &self.base else {
            return TexBox::empty();
        };
        env.with_font_style(FontStyle::RM, |env| base.create_box(env))
    }
}
