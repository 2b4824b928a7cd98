//! Math styles, font-style flags and letter shaping conventions.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::TexError;

/// The eight TeX math styles.
///
/// Ordered from the largest glyphs to the smallest, with each cramped
/// variant right after its normal one, so `a > b` means `a` typesets
/// smaller than (or as a cramped version of) `b`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MathStyle {
    #[default]
    Display,
    DisplayCramped,
    Text,
    TextCramped,
    Script,
    ScriptCramped,
    ScriptScript,
    ScriptScriptCramped,
}

impl MathStyle {
    const ALL: [Self; 8] = [
        Self::Display,
        Self::DisplayCramped,
        Self::Text,
        Self::TextCramped,
        Self::Script,
        Self::ScriptCramped,
        Self::ScriptScript,
        Self::ScriptScriptCramped,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(i: usize) -> Self {
        Self::ALL[i.min(Self::ALL.len() - 1)]
    }

    pub fn is_cramped(self) -> bool {
        self.index() % 2 == 1
    }

    pub fn cramped(self) -> Self {
        Self::from_index(self.index() | 1)
    }

    pub fn is_display(self) -> bool {
        self <= Self::DisplayCramped
    }

    /// Script and scriptscript styles.
    pub fn is_script(self) -> bool {
        self >= Self::Script
    }

    /// Style for a superscript attached in this style.
    pub fn sup_style(self) -> Self {
        let base = match self.index() / 2 {
            0 | 1 => Self::Script,
            _ => Self::ScriptScript,
        };
        if self.is_cramped() {
            base.cramped()
        } else {
            base
        }
    }

    /// Style for a subscript: the superscript style, cramped.
    pub fn sub_style(self) -> Self {
        self.sup_style().cramped()
    }

    /// Style for the numerator of a fraction or an upper limit.
    pub fn num_style(self) -> Self {
        let next = match self.index() / 2 {
            0 => Self::Text,
            1 => Self::Script,
            _ => Self::ScriptScript,
        };
        if self.is_cramped() {
            next.cramped()
        } else {
            next
        }
    }

    pub fn denom_style(self) -> Self {
        self.num_style().cramped()
    }

    /// Glyph size relative to text style.
    pub fn size_factor(self) -> f32 {
        match self.index() / 2 {
            0 | 1 => 1.0,
            2 => 0.7,
            _ => 0.5,
        }
    }
}

impl FromStr for MathStyle {
    type Err = TexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "display" => Ok(Self::Display),
            "text" => Ok(Self::Text),
            "script" => Ok(Self::Script),
            "scriptscript" => Ok(Self::ScriptScript),
            other => Err(TexError::Config(format!("unknown math style `{other}`"))),
        }
    }
}

impl fmt::Display for MathStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Display => "display",
            Self::DisplayCramped => "display'",
            Self::Text => "text",
            Self::TextCramped => "text'",
            Self::Script => "script",
            Self::ScriptCramped => "script'",
            Self::ScriptScript => "scriptscript",
            Self::ScriptScriptCramped => "scriptscript'",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Font-style flags carried by the styling context.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FontStyle: u16 {
        /// Upright (roman) letters.
        const RM = 1 << 0;
        const IT = 1 << 1;
        const BF = 1 << 2;
        const SF = 1 << 3;
        const TT = 1 << 4;
        const CAL = 1 << 5;
        const FRAK = 1 << 6;
        const BB = 1 << 7;
    }
}

/// Which letters a math font draws slanted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStyle {
    /// Latin letters and lowercase Greek slanted, uppercase Greek upright.
    #[default]
    Tex,
    /// Every Latin and Greek letter slanted.
    Iso,
    /// Only lowercase letters slanted.
    French,
    /// Nothing slanted.
    Upright,
}

impl LetterStyle {
    pub fn is_italic(self, ch: char) -> bool {
        let greek_lower = ('\u{3b1}'..='\u{3c9}').contains(&ch);
        let greek_upper = ('\u{391}'..='\u{3a9}').contains(&ch);
        match self {
            Self::Tex => ch.is_ascii_alphabetic() || greek_lower,
            Self::Iso => ch.is_ascii_alphabetic() || greek_lower || greek_upper,
            Self::French => ch.is_ascii_lowercase() || greek_lower,
            Self::Upright => false,
        }
    }
}

impl FromStr for LetterStyle {
    type Err = TexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tex" => Ok(Self::Tex),
            "iso" => Ok(Self::Iso),
            "french" => Ok(Self::French),
            "upright" => Ok(Self::Upright),
            other => Err(TexError::Config(format!("unknown letter style `{other}`"))),
        }
    }
}
