//! RGBA colors and hex parsing.

use serde::{Deserialize, Serialize};

/// A color in RGBA format (0-255 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Return the same color with a different alpha value.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Fully transparent colors are treated as "no color" by renders.
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA`.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#')?;
    if !s.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
    match s.len() {
        6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_hex_rgb() {
        assert_eq!(parse_hex_color("#ff8000"), Some(Color::rgb(255, 128, 0)));
    }

    #[test]
    fn parse_hex_rgba() {
        assert_eq!(
            parse_hex_color("#00000080"),
            Some(Color::rgba(0, 0, 0, 128))
        );
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert_eq!(parse_hex_color("ff8000"), None);
        assert_eq!(parse_hex_color("#ff80"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn default_is_transparent() {
        assert!(Color::default().is_transparent());
        assert!(!Color::BLACK.is_transparent());
        assert!(Color::RED.with_alpha(0).is_transparent());
    }

    proptest! {
        #[test]
        fn hex_literal_parses_back(r: u8, g: u8, b: u8, a: u8, upper: bool) {
            let mut hex = format!("#{r:02x}{g:02x}{b:02x}{a:02x}");
            if upper {
                hex = hex.to_uppercase();
            }
            prop_assert_eq!(parse_hex_color(&hex), Some(Color::rgba(r, g, b, a)));
            prop_assert_eq!(parse_hex_color(&hex[..7]), Some(Color::rgb(r, g, b)));
        }
    }
}
