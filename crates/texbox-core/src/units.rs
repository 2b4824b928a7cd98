//! TeX dimension units.

use std::fmt;
use std::str::FromStr;

use crate::env::Env;
use crate::error::{Result, TexError};

/// A TeX unit of length. `None` means the value is already in box units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnitType {
    #[default]
    None,
    Em,
    Ex,
    Pixel,
    Point,
    Pica,
    Mu,
    Cm,
    Mm,
    In,
    Bp,
    Dd,
    Cc,
    Sp,
}

impl UnitType {
    /// Box units per one of this unit in `env`'s current style.
    ///
    /// Relative units (`em`, `ex`, `mu`) follow the current style; a pixel
    /// is one point at the reference text size.
    pub fn factor(self, env: &Env) -> f32 {
        match self {
            Self::None | Self::Pixel | Self::Point => 1.0,
            Self::Em => env.quad(),
            Self::Ex => env.x_height(),
            Self::Mu => env.quad() / 18.0,
            Self::Pica => 12.0,
            Self::Cm => 72.27 / 2.54,
            Self::Mm => 72.27 / 25.4,
            Self::In => 72.27,
            Self::Bp => 72.27 / 72.0,
            Self::Dd => 1238.0 / 1157.0,
            Self::Cc => 12.0 * 1238.0 / 1157.0,
            Self::Sp => 1.0 / 65536.0,
        }
    }

    pub fn to_units(self, value: f32, env: &Env) -> f32 {
        value * self.factor(env)
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Em => "em",
            Self::Ex => "ex",
            Self::Pixel => "px",
            Self::Point => "pt",
            Self::Pica => "pc",
            Self::Mu => "mu",
            Self::Cm => "cm",
            Self::Mm => "mm",
            Self::In => "in",
            Self::Bp => "bp",
            Self::Dd => "dd",
            Self::Cc => "cc",
            Self::Sp => "sp",
        }
    }
}

impl FromStr for UnitType {
    type Err = TexError;

    fn from_str(s: &str) -> Result<Self> {
        let unit = match s {
            "" => Self::None,
            "em" => Self::Em,
            "ex" => Self::Ex,
            "px" | "pix" => Self::Pixel,
            "pt" => Self::Point,
            "pc" => Self::Pica,
            "mu" => Self::Mu,
            "cm" => Self::Cm,
            "mm" => Self::Mm,
            "in" => Self::In,
            "bp" => Self::Bp,
            "dd" => Self::Dd,
            "cc" => Self::Cc,
            "sp" => Self::Sp,
            other => return Err(TexError::Config(format!("unknown unit `{other}`"))),
        };
        Ok(unit)
    }
}

/// Convert `value` in `unit` to box units.
pub fn fsize(unit: UnitType, value: f32, env: &Env) -> f32 {
    unit.to_units(value, env)
}

/// A length with its unit, resolved against an [`Env`] when used.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dimen {
    pub value: f32,
    pub unit: UnitType,
}

impl Dimen {
    pub const ZERO: Self = Self::new(0.0, UnitType::None);

    pub const fn new(value: f32, unit: UnitType) -> Self {
        Self { value, unit }
    }

    pub const fn em(value: f32) -> Self {
        Self::new(value, UnitType::Em)
    }

    pub const fn pt(value: f32) -> Self {
        Self::new(value, UnitType::Point)
    }

    pub const fn mu(value: f32) -> Self {
        Self::new(value, UnitType::Mu)
    }

    /// Parse `"12em"`, `"-0.5 ex"`, `"3"` and the like.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let split = text
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(text.len());
        let (number, unit) = text.split_at(split);
        let value: f32 = number
            .trim()
            .parse()
            .map_err(|_| TexError::Config(format!("invalid dimension `{text}`")))?;
        let unit = unit.trim().to_ascii_lowercase().parse()?;
        Ok(Self { value, unit })
    }

    pub fn to_units(self, env: &Env) -> f32 {
        self.unit.to_units(self.value, env)
    }

    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }
}

impl fmt::Display for Dimen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MathStyle;

    #[test]
    fn parse_with_units() {
        assert_eq!(Dimen::parse("12em").unwrap(), Dimen::em(12.0));
        assert_eq!(Dimen::parse(" -0.5 pt ").unwrap(), Dimen::pt(-0.5));
        assert_eq!(
            Dimen::parse("3").unwrap(),
            Dimen::new(3.0, UnitType::None)
        );
        assert_eq!(Dimen::parse("2PX").unwrap().unit, UnitType::Pixel);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Dimen::parse("em").is_err());
        assert!(Dimen::parse("3furlongs").is_err());
        assert!(Dimen::parse("").is_err());
    }

    #[test]
    fn relative_units_follow_style() {
        let mut env = Env::default();
        assert!((Dimen::em(1.0).to_units(&env) - 10.0).abs() < 1e-5);
        assert!((Dimen::mu(18.0).to_units(&env) - 10.0).abs() < 1e-5);
        env.set_style(MathStyle::ScriptScript);
        assert!((Dimen::em(1.0).to_units(&env) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn absolute_units() {
        let env = Env::default();
        assert!((fsize(UnitType::In, 1.0, &env) - 72.27).abs() < 1e-4);
        assert!((fsize(UnitType::Pica, 1.0, &env) - 12.0).abs() < 1e-6);
        assert!((fsize(UnitType::Sp, 65536.0, &env) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn display_round_trips_suffix() {
        assert_eq!(Dimen::em(1.5).to_string(), "1.5em");
    }
}
