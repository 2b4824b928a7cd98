//! Render configuration loaded from TOML.
//!
//! Values are kept close to their textual form here (`"12em"`, `"#336699"`,
//! `"display"`). The engine validates and converts them when a render
//! builder is created from the config, so a bad value is reported with the
//! option it came from.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::layout::{HAlign, Insets};

/// Options for building a render.
///
/// ```toml
/// text_size = 24.0
/// math_version = "tex"
/// style = "display"
/// width = "12em"
/// line_space = "0.5em"
/// max_width = true
/// align = "left"
/// foreground = "#202020"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Requested text size in pixels. Required by the builder.
    #[serde(default)]
    pub text_size: Option<f32>,
    /// Name of the math font set. Required by the builder.
    #[serde(default)]
    pub math_version: Option<String>,
    /// Starting math style: `display`, `text`, `script` or `scriptscript`.
    #[serde(default = "default_style")]
    pub style: String,
    /// Target line width as a dimension string; enables line splitting.
    #[serde(default)]
    pub width: Option<String>,
    /// Space inserted between split lines, as a dimension string.
    #[serde(default)]
    pub line_space: Option<String>,
    /// Shrink the padded box to the widest produced line instead of the
    /// full target width.
    #[serde(default)]
    pub max_width: bool,
    #[serde(default)]
    pub align: HAlign,
    /// `#RRGGBB[AA]` hex or a registered color name.
    #[serde(default)]
    pub foreground: Option<String>,
    /// Outline every glyph box when drawing.
    #[serde(default)]
    pub debug: bool,
    /// Explicit padding; when absent the render adds its default padding.
    #[serde(default)]
    pub insets: Option<Insets>,
}

fn default_style() -> String {
    "display".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            text_size: None,
            math_version: None,
            style: default_style(),
            width: None,
            line_space: None,
            max_width: false,
            align: HAlign::default(),
            foreground: None,
            debug: false,
            insets: None,
        }
    }
}

impl RenderConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        log::debug!("parsed render config: {config:?}");
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = RenderConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, RenderConfig::default());
        assert_eq!(cfg.style, "display");
        assert!(cfg.text_size.is_none());
        assert!(!cfg.max_width);
        assert_eq!(cfg.align, HAlign::Center);
    }

    #[test]
    fn full_toml_parses() {
        let cfg = RenderConfig::from_toml_str(
            r##"
            text_size = 24.0
            math_version = "tex"
            style = "text"
            width = "12em"
            line_space = "0.5em"
            max_width = true
            align = "left"
            foreground = "#202020"
            debug = true
            insets = { top = 1, bottom = 2, left = 3, right = 4 }
            "##,
        )
        .unwrap();
        assert_eq!(cfg.text_size, Some(24.0));
        assert_eq!(cfg.math_version.as_deref(), Some("tex"));
        assert_eq!(cfg.width.as_deref(), Some("12em"));
        assert_eq!(cfg.line_space.as_deref(), Some("0.5em"));
        assert!(cfg.max_width);
        assert_eq!(cfg.align, HAlign::Left);
        assert!(cfg.debug);
        assert_eq!(cfg.insets, Some(Insets::new(1, 2, 3, 4)));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = RenderConfig::from_toml_str("colour = \"red\"").unwrap_err();
        assert!(format!("{err}").contains("TOML parse error"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = RenderConfig::load(Path::new("/nonexistent/texbox.toml")).unwrap_err();
        assert!(format!("{err}").contains("I/O error"));
    }
}
