//! Error types for texbox.

use std::io;

/// Errors produced by texbox.
///
/// Layout itself never fails: absent atoms degrade to empty boxes and
/// oversized content is force-broken. Errors only surface at the edges,
/// when a render is configured or drawn.
#[derive(Debug, thiserror::Error)]
pub enum TexError {
    /// A required builder option was never set.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("graphics error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_display() {
        let e = TexError::InvalidState("a text size is required".into());
        assert_eq!(format!("{e}"), "invalid state: a text size is required");
    }

    #[test]
    fn config_error_display() {
        let e = TexError::Config("unknown math version `foo`".into());
        assert_eq!(format!("{e}"), "config error: unknown math version `foo`");
    }

    #[test]
    fn backend_error_display() {
        let e = TexError::Backend("surface lost".into());
        assert_eq!(format!("{e}"), "graphics error: surface lost");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: TexError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("text_size = [[[").unwrap_err();
        let e: TexError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: TexError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(TexError::InvalidState("oops".into()));
        assert!(r.is_err());
    }
}
