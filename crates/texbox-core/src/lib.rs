//! texbox math typesetting engine.
//!
//! Converts a tree of semantic atoms into measured boxes, optionally
//! re-flows the result into width-limited lines, and wraps it in a
//! drawable [`render::Render`]. Nothing here touches a platform API;
//! fonts come in through [`env::MathFont`] and pixels go out through
//! [`graphics::Graphics`].

// Re-exports from texbox-types (foundation types and traits).
pub use texbox_types::color;
pub use texbox_types::config;
pub use texbox_types::error;
pub use texbox_types::graphics;
pub use texbox_types::layout;

pub mod atom;
pub mod boxes;
pub mod env;
pub mod formula;
pub mod render;
pub mod split;
pub mod units;

#[cfg(test)]
pub(crate) mod test_utils;
