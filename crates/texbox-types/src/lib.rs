//! Foundation types for texbox.
//!
//! This crate contains the engine-agnostic types shared by all texbox crates:
//! colors, the drawing surface trait, alignment and insets, render
//! configuration, and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod graphics;
pub mod layout;
