//! Color model shared between shapes, textures, and sinks.
//!
//! Scope:
//! - 8-bit RGB channels with a floating-point alpha, matching what a
//!   pixel-matrix panel latches after brightness scaling
//! - named constants for the common panel colors
//!
//! Geometry types remain in `coords`.

mod color;

pub use color::Color;
