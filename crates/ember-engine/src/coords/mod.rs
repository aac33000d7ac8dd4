//! Coordinate types shared across the scene graph and rasterizer.
//!
//! Canonical space:
//! - Pixel-matrix coordinates, origin top-left
//! - +X right, +Y down
//! - Positive rotation is clockwise on screen

mod vec2;

pub use vec2::Vec2;
