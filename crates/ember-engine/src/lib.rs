//! Ember engine crate.
//!
//! Software 2D rendering and collision for pixel-matrix displays: a scene
//! graph with composed transforms, aliased/anti-aliased rasterization into
//! pixel streams, texture sampling, and a standalone collision subsystem.

pub mod collider;
pub mod coords;
pub mod paint;
pub mod raster;
pub mod scene;
pub mod texture;

pub mod display;
pub mod render;
pub mod text;

pub mod logging;
pub mod profile;
pub mod time;
