//! Scene graph: shape arena, transform composition, and variant dispatch.
//!
//! Responsibilities:
//! - store shapes in an arena addressed by stable [`ShapeId`] handles
//! - compose transforms through parent chains (innermost first)
//! - keep shape-specific drawing isolated per variant file under
//!   `scene::shapes`

mod graph;
mod shape;

pub mod shapes;

pub use graph::{Scene, SceneError, ShapeId, ShapeNode};
pub use shape::ShapeCore;
pub use shapes::{Circle, Collection, Line, Polygon, Rect, RegularPolygon, ShapeKind};
