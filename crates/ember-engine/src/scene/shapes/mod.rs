//! Shape variants.
//!
//! Extending the scene:
//! - add a new variant module here with its geometry struct and draw code
//! - add a matching [`ShapeKind`] variant and dispatch arms below
//! - supply a default collider matching the variant's local geometry

pub(crate) mod circle;
pub(crate) mod collection;
pub(crate) mod line;
pub(crate) mod point;
pub(crate) mod polygon;
pub(crate) mod rect;
pub(crate) mod regular;

pub use circle::Circle;
pub use collection::Collection;
pub use line::Line;
pub use polygon::Polygon;
pub use rect::Rect;
pub use regular::RegularPolygon;

use crate::collider::Collider;
use crate::coords::Vec2;
use crate::raster::PixelBuf;
use crate::render::DrawOptions;
use crate::scene::{Scene, ShapeCore, ShapeId};

/// Geometry payload of a scene shape.
#[derive(Debug, Clone)]
pub enum ShapeKind {
    Point,
    Line(Line),
    Rect(Rect),
    Circle(Circle),
    Polygon(Polygon),
    RegularPolygon(RegularPolygon),
    Collection(Collection),
}

impl ShapeKind {
    /// Resolves position-relative geometry against the spawn position.
    pub(crate) fn bind(&mut self, origin: Vec2) {
        if let ShapeKind::Polygon(p) = self {
            p.bind(origin);
        }
    }

    /// The collider matching this variant's own local geometry.
    pub(crate) fn default_collider(&self, core: &ShapeCore) -> Collider {
        match self {
            ShapeKind::Point => Collider::point(core.x(), core.y()),
            ShapeKind::Line(l) => Collider::line_segment(core.x(), core.y(), l.x2, l.y2),
            ShapeKind::Rect(r) => Collider::rectangle(core.x(), core.y(), r.width, r.height),
            ShapeKind::Circle(c) => Collider::circle(core.x(), core.y(), c.radius),
            ShapeKind::Polygon(p) => Collider::polygon(core.x(), core.y(), p.offsets().to_vec()),
            ShapeKind::RegularPolygon(rp) => {
                Collider::regular_polygon(core.x(), core.y(), rp.sides, rp.radius())
            }
            // Collections have no footprint of their own.
            ShapeKind::Collection(_) => Collider::circle(0.0, 0.0, 0.0),
        }
    }
}

impl From<Line> for ShapeKind {
    fn from(v: Line) -> Self {
        ShapeKind::Line(v)
    }
}

impl From<Rect> for ShapeKind {
    fn from(v: Rect) -> Self {
        ShapeKind::Rect(v)
    }
}

impl From<Circle> for ShapeKind {
    fn from(v: Circle) -> Self {
        ShapeKind::Circle(v)
    }
}

impl From<Polygon> for ShapeKind {
    fn from(v: Polygon) -> Self {
        ShapeKind::Polygon(v)
    }
}

impl From<RegularPolygon> for ShapeKind {
    fn from(v: RegularPolygon) -> Self {
        ShapeKind::RegularPolygon(v)
    }
}

impl From<Collection> for ShapeKind {
    fn from(v: Collection) -> Self {
        ShapeKind::Collection(v)
    }
}

/// Dispatches one shape's draw to its variant, aliased or anti-aliased.
pub(crate) fn draw(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    kind: &ShapeKind,
    options: &DrawOptions,
    out: &mut PixelBuf,
) {
    let aa = options.antialias;
    match kind {
        ShapeKind::Point => point::draw(scene, id, core, out),
        ShapeKind::Line(l) => {
            if aa {
                line::draw_anti_aliased(scene, id, core, l, out);
            } else {
                line::draw_aliased(scene, id, core, l, out);
            }
        }
        ShapeKind::Rect(r) => {
            if aa {
                rect::draw_anti_aliased(scene, id, core, r, out);
            } else {
                rect::draw_aliased(scene, id, core, r, out);
            }
        }
        ShapeKind::Circle(c) => {
            if aa {
                circle::draw_anti_aliased(scene, id, core, c, out);
            } else {
                circle::draw_aliased(scene, id, core, c, out);
            }
        }
        ShapeKind::Polygon(p) => {
            if aa {
                polygon::draw_anti_aliased(scene, id, core, p, out);
            } else {
                polygon::draw_aliased(scene, id, core, p, out);
            }
        }
        ShapeKind::RegularPolygon(rp) => {
            if aa {
                regular::draw_anti_aliased(scene, id, core, rp, out);
            } else {
                regular::draw_aliased(scene, id, core, rp, out);
            }
        }
        ShapeKind::Collection(c) => collection::draw(scene, c, options, out),
    }
}
