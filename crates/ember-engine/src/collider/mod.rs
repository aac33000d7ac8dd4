//! Geometric collision volumes and the pairwise intersection resolver.
//!
//! Responsibilities:
//! - represent the six collision volumes as plain geometric data
//! - resolve any pair through a single dispatch with symmetry folding
//!
//! Colliders are independent of rendering: they hold only the owning
//! shape's local position, never the composed ancestor transform. Tests are
//! stateless and symmetric (`a.intersects(b) == b.intersects(a)`).

pub(crate) mod math;

use crate::coords::Vec2;

use math::{distance_squared, point_in_polygon, segments_intersect};

/// Tolerance for the point-on-line cross-product test.
const LINE_POINT_EPSILON: f32 = 1e-10;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CircleCollider {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectCollider {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonCollider {
    pub x: f32,
    pub y: f32,
    /// Vertex offsets relative to `(x, y)`.
    pub points: Vec<Vec2>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineCollider {
    pub x: f32,
    pub y: f32,
    pub x2: f32,
    pub y2: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointCollider {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RegularPolygonCollider {
    pub x: f32,
    pub y: f32,
    pub sides: u32,
    pub radius: f32,
}

impl PolygonCollider {
    /// Vertices in collision space: stored offsets plus the collider origin.
    pub fn world_points(&self) -> Vec<Vec2> {
        self.points
            .iter()
            .map(|p| Vec2::new(p.x + self.x, p.y + self.y))
            .collect()
    }
}

impl RegularPolygonCollider {
    /// The circumscribing circle this volume is tested as.
    #[inline]
    pub fn circumscribed(&self) -> CircleCollider {
        CircleCollider { x: self.x, y: self.y, radius: self.radius }
    }
}

/// A collision volume, tagged by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Collider {
    Circle(CircleCollider),
    Rectangle(RectCollider),
    Polygon(PolygonCollider),
    LineSegment(LineCollider),
    Point(PointCollider),
    RegularPolygon(RegularPolygonCollider),
}

impl Collider {
    #[inline]
    pub fn circle(x: f32, y: f32, radius: f32) -> Collider {
        Collider::Circle(CircleCollider { x, y, radius })
    }

    #[inline]
    pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Collider {
        Collider::Rectangle(RectCollider { x, y, width, height })
    }

    #[inline]
    pub fn polygon(x: f32, y: f32, points: Vec<Vec2>) -> Collider {
        Collider::Polygon(PolygonCollider { x, y, points })
    }

    #[inline]
    pub fn line_segment(x: f32, y: f32, x2: f32, y2: f32) -> Collider {
        Collider::LineSegment(LineCollider { x, y, x2, y2 })
    }

    #[inline]
    pub fn point(x: f32, y: f32) -> Collider {
        Collider::Point(PointCollider { x, y })
    }

    #[inline]
    pub fn regular_polygon(x: f32, y: f32, sides: u32, radius: f32) -> Collider {
        Collider::RegularPolygon(RegularPolygonCollider { x, y, sides, radius })
    }

    /// Moves the volume by `(dx, dy)`. Line segments move both endpoints.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Collider::Circle(c) => {
                c.x += dx;
                c.y += dy;
            }
            Collider::Rectangle(r) => {
                r.x += dx;
                r.y += dy;
            }
            Collider::Polygon(p) => {
                p.x += dx;
                p.y += dy;
            }
            Collider::LineSegment(l) => {
                l.x += dx;
                l.y += dy;
                l.x2 += dx;
                l.y2 += dy;
            }
            Collider::Point(p) => {
                p.x += dx;
                p.y += dy;
            }
            Collider::RegularPolygon(rp) => {
                rp.x += dx;
                rp.y += dy;
            }
        }
    }

    /// Moves the volume's origin to `(x, y)`, keeping its extent.
    pub fn set_position(&mut self, x: f32, y: f32) {
        let (ox, oy) = self.origin();
        self.translate(x - ox, y - oy);
    }

    fn origin(&self) -> (f32, f32) {
        match self {
            Collider::Circle(c) => (c.x, c.y),
            Collider::Rectangle(r) => (r.x, r.y),
            Collider::Polygon(p) => (p.x, p.y),
            Collider::LineSegment(l) => (l.x, l.y),
            Collider::Point(p) => (p.x, p.y),
            Collider::RegularPolygon(rp) => (rp.x, rp.y),
        }
    }

    /// Pairwise intersection test.
    ///
    /// Symmetric for every pair of variants. Regular polygons are always
    /// reduced to their circumscribing circle before testing.
    pub fn intersects(&self, other: &Collider) -> bool {
        use Collider::*;

        match (self, other) {
            (RegularPolygon(rp), _) => Circle(rp.circumscribed()).intersects(other),
            (_, RegularPolygon(rp)) => self.intersects(&Circle(rp.circumscribed())),

            (Circle(a), Circle(b)) => circle_circle(a, b),
            (Circle(a), Rectangle(b)) => circle_rect(a, b),
            (Rectangle(a), Circle(b)) => circle_rect(b, a),
            (Circle(a), Polygon(b)) => circle_polygon(a, b),
            (Polygon(a), Circle(b)) => circle_polygon(b, a),
            (Circle(a), LineSegment(b)) => circle_line(a, b),
            (LineSegment(a), Circle(b)) => circle_line(b, a),
            (Circle(a), Point(b)) => circle_point(a, b),
            (Point(a), Circle(b)) => circle_point(b, a),

            (Rectangle(a), Rectangle(b)) => rect_rect(a, b),
            (Rectangle(a), Polygon(b)) => rect_polygon(a, b),
            (Polygon(a), Rectangle(b)) => rect_polygon(b, a),
            (Rectangle(a), LineSegment(b)) => rect_line(a, b),
            (LineSegment(a), Rectangle(b)) => rect_line(b, a),
            (Rectangle(a), Point(b)) => rect_point(a, b),
            (Point(a), Rectangle(b)) => rect_point(b, a),

            (Polygon(a), Polygon(b)) => polygon_polygon(a, b),
            (Polygon(a), LineSegment(b)) => polygon_line(a, b),
            (LineSegment(a), Polygon(b)) => polygon_line(b, a),
            (Polygon(a), Point(b)) => polygon_point(a, b),
            (Point(a), Polygon(b)) => polygon_point(b, a),

            (LineSegment(a), LineSegment(b)) => line_line(a, b),
            (LineSegment(a), Point(b)) => line_point(a, b),
            (Point(a), LineSegment(b)) => line_point(b, a),

            (Point(a), Point(b)) => point_point(a, b),
        }
    }
}

// ── pairwise tests ────────────────────────────────────────────────────────

fn circle_circle(a: &CircleCollider, b: &CircleCollider) -> bool {
    let radius_sum = a.radius + b.radius;
    distance_squared(a.x, a.y, b.x, b.y) < radius_sum * radius_sum
}

fn circle_rect(c: &CircleCollider, r: &RectCollider) -> bool {
    let closest_x = c.x.clamp(r.x, r.x + r.width);
    let closest_y = c.y.clamp(r.y, r.y + r.height);
    distance_squared(c.x, c.y, closest_x, closest_y) <= c.radius * c.radius
}

fn circle_point(c: &CircleCollider, p: &PointCollider) -> bool {
    distance_squared(c.x, c.y, p.x, p.y) < c.radius * c.radius
}

fn circle_line(c: &CircleCollider, l: &LineCollider) -> bool {
    let length_squared = distance_squared(l.x, l.y, l.x2, l.y2);
    if length_squared == 0.0 {
        return circle_point(c, &PointCollider { x: l.x, y: l.y });
    }

    let t = (((c.x - l.x) * (l.x2 - l.x) + (c.y - l.y) * (l.y2 - l.y)) / length_squared)
        .clamp(0.0, 1.0);
    let closest_x = l.x + t * (l.x2 - l.x);
    let closest_y = l.y + t * (l.y2 - l.y);

    distance_squared(c.x, c.y, closest_x, closest_y) < c.radius * c.radius
}

fn circle_polygon(c: &CircleCollider, poly: &PolygonCollider) -> bool {
    let world = poly.world_points();
    if point_in_polygon(c.x, c.y, &world) {
        return true;
    }
    polygon_edges(&world).any(|edge| circle_line(c, &edge))
}

fn rect_rect(a: &RectCollider, b: &RectCollider) -> bool {
    // Strict comparisons: touching edges do not intersect.
    !(a.x >= b.x + b.width
        || a.x + a.width <= b.x
        || a.y >= b.y + b.height
        || a.y + a.height <= b.y)
}

fn rect_point(r: &RectCollider, p: &PointCollider) -> bool {
    p.x >= r.x && p.x <= r.x + r.width && p.y >= r.y && p.y <= r.y + r.height
}

fn rect_line(r: &RectCollider, l: &LineCollider) -> bool {
    if rect_point(r, &PointCollider { x: l.x, y: l.y })
        || rect_point(r, &PointCollider { x: l.x2, y: l.y2 })
    {
        return true;
    }
    rect_edges(r).iter().any(|edge| line_line(l, edge))
}

fn rect_polygon(r: &RectCollider, poly: &PolygonCollider) -> bool {
    let world = poly.world_points();

    if world
        .iter()
        .any(|p| rect_point(r, &PointCollider { x: p.x, y: p.y }))
    {
        return true;
    }

    if rect_corners(r)
        .iter()
        .any(|c| point_in_polygon(c.x, c.y, &world))
    {
        return true;
    }

    let edges = rect_edges(r);
    polygon_edges(&world).any(|poly_edge| edges.iter().any(|rect_edge| line_line(rect_edge, &poly_edge)))
}

fn polygon_point(poly: &PolygonCollider, p: &PointCollider) -> bool {
    point_in_polygon(p.x, p.y, &poly.world_points())
}

fn polygon_line(poly: &PolygonCollider, l: &LineCollider) -> bool {
    let world = poly.world_points();

    if point_in_polygon(l.x, l.y, &world) || point_in_polygon(l.x2, l.y2, &world) {
        return true;
    }
    polygon_edges(&world).any(|edge| line_line(l, &edge))
}

fn polygon_polygon(a: &PolygonCollider, b: &PolygonCollider) -> bool {
    let world_a = a.world_points();
    let world_b = b.world_points();

    if world_a.iter().any(|p| point_in_polygon(p.x, p.y, &world_b)) {
        return true;
    }
    if world_b.iter().any(|p| point_in_polygon(p.x, p.y, &world_a)) {
        return true;
    }

    let edges_b: Vec<LineCollider> = polygon_edges(&world_b).collect();
    polygon_edges(&world_a).any(|ea| edges_b.iter().any(|eb| line_line(&ea, eb)))
}

fn line_line(a: &LineCollider, b: &LineCollider) -> bool {
    segments_intersect(a.x, a.y, a.x2, a.y2, b.x, b.y, b.x2, b.y2)
}

fn line_point(l: &LineCollider, p: &PointCollider) -> bool {
    let cross = (p.y - l.y) * (l.x2 - l.x) - (p.x - l.x) * (l.y2 - l.y);
    if cross.abs() > LINE_POINT_EPSILON {
        return false;
    }

    let dot = (p.x - l.x) * (l.x2 - l.x) + (p.y - l.y) * (l.y2 - l.y);
    if dot < 0.0 {
        return false;
    }

    dot <= distance_squared(l.x, l.y, l.x2, l.y2)
}

fn point_point(a: &PointCollider, b: &PointCollider) -> bool {
    // Exact equality, not a distance threshold.
    a.x == b.x && a.y == b.y
}

// ── edge/corner helpers ───────────────────────────────────────────────────

fn rect_edges(r: &RectCollider) -> [LineCollider; 4] {
    let (x2, y2) = (r.x + r.width, r.y + r.height);
    [
        LineCollider { x: r.x, y: r.y, x2, y2: r.y },
        LineCollider { x: x2, y: r.y, x2, y2 },
        LineCollider { x: x2, y: y2, x2: r.x, y2 },
        LineCollider { x: r.x, y: y2, x2: r.x, y2: r.y },
    ]
}

fn rect_corners(r: &RectCollider) -> [Vec2; 4] {
    let (x2, y2) = (r.x + r.width, r.y + r.height);
    [
        Vec2::new(r.x, r.y),
        Vec2::new(x2, r.y),
        Vec2::new(x2, y2),
        Vec2::new(r.x, y2),
    ]
}

fn polygon_edges(world: &[Vec2]) -> impl Iterator<Item = LineCollider> + '_ {
    let n = world.len();
    (0..n).map(move |i| {
        let a = world[i];
        let b = world[(i + 1) % n];
        LineCollider { x: a.x, y: a.y, x2: b.x, y2: b.y }
    })
}
