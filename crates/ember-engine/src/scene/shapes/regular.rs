use core::f32::consts::PI;

use crate::coords::Vec2;
use crate::raster::PixelBuf;
use crate::scene::{Scene, ShapeCore, ShapeId};

/// Regular polygon centered at the shape position, first vertex pointing up.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularPolygon {
    pub sides: u32,
    radius: f32,
    pub fill: bool,
}

impl RegularPolygon {
    #[inline]
    pub fn from_radius(sides: u32, radius: f32, fill: bool) -> Self {
        Self { sides, radius, fill }
    }

    /// Side-length construction: `r = L / (2 * sin(pi / sides))`.
    #[inline]
    pub fn from_side_length(sides: u32, side_length: f32, fill: bool) -> Self {
        let radius = side_length / (2.0 * (PI / sides as f32).sin());
        Self { sides, radius, fill }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// Vertices at `i * 2pi / sides - pi/2`, pushed through the transform chain.
fn transformed_vertices(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    rp: &RegularPolygon,
) -> Vec<Vec2> {
    let center = core.position();
    (0..rp.sides)
        .map(|i| {
            let angle = 2.0 * PI / rp.sides as f32 * i as f32 - PI / 2.0;
            let v = Vec2::new(
                center.x + rp.radius * angle.cos(),
                center.y + rp.radius * angle.sin(),
            );
            let (x, y) = scene.transformed_pixel(id, v);
            Vec2::new(x as f32, y as f32)
        })
        .collect()
}

pub(crate) fn draw_aliased(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    rp: &RegularPolygon,
    out: &mut PixelBuf,
) {
    let vertices = transformed_vertices(scene, id, core, rp);

    if rp.fill {
        core.fill_even_odd(out, &vertices);
    }

    if vertices.len() >= 3 {
        for i in 0..vertices.len() {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            core.bresenham_line(out, a.x as i32, a.y as i32, b.x as i32, b.y as i32);
        }
    }
}

pub(crate) fn draw_anti_aliased(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    rp: &RegularPolygon,
    out: &mut PixelBuf,
) {
    let vertices = transformed_vertices(scene, id, core, rp);

    if vertices.len() >= 3 {
        for i in 0..vertices.len() {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            core.wu_line(out, a.x as i32, a.y as i32, b.x as i32, b.y as i32);
        }
    }

    if rp.fill {
        core.fill_even_odd(out, &vertices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::render::DrawOptions;
    use crate::scene::Scene;

    #[test]
    fn side_length_converts_to_circumradius() {
        // Hexagon: side length equals circumradius.
        let hex = RegularPolygon::from_side_length(6, 10.0, false);
        assert!((hex.radius() - 10.0).abs() < 1e-4);

        // Square: r = L / (2 sin(pi/4)) = L / sqrt(2).
        let square = RegularPolygon::from_side_length(4, 10.0, false);
        assert!((square.radius() - 10.0 / core::f32::consts::SQRT_2).abs() < 1e-3);
    }

    #[test]
    fn first_vertex_points_up() {
        let mut scene = Scene::new();
        let id = scene.spawn(
            ShapeCore::new(32.0, 32.0, Color::WHITE),
            RegularPolygon::from_radius(4, 10.0, false),
        );
        let options = DrawOptions { width: 64, height: 64, antialias: false };
        let out = scene.draw(id, &options);
        // The topmost vertex of a square with radius 10 sits at (32, 22).
        assert!(out.covers(32, 22));
    }

    #[test]
    fn filled_hexagon_covers_center() {
        let mut scene = Scene::new();
        let id = scene.spawn(
            ShapeCore::new(32.0, 32.0, Color::WHITE),
            RegularPolygon::from_radius(6, 8.0, true),
        );
        let options = DrawOptions { width: 64, height: 64, antialias: false };
        let out = scene.draw(id, &options);
        assert!(out.covers(32, 32));
        assert!(!out.covers(32, 45));
    }
}
