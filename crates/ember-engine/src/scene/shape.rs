use std::sync::Arc;

use crate::collider::Collider;
use crate::collider::math::point_in_polygon;
use crate::coords::Vec2;
use crate::paint::Color;
use crate::raster::PixelBuf;
use crate::scene::ShapeId;
use crate::texture::Texture;

/// Coverage below this never reaches the output stream.
const COVERAGE_EPSILON: f32 = 0.01;

#[derive(Debug, Clone)]
struct Rotation {
    pivot: Vec2,
    /// Degrees, wrapped to `[0, 360)`.
    angle: f32,
}

#[derive(Debug, Clone)]
struct Scaling {
    factor: Vec2,
    origin: Vec2,
}

#[derive(Debug, Clone)]
struct UvTransform {
    scale: Vec2,
    offset: Vec2,
    /// Degrees, applied about the UV-space center (0.5, 0.5).
    rotation: f32,
}

/// Transform, paint, and collision state common to every shape variant.
///
/// Responsibilities:
/// - own the local transform (position, pivot rotation, origin-based scale)
/// - own the texture binding and its UV transform
/// - own the optional collider and keep it positioned with the shape
/// - provide the rasterization primitives variants draw with
///
/// The parent back-reference is a scene-arena id; composition through the
/// ancestor chain lives on [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone)]
pub struct ShapeCore {
    position: Vec2,
    z: f32,
    tint: Color,
    rotation: Rotation,
    scaling: Scaling,
    texture: Option<Arc<Texture>>,
    fix_texture: bool,
    uv: UvTransform,
    collider: Option<Collider>,
    parent: Option<ShapeId>,
}

impl ShapeCore {
    /// New core at `(x, y)`. Pivot and scale origin start at the position;
    /// z starts at 0.
    pub fn new(x: f32, y: f32, tint: Color) -> Self {
        let position = Vec2::new(x, y);
        Self {
            position,
            z: 0.0,
            tint,
            rotation: Rotation { pivot: position, angle: 0.0 },
            scaling: Scaling { factor: Vec2::new(1.0, 1.0), origin: position },
            texture: None,
            fix_texture: false,
            uv: UvTransform {
                scale: Vec2::new(1.0, 1.0),
                offset: Vec2::zero(),
                rotation: 0.0,
            },
            collider: None,
            parent: None,
        }
    }

    #[inline]
    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    // ── position & depth ──────────────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.z
    }

    #[inline]
    pub fn set_z(&mut self, z: f32) {
        self.z = z;
    }

    /// Moves the shape; an attached collider moves with it.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
        if let Some(c) = &mut self.collider {
            c.set_position(x, y);
        }
    }

    /// Shifts the shape by `(dx, dy)`; an attached collider moves with it.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.position = self.position + Vec2::new(dx, dy);
        if let Some(c) = &mut self.collider {
            c.translate(dx, dy);
        }
    }

    // ── tint ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn tint(&self) -> Color {
        self.tint
    }

    #[inline]
    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[inline]
    pub fn angle(&self) -> f32 {
        self.rotation.angle
    }

    #[inline]
    pub fn pivot(&self) -> Vec2 {
        self.rotation.pivot
    }

    /// Adds `delta` degrees; the stored angle stays in `[0, 360)`.
    pub fn rotate(&mut self, delta: f32) {
        self.rotation.angle = (self.rotation.angle + delta).rem_euclid(360.0);
    }

    #[inline]
    pub fn set_pivot(&mut self, x: f32, y: f32) {
        self.rotation.pivot = Vec2::new(x, y);
    }

    // ── scale ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn scale_factor(&self) -> Vec2 {
        self.scaling.factor
    }

    #[inline]
    pub fn set_scale(&mut self, sx: f32, sy: f32) {
        self.scaling.factor = Vec2::new(sx, sy);
    }

    #[inline]
    pub fn set_scale_origin(&mut self, x: f32, y: f32) {
        self.scaling.origin = Vec2::new(x, y);
    }

    // ── texture ───────────────────────────────────────────────────────────

    #[inline]
    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    #[inline]
    pub fn set_texture(&mut self, texture: Option<Arc<Texture>>) {
        self.texture = texture;
    }

    #[inline]
    pub fn set_texture_scale(&mut self, sx: f32, sy: f32) {
        self.uv.scale = Vec2::new(sx, sy);
    }

    #[inline]
    pub fn set_texture_offset(&mut self, dx: f32, dy: f32) {
        self.uv.offset = Vec2::new(dx, dy);
    }

    #[inline]
    pub fn set_texture_rotation(&mut self, degrees: f32) {
        self.uv.rotation = degrees;
    }

    /// When set, sampling un-rotates local coordinates by the shape's own
    /// angle, so the texture stays world-locked while the shape spins.
    #[inline]
    pub fn set_fix_texture(&mut self, fixed: bool) {
        self.fix_texture = fixed;
    }

    #[inline]
    pub fn fix_texture(&self) -> bool {
        self.fix_texture
    }

    #[inline]
    pub fn texture_scale(&self) -> Vec2 {
        self.uv.scale
    }

    #[inline]
    pub fn texture_offset(&self) -> Vec2 {
        self.uv.offset
    }

    #[inline]
    pub fn texture_rotation(&self) -> f32 {
        self.uv.rotation
    }

    // ── collider ──────────────────────────────────────────────────────────

    #[inline]
    pub fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }

    /// Attaches `collider`, replacing any previous one.
    ///
    /// Colliders live in the shape's local position space: they are not
    /// composed through ancestor transforms, so collision for orbiting
    /// children is resolved at their un-composed position.
    #[inline]
    pub fn set_collider(&mut self, collider: Collider) {
        self.collider = Some(collider);
    }

    #[inline]
    pub fn clear_collider(&mut self) {
        self.collider = None;
    }

    // ── parent back-reference ─────────────────────────────────────────────

    #[inline]
    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<ShapeId>) {
        self.parent = parent;
    }

    // ── local transform ───────────────────────────────────────────────────

    /// Applies this shape's own scale-about-origin then rotation-about-pivot.
    ///
    /// Ancestor composition and final pixel rounding happen in the scene
    /// walk, not here.
    pub(crate) fn local_transform(&self, p: Vec2) -> Vec2 {
        let o = self.scaling.origin;
        let mut q = Vec2::new(
            (p.x - o.x) * self.scaling.factor.x + o.x,
            (p.y - o.y) * self.scaling.factor.y + o.y,
        );
        if self.rotation.angle != 0.0 {
            let (sin, cos) = self.rotation.angle.to_radians().sin_cos();
            q = q.rotated_about(self.rotation.pivot, sin, cos);
        }
        q
    }

    // ── texture sampling ──────────────────────────────────────────────────

    /// Samples the bound texture at pixel `(x, y)`.
    ///
    /// Untextured shapes return the tint unchanged. Textured shapes return
    /// the texel RGB with alpha `texel.a * tint.a`; tint RGB is only the
    /// untextured fallback.
    pub fn sample(&self, x: f32, y: f32) -> Color {
        let Some(texture) = &self.texture else {
            return self.tint;
        };

        let mut local = Vec2::new(x - self.position.x, y - self.position.y);

        if self.fix_texture && self.rotation.angle != 0.0 {
            let (sin, cos) = self.rotation.angle.to_radians().sin_cos();
            let pivot_offset = self.rotation.pivot - self.position;
            // Inverse of the draw rotation: the sampled texture stays put.
            local = local.rotated_about(pivot_offset, -sin, cos);
        }

        let mut u = local.x / self.uv.scale.x + self.uv.offset.x;
        let mut v = local.y / self.uv.scale.y + self.uv.offset.y;

        if self.uv.rotation != 0.0 {
            let (sin, cos) = self.uv.rotation.to_radians().sin_cos();
            let rotated = Vec2::new(u, v).rotated_about(Vec2::new(0.5, 0.5), sin, cos);
            u = rotated.x;
            v = rotated.y;
        }

        let mut color = texture.sample(u as i32, v as i32);
        color.a *= self.tint.a;
        color
    }

    // ── rasterization primitives ──────────────────────────────────────────

    /// Integer line from `(x0, y0)` to `(x1, y1)` inclusive.
    ///
    /// Emits exactly `max(|dx|, |dy|) + 1` pixels, sampling the texture per
    /// pixel when one is bound.
    pub(crate) fn bresenham_line(&self, out: &mut PixelBuf, x0: i32, y0: i32, x1: i32, y1: i32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        out.reserve((dx.max(dy) + 1) as usize);

        let (mut x, mut y) = (x0, y0);
        let mut color = self.sample(x as f32, y as f32);
        out.push(x, y, color);

        while x != x1 || y != y1 {
            let e2 = err * 2;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
            if self.texture.is_some() {
                color = self.sample(x as f32, y as f32);
            }
            out.push(x, y, color);
        }
    }

    /// Xiaolin Wu anti-aliased line from `(x0, y0)` to `(x1, y1)`.
    ///
    /// Endpoint pixels carry full intensity; interior columns emit two
    /// adjacent pixels whose coverages sum to 1.
    pub(crate) fn wu_line(&self, out: &mut PixelBuf, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (mut x0, mut y0, mut x1, mut y1) = (x0 as f32, y0 as f32, x1 as f32, y1 as f32);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = y1 - y0;
        let gradient = if dx == 0.0 { 1.0 } else { dy / dx };

        // First endpoint.
        let xpxl1 = x0.round() as i32;
        let yend = y0 + gradient * (xpxl1 as f32 - x0);
        let xgap = 1.0 - ((x0 + 0.5) - (x0 + 0.5).floor());
        let ypxl1 = yend.floor() as i32;
        let fpart = yend - ypxl1 as f32;
        self.put_wu(out, steep, xpxl1, ypxl1, (1.0 - fpart) * xgap, true);
        self.put_wu(out, steep, xpxl1, ypxl1 + 1, fpart * xgap, false);

        let mut intery = yend + gradient;

        // Second endpoint.
        let xpxl2 = x1.round() as i32;
        let yend = y1 + gradient * (xpxl2 as f32 - x1);
        let xgap = (x1 + 0.5) - (x1 + 0.5).floor();
        let ypxl2 = yend.floor() as i32;
        let fpart = yend - ypxl2 as f32;
        self.put_wu(out, steep, xpxl2, ypxl2, (1.0 - fpart) * xgap, true);
        self.put_wu(out, steep, xpxl2, ypxl2 + 1, fpart * xgap, false);

        // Interior columns.
        for x in (xpxl1 + 1)..xpxl2 {
            let base = intery.floor();
            let fpart = intery - base;
            self.put_wu(out, steep, x, base as i32, 1.0 - fpart, false);
            self.put_wu(out, steep, x, base as i32 + 1, fpart, false);
            intery += gradient;
        }
    }

    #[inline]
    fn put_wu(
        &self,
        out: &mut PixelBuf,
        steep: bool,
        major: i32,
        minor: i32,
        coverage: f32,
        endpoint: bool,
    ) {
        if steep {
            self.emit_coverage(out, minor, major, coverage, endpoint);
        } else {
            self.emit_coverage(out, major, minor, coverage, endpoint);
        }
    }

    /// Emits one partial-coverage pixel.
    ///
    /// Endpoint pixels override coverage to 1. Coverage below 0.01 is
    /// suppressed. Historical quirk kept for compatibility: negative
    /// coordinates clamp to 0 instead of dropping, which can duplicate a
    /// border pixel.
    pub(crate) fn emit_coverage(
        &self,
        out: &mut PixelBuf,
        x: i32,
        y: i32,
        coverage: f32,
        endpoint: bool,
    ) {
        let coverage = if endpoint { 1.0 } else { coverage };
        if coverage < COVERAGE_EPSILON {
            return;
        }

        let x = x.max(0);
        let y = y.max(0);
        let coverage = coverage.clamp(0.0, 1.0);

        let color = match &self.texture {
            None => self.tint.alpha(coverage * self.tint.a),
            Some(_) => {
                let sampled = self.sample(x as f32, y as f32);
                sampled.alpha(coverage * sampled.a)
            }
        };
        out.push(x, y, color);
    }

    /// Even-odd scanline fill over the vertex list's bounding box.
    ///
    /// Fewer than 3 vertices fill nothing.
    pub(crate) fn fill_even_odd(&self, out: &mut PixelBuf, vertices: &[Vec2]) {
        if vertices.len() < 3 {
            return;
        }

        let (mut min_x, mut max_x) = (vertices[0].x, vertices[0].x);
        let (mut min_y, mut max_y) = (vertices[0].y, vertices[0].y);
        for v in vertices {
            min_x = min_x.min(v.x);
            max_x = max_x.max(v.x);
            min_y = min_y.min(v.y);
            max_y = max_y.max(v.y);
        }

        for x in (min_x as i32)..=(max_x as i32) {
            for y in (min_y as i32)..=(max_y as i32) {
                if point_in_polygon(x as f32, y as f32, vertices) {
                    out.push(x, y, self.sample(x as f32, y as f32));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::WrapMode;

    fn core() -> ShapeCore {
        ShapeCore::new(0.0, 0.0, Color::WHITE)
    }

    fn striped_texture() -> Arc<Texture> {
        // 2x1: red | blue, so u parity is visible.
        Arc::new(
            Texture::from_grid(vec![vec![Color::RED, Color::BLUE]])
                .unwrap()
                .with_wrap(WrapMode::Repeat),
        )
    }

    // ── transform state ───────────────────────────────────────────────────

    #[test]
    fn local_transform_is_identity_by_default() {
        let p = core().local_transform(Vec2::new(7.3, -2.5));
        assert_eq!(p, Vec2::new(7.3, -2.5));
    }

    #[test]
    fn rotate_wraps_into_degree_range() {
        let mut c = core();
        c.rotate(350.0);
        c.rotate(20.0);
        assert!((c.angle() - 10.0).abs() < 1e-4);
        c.rotate(-30.0);
        assert!((c.angle() - 340.0).abs() < 1e-4);
    }

    #[test]
    fn scale_about_origin() {
        let mut c = core();
        c.set_scale(2.0, 3.0);
        c.set_scale_origin(10.0, 10.0);
        let p = c.local_transform(Vec2::new(12.0, 12.0));
        assert_eq!(p, Vec2::new(14.0, 16.0));
    }

    #[test]
    fn rotation_about_pivot_is_clockwise() {
        let mut c = core();
        c.set_pivot(10.0, 10.0);
        c.rotate(90.0);
        let p = c.local_transform(Vec2::new(15.0, 10.0));
        assert!((p.x - 10.0).abs() < 1e-3);
        assert!((p.y - 15.0).abs() < 1e-3);
    }

    #[test]
    fn translate_moves_attached_collider() {
        let mut c = core();
        c.set_collider(Collider::circle(0.0, 0.0, 5.0));
        c.translate(3.0, 4.0);
        assert_eq!(c.collider(), Some(&Collider::circle(3.0, 4.0, 5.0)));
    }

    // ── sampling ──────────────────────────────────────────────────────────

    #[test]
    fn sample_without_texture_returns_tint() {
        let mut c = core();
        c.set_tint(Color::MAGENTA.alpha(0.25));
        assert_eq!(c.sample(40.0, -3.0), Color::MAGENTA.alpha(0.25));
    }

    #[test]
    fn sample_multiplies_texture_and_tint_alpha() {
        let mut c = core();
        c.set_tint(Color::WHITE.alpha(0.5));
        c.set_texture(Some(Arc::new(
            Texture::from_grid(vec![vec![Color::with_alpha(9, 9, 9, 0.5)]]).unwrap(),
        )));
        let got = c.sample(0.0, 0.0);
        assert_eq!((got.r, got.g, got.b), (9, 9, 9));
        assert!((got.a - 0.25).abs() < 1e-5);
    }

    #[test]
    fn sample_is_anchored_at_shape_position() {
        let mut c = ShapeCore::new(5.0, 0.0, Color::WHITE);
        c.set_texture(Some(striped_texture()));
        // Local u = x - 5.
        assert_eq!(c.sample(5.0, 0.0).r, 255);
        assert_eq!(c.sample(6.0, 0.0).b, 255);
    }

    #[test]
    fn uv_scale_stretches_texels() {
        let mut c = core();
        c.set_texture(Some(striped_texture()));
        c.set_texture_scale(2.0, 1.0);
        // Two screen pixels per texel: u = x / 2.
        assert_eq!(c.sample(1.0, 0.0).r, 255);
        assert_eq!(c.sample(2.0, 0.0).b, 255);
    }

    #[test]
    fn fix_texture_counter_rotates_sampling() {
        let mut c = core();
        c.set_texture(Some(striped_texture()));
        c.rotate(180.0);
        c.set_fix_texture(true);
        // Under 180 degrees the inverse rotation maps (1, 0) back to (-1, 0),
        // which wraps to the blue texel. Without fix_texture it would stay red.
        assert_eq!(c.sample(1.0, 0.0).b, 255);
    }

    // ── bresenham ─────────────────────────────────────────────────────────

    #[test]
    fn bresenham_horizontal_includes_both_endpoints() {
        let mut out = PixelBuf::new();
        core().bresenham_line(&mut out, 0, 0, 5, 0);
        let coords: Vec<(i32, i32)> = out.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
    }

    #[test]
    fn bresenham_pixel_count_is_major_axis_plus_one() {
        for (x1, y1) in [(7, 3), (3, 7), (-4, 6), (5, 5), (0, 0)] {
            let mut out = PixelBuf::new();
            core().bresenham_line(&mut out, 0, 0, x1, y1);
            let expected = x1.abs().max(y1.abs()) + 1;
            assert_eq!(out.len(), expected as usize, "to ({x1}, {y1})");
        }
    }

    #[test]
    fn bresenham_samples_texture_per_pixel() {
        let mut c = core();
        c.set_texture(Some(striped_texture()));
        let mut out = PixelBuf::new();
        c.bresenham_line(&mut out, 0, 0, 3, 0);
        let reds: Vec<u8> = out.iter().map(|p| p.color.r).collect();
        assert_eq!(reds, vec![255, 0, 255, 0]);
    }

    // ── wu ────────────────────────────────────────────────────────────────

    #[test]
    fn wu_endpoints_carry_full_intensity() {
        let mut out = PixelBuf::new();
        core().wu_line(&mut out, 0, 0, 5, 0);
        let at = |x: i32| {
            out.iter()
                .find(|p| p.x == x && p.y == 0)
                .map(|p| p.color.a)
                .unwrap_or_else(|| panic!("missing pixel at ({x}, 0)"))
        };
        assert_eq!(at(0), 1.0);
        assert_eq!(at(5), 1.0);
    }

    #[test]
    fn wu_interior_coverage_sums_to_one_per_column() {
        let mut out = PixelBuf::new();
        core().wu_line(&mut out, 0, 0, 7, 3);
        for x in 1..7 {
            let sum: f32 = out.iter().filter(|p| p.x == x).map(|p| p.color.a).sum();
            // Sub-threshold partners are suppressed, so allow their loss.
            assert!(
                (sum - 1.0).abs() < COVERAGE_EPSILON,
                "column {x} coverage {sum}"
            );
        }
    }

    #[test]
    fn wu_suppresses_sub_threshold_coverage() {
        let mut out = PixelBuf::new();
        core().wu_line(&mut out, 0, 0, 5, 0);
        // A perfectly horizontal line never needs the second row.
        assert!(out.iter().all(|p| p.y == 0));
        assert!(out.iter().all(|p| p.color.a >= COVERAGE_EPSILON));
    }

    #[test]
    fn wu_clamps_negative_coordinates_to_zero() {
        let mut out = PixelBuf::new();
        core().wu_line(&mut out, -3, 0, 3, 0);
        assert!(out.iter().all(|p| p.x >= 0 && p.y >= 0));
        assert!(out.covers(0, 0));
    }

    #[test]
    fn wu_zero_length_line_draws_a_point() {
        let mut out = PixelBuf::new();
        core().wu_line(&mut out, 4, 4, 4, 4);
        assert!(!out.is_empty());
        assert!(out.iter().all(|p| (p.x, p.y) == (4, 4)));
    }

    // ── fill ──────────────────────────────────────────────────────────────

    #[test]
    fn fill_skips_degenerate_polygons() {
        let mut out = PixelBuf::new();
        core().fill_even_odd(&mut out, &[Vec2::zero(), Vec2::new(5.0, 5.0)]);
        assert!(out.is_empty());
    }

    #[test]
    fn fill_square_interior() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let mut out = PixelBuf::new();
        core().fill_even_odd(&mut out, &square);
        assert!(out.covers(5, 5));
        assert!(!out.covers(11, 5));
    }

    #[test]
    fn fill_is_winding_independent() {
        let cw = [
            Vec2::new(0.0, 0.0),
            Vec2::new(8.0, 0.0),
            Vec2::new(8.0, 8.0),
            Vec2::new(0.0, 8.0),
        ];
        let ccw: Vec<Vec2> = cw.iter().rev().copied().collect();

        let mut a = PixelBuf::new();
        let mut b = PixelBuf::new();
        core().fill_even_odd(&mut a, &cw);
        core().fill_even_odd(&mut b, &ccw);
        assert_eq!(a, b);
    }
}
