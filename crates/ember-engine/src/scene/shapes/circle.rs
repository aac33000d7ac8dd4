use crate::raster::PixelBuf;
use crate::scene::{Scene, ShapeCore, ShapeId};

/// Circle centered at the shape position.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub radius: f32,
    pub fill: bool,
}

impl Circle {
    #[inline]
    pub fn new(radius: f32, fill: bool) -> Self {
        Self { radius, fill }
    }
}

/// 8-way symmetric reflections of an octant offset.
fn octant_points(cx: i32, cy: i32, x: i32, y: i32) -> [(i32, i32); 8] {
    [
        (cx + x, cy + y),
        (cx - x, cy + y),
        (cx + x, cy - y),
        (cx - x, cy - y),
        (cx + y, cy + x),
        (cx - y, cy + x),
        (cx + y, cy - x),
        (cx - y, cy - x),
    ]
}

fn emit_octants(core: &ShapeCore, out: &mut PixelBuf, cx: i32, cy: i32, x: i32, y: i32) {
    for (px, py) in octant_points(cx, cy, x, y) {
        out.push(px, py, core.sample(px as f32, py as f32));
    }
}

fn emit_octants_with_coverage(
    core: &ShapeCore,
    out: &mut PixelBuf,
    cx: i32,
    cy: i32,
    x: i32,
    y: i32,
    intensity: f32,
) {
    if intensity <= 0.01 {
        return;
    }
    for (px, py) in octant_points(cx, cy, x, y) {
        if px < 0 || py < 0 {
            continue;
        }
        let sampled = core.sample(px as f32, py as f32);
        let alpha = (intensity * sampled.a).clamp(0.0, 1.0);
        out.push(px, py, sampled.alpha(alpha));
    }
}

/// Span fill: one horizontal run of `2 * sqrt(r^2 - dy^2) + 1` pixels per
/// scanline. Fill pixels are emitted fully opaque.
fn fill_spans(core: &ShapeCore, out: &mut PixelBuf, cx: i32, cy: i32, r: i32) {
    let r2 = r * r;
    out.reserve(((2 * r + 1) * (2 * r + 1)) as usize);

    for y in (cy - r)..=(cy + r) {
        let dy = y - cy;
        let dy2 = dy * dy;
        if dy2 > r2 {
            continue;
        }
        let dx = ((r2 - dy2) as f32).sqrt() as i32;
        for x in (cx - dx)..=(cx + dx) {
            let mut color = core.sample(x as f32, y as f32);
            color.a = 1.0;
            out.push(x, y, color);
        }
    }
}

/// Disc fill keeping sampled alpha; fully transparent texels are skipped.
fn fill_disc(core: &ShapeCore, out: &mut PixelBuf, cx: i32, cy: i32, r: i32) {
    let r2 = r * r;
    out.reserve(((2 * r + 1) * (2 * r + 1)) as usize);

    for y in (cy - r)..=(cy + r) {
        let dy = y - cy;
        let dy2 = dy * dy;
        if dy2 > r2 {
            continue;
        }
        for x in (cx - r)..=(cx + r) {
            let dx = x - cx;
            if dx * dx + dy2 <= r2 {
                let color = core.sample(x as f32, y as f32);
                if color.a > 0.01 {
                    out.push(x, y, color);
                }
            }
        }
    }
}

/// Midpoint circle outline.
pub(crate) fn draw_aliased(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    circle: &Circle,
    out: &mut PixelBuf,
) {
    let (cx, cy) = scene.transformed_pixel(id, core.position());
    let r = circle.radius as i32;

    let mut x = 0;
    let mut y = r;
    let mut d = 1 - r;

    while x <= y {
        emit_octants(core, out, cx, cy, x, y);
        if d < 0 {
            d += 2 * x + 3;
        } else {
            d += 2 * (x - y) + 5;
            y -= 1;
        }
        x += 1;
    }

    if circle.fill {
        fill_spans(core, out, cx, cy, r);
    }
}

/// Wu circle outline: for each column in the first octant, the true edge
/// `y = sqrt(r^2 - x^2)` is split across two vertically adjacent pixels,
/// mirrored into all eight octants.
pub(crate) fn draw_anti_aliased(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    circle: &Circle,
    out: &mut PixelBuf,
) {
    let (cx, cy) = scene.transformed_pixel(id, core.position());
    let r = circle.radius as i32;
    let rf = r as f32;

    let max_x = rf / core::f32::consts::SQRT_2;
    let mut xf = 0.0f32;
    while xf <= max_x {
        let yf = (rf * rf - xf * xf).sqrt();
        let y_low = yf.floor();
        let fpart = yf - y_low;

        let (x, y1, y2) = (xf as i32, y_low as i32, y_low as i32 + 1);
        emit_octants_with_coverage(core, out, cx, cy, x, y1, 1.0 - fpart);
        emit_octants_with_coverage(core, out, cx, cy, x, y2, fpart);
        emit_octants_with_coverage(core, out, cx, cy, y1, x, 1.0 - fpart);
        emit_octants_with_coverage(core, out, cx, cy, y2, x, fpart);

        xf += 1.0;
    }

    if circle.fill {
        fill_disc(core, out, cx, cy, r);
    }
}
