use crate::coords::Vec2;
use crate::raster::PixelBuf;
use crate::scene::{Scene, ShapeCore, ShapeId};

/// Axis-aligned rectangle anchored at the shape position (top-left).
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub width: f32,
    pub height: f32,
    pub fill: bool,
}

impl Rect {
    #[inline]
    pub fn new(width: f32, height: f32, fill: bool) -> Self {
        Self { width, height, fill }
    }
}

/// Transformed corners in TL, BL, BR, TR order.
///
/// Width and height are reduced by one so the outline lands on the exact
/// last pixel column/row instead of one past it.
fn corners(scene: &Scene, id: ShapeId, core: &ShapeCore, rect: &Rect) -> [Vec2; 4] {
    let p = core.position();
    let (w, h) = (rect.width - 1.0, rect.height - 1.0);
    let pixel = |x: f32, y: f32| {
        let (px, py) = scene.transformed_pixel(id, Vec2::new(x, y));
        Vec2::new(px as f32, py as f32)
    };
    [
        pixel(p.x, p.y),
        pixel(p.x, p.y + h),
        pixel(p.x + w, p.y + h),
        pixel(p.x + w, p.y),
    ]
}

pub(crate) fn draw_aliased(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    rect: &Rect,
    out: &mut PixelBuf,
) {
    let [tl, bl, br, tr] = corners(scene, id, core, rect);

    if rect.fill {
        core.fill_even_odd(out, &[tl, bl, br, tr]);
    }

    for (a, b) in [(tl, tr), (bl, br), (tl, bl), (tr, br)] {
        core.bresenham_line(out, a.x as i32, a.y as i32, b.x as i32, b.y as i32);
    }
}

pub(crate) fn draw_anti_aliased(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    rect: &Rect,
    out: &mut PixelBuf,
) {
    let [tl, bl, br, tr] = corners(scene, id, core, rect);

    if rect.fill {
        core.fill_even_odd(out, &[tl, bl, br, tr]);
    }

    for (a, b) in [(tl, tr), (bl, br), (tl, bl), (tr, br)] {
        core.wu_line(out, a.x as i32, a.y as i32, b.x as i32, b.y as i32);
    }
}
