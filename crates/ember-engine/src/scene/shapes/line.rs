use crate::coords::Vec2;
use crate::raster::PixelBuf;
use crate::scene::{Scene, ShapeCore, ShapeId};

/// Line segment from the shape position to `(x2, y2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x2: f32,
    pub y2: f32,
}

impl Line {
    #[inline]
    pub fn new(x2: f32, y2: f32) -> Self {
        Self { x2, y2 }
    }
}

fn endpoints(scene: &Scene, id: ShapeId, core: &ShapeCore, line: &Line) -> ((i32, i32), (i32, i32)) {
    let start = scene.transformed_pixel(id, core.position());
    let end = scene.transformed_pixel(id, Vec2::new(line.x2, line.y2));
    (start, end)
}

pub(crate) fn draw_aliased(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    line: &Line,
    out: &mut PixelBuf,
) {
    let ((x0, y0), (x1, y1)) = endpoints(scene, id, core, line);
    core.bresenham_line(out, x0, y0, x1, y1);
}

pub(crate) fn draw_anti_aliased(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    line: &Line,
    out: &mut PixelBuf,
) {
    let ((x0, y0), (x1, y1)) = endpoints(scene, id, core, line);
    core.wu_line(out, x0, y0, x1, y1);
}
