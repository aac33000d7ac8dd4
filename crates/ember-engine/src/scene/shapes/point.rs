use crate::raster::PixelBuf;
use crate::scene::{Scene, ShapeCore, ShapeId};

/// A point has no outline, so aliased and anti-aliased draws are identical.
pub(crate) fn draw(scene: &Scene, id: ShapeId, core: &ShapeCore, out: &mut PixelBuf) {
    let (x, y) = scene.transformed_pixel(id, core.position());
    out.push(x, y, core.sample(x as f32, y as f32));
}
