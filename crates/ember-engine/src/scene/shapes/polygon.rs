use crate::coords::Vec2;
use crate::raster::PixelBuf;
use crate::scene::{Scene, ShapeCore, ShapeId};

/// Arbitrary polygon.
///
/// Input vertices are offsets relative to the shape position; they are
/// resolved to absolute coordinates once, when the shape is spawned. Later
/// movement flows through the transform pipeline only; the baked vertices
/// are never re-anchored.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    offsets: Vec<Vec2>,
    baked: Vec<Vec2>,
    pub fill: bool,
}

impl Polygon {
    #[inline]
    pub fn new(offsets: Vec<Vec2>, fill: bool) -> Self {
        Self { offsets, baked: Vec::new(), fill }
    }

    /// Vertex offsets as supplied at construction.
    #[inline]
    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    /// Absolute vertices (offsets + spawn position).
    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.baked
    }

    pub(crate) fn bind(&mut self, origin: Vec2) {
        self.baked = self.offsets.iter().map(|&v| v + origin).collect();
    }
}

fn transformed_vertices(scene: &Scene, id: ShapeId, polygon: &Polygon) -> Vec<Vec2> {
    polygon
        .baked
        .iter()
        .map(|&v| {
            let (x, y) = scene.transformed_pixel(id, v);
            Vec2::new(x as f32, y as f32)
        })
        .collect()
}

/// Sampling core for one outline edge, anchored at the edge start so the
/// edge rasterizes exactly like a standalone line segment placed there.
fn edge_core(core: &ShapeCore, start: Vec2) -> ShapeCore {
    let mut seg = ShapeCore::new(start.x, start.y, core.tint());
    seg.set_texture(core.texture().cloned());
    seg.set_texture_scale(core.texture_scale().x, core.texture_scale().y);
    seg.set_texture_offset(core.texture_offset().x, core.texture_offset().y);
    seg.set_texture_rotation(core.texture_rotation());
    seg.set_fix_texture(core.fix_texture());
    seg
}

pub(crate) fn draw_aliased(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    polygon: &Polygon,
    out: &mut PixelBuf,
) {
    let vertices = transformed_vertices(scene, id, polygon);

    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        edge_core(core, a).bresenham_line(out, a.x as i32, a.y as i32, b.x as i32, b.y as i32);
    }

    if polygon.fill {
        core.fill_even_odd(out, &vertices);
    }
}

pub(crate) fn draw_anti_aliased(
    scene: &Scene,
    id: ShapeId,
    core: &ShapeCore,
    polygon: &Polygon,
    out: &mut PixelBuf,
) {
    let vertices = transformed_vertices(scene, id, polygon);

    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        edge_core(core, a).wu_line(out, a.x as i32, a.y as i32, b.x as i32, b.y as i32);
    }

    if polygon.fill {
        core.fill_even_odd(out, &vertices);
    }
}
