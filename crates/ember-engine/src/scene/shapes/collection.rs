use crate::raster::PixelBuf;
use crate::render::DrawOptions;
use crate::scene::{Scene, ShapeId};

/// Composite shape grouping an ordered set of children.
///
/// A collection has no visual footprint of its own; its transform is the
/// composition root for the subtree and its `z` orders it among siblings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    children: Vec<ShapeId>,
}

impl Collection {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct children in insertion order.
    #[inline]
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: ShapeId) {
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, child: ShapeId) {
        self.children.retain(|&c| c != child);
    }
}

/// Draws direct children in ascending z; insertion order breaks ties.
///
/// Nested collections recurse transparently through the scene dispatch.
pub(crate) fn draw(scene: &Scene, collection: &Collection, options: &DrawOptions, out: &mut PixelBuf) {
    let mut order: Vec<(ShapeId, f32)> = collection
        .children
        .iter()
        .filter_map(|&child| scene.core(child).map(|core| (child, core.z())))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (child, _) in order {
        scene.draw_into(child, options, out);
    }
}
