//! Frame rendering over a scene's root collections.

use crate::paint::Color;
use crate::raster::{self, PixelBuf};
use crate::scene::{Scene, ShapeId};

/// Per-frame draw settings handed down the shape tree.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawOptions {
    pub width: i32,
    pub height: i32,
    pub antialias: bool,
}

/// Turns a z-ordered set of root shapes into one pixel stream.
///
/// The renderer never clamps coordinates to its own width/height; bounding
/// is the consuming sink's contract (negative coordinates can occur).
#[derive(Debug, Clone)]
pub struct Renderer {
    width: i32,
    height: i32,
    background: Color,
}

impl Renderer {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, background: Color::BLACK }
    }

    #[inline]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Draw options for this renderer's dimensions.
    #[inline]
    pub fn options(&self, antialias: bool) -> DrawOptions {
        DrawOptions { width: self.width, height: self.height, antialias }
    }

    /// Renders `roots` back-to-front: ascending z, stable for equal z.
    ///
    /// Deterministic for identical scene state. Stale root handles are
    /// skipped.
    pub fn render(&self, scene: &Scene, roots: &[ShapeId], options: &DrawOptions) -> PixelBuf {
        let mut order: Vec<(ShapeId, f32)> = roots
            .iter()
            .filter_map(|&id| scene.core(id).map(|core| (id, core.z())))
            .collect();
        order.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut out = PixelBuf::new();
        for (id, _) in order {
            scene.draw_into(id, options, &mut out);
        }
        out
    }

    /// Optional post-process: collapses the stream to one blended pixel per
    /// coordinate, composited over this renderer's background.
    pub fn blend(&self, buf: &PixelBuf) -> PixelBuf {
        raster::composite(buf, self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Circle, Collection, ShapeCore};

    // ── z ordering ────────────────────────────────────────────────────────

    #[test]
    fn roots_render_in_ascending_z() {
        let mut scene = Scene::new();
        let front = scene.spawn(ShapeCore::new(10.0, 10.0, Color::RED).with_z(5.0), Collection::new());
        scene
            .spawn_child(front, ShapeCore::new(10.0, 10.0, Color::RED), Circle::new(2.0, true))
            .unwrap();
        let back = scene.spawn(ShapeCore::new(10.0, 10.0, Color::BLUE).with_z(1.0), Collection::new());
        scene
            .spawn_child(back, ShapeCore::new(10.0, 10.0, Color::BLUE), Circle::new(2.0, true))
            .unwrap();

        let renderer = Renderer::new(64, 64);
        // Listed front-first; z order must still paint blue before red.
        let out = renderer.render(&scene, &[front, back], &renderer.options(false));

        let last = out.iter().filter(|p| (p.x, p.y) == (10, 10)).next_back().unwrap();
        assert_eq!(last.color.r, 255);
        let first = out.iter().find(|p| (p.x, p.y) == (10, 10)).unwrap();
        assert_eq!(first.color.b, 255);
    }

    #[test]
    fn equal_z_keeps_insertion_order() {
        let mut scene = Scene::new();
        let group = scene.spawn(ShapeCore::new(0.0, 0.0, Color::BLACK), Collection::new());
        scene
            .spawn_child(group, ShapeCore::new(5.0, 5.0, Color::RED), Circle::new(2.0, true))
            .unwrap();
        scene
            .spawn_child(group, ShapeCore::new(5.0, 5.0, Color::GREEN), Circle::new(2.0, true))
            .unwrap();

        let renderer = Renderer::new(16, 16);
        let out = renderer.render(&scene, &[group], &renderer.options(false));

        let last = out.iter().filter(|p| (p.x, p.y) == (5, 5)).next_back().unwrap();
        assert_eq!(last.color.g, 255);
    }

    #[test]
    fn render_skips_stale_roots() {
        let mut scene = Scene::new();
        let gone = scene.spawn(ShapeCore::new(0.0, 0.0, Color::WHITE), Circle::new(2.0, true));
        scene.remove(gone);

        let renderer = Renderer::new(16, 16);
        let out = renderer.render(&scene, &[gone], &renderer.options(false));
        assert!(out.is_empty());
    }

    #[test]
    fn render_is_deterministic() {
        let mut scene = Scene::new();
        let group = scene.spawn(ShapeCore::new(8.0, 8.0, Color::BLACK), Collection::new());
        scene
            .spawn_child(group, ShapeCore::new(8.0, 8.0, Color::CYAN), Circle::new(4.0, true))
            .unwrap();

        let renderer = Renderer::new(16, 16);
        let a = renderer.render(&scene, &[group], &renderer.options(true));
        let b = renderer.render(&scene, &[group], &renderer.options(true));
        assert_eq!(a, b);
    }

    // ── blending post-process ─────────────────────────────────────────────

    #[test]
    fn blend_composites_over_background() {
        let renderer = Renderer::new(8, 8).with_background(Color::new(0, 0, 100));
        let mut buf = PixelBuf::new();
        buf.push(1, 1, Color::WHITE.alpha(0.5));

        let out = renderer.blend(&buf);
        assert_eq!(out.len(), 1);
        let px = out.pixels()[0];
        assert_eq!(px.color.r, 128);
        assert_eq!(px.color.b, 178); // 127.5 white + 50 background remainder
    }
}
