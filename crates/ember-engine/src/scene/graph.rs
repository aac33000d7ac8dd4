use thiserror::Error;

use crate::coords::Vec2;
use crate::raster::PixelBuf;
use crate::render::DrawOptions;
use crate::scene::shape::ShapeCore;
use crate::scene::shapes::{self, ShapeKind};

/// Stable handle to a shape in a [`Scene`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShapeId(usize);

#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum SceneError {
    #[error("shape {0:?} is not in the scene")]
    UnknownShape(ShapeId),
    #[error("shape {0:?} is not a collection")]
    NotACollection(ShapeId),
    #[error("shape {0:?} is already attached to a collection")]
    AlreadyAttached(ShapeId),
    #[error("attaching {0:?} would create a cycle")]
    WouldCycle(ShapeId),
}

/// One arena slot: transform/paint state plus variant geometry.
#[derive(Debug, Clone)]
pub struct ShapeNode {
    pub core: ShapeCore,
    pub kind: ShapeKind,
}

/// Arena of shapes forming one or more trees.
///
/// Responsibilities:
/// - own every shape; collections own their subtree (removing a collection
///   removes all descendants and their colliders)
/// - hold the parent back-references the transform composition walks
/// - dispatch drawing and collision queries
///
/// Handles stay valid until their shape is removed; slots are not reused,
/// so a stale handle reads as absent instead of aliasing a new shape.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Option<ShapeNode>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live shapes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.node(id).is_some()
    }

    // ── construction ──────────────────────────────────────────────────────

    /// Adds a shape with no parent and returns its handle.
    ///
    /// Position-relative geometry (polygon vertex offsets) is resolved
    /// against the core's position here, once.
    pub fn spawn(&mut self, core: ShapeCore, kind: impl Into<ShapeKind>) -> ShapeId {
        let mut kind = kind.into();
        kind.bind(core.position());

        let id = ShapeId(self.nodes.len());
        self.nodes.push(Some(ShapeNode { core, kind }));
        id
    }

    /// Puts `child` under `parent`.
    ///
    /// `parent` must be a collection and `child` must not already have a
    /// parent; re-parenting at runtime is not supported.
    pub fn attach(&mut self, parent: ShapeId, child: ShapeId) -> Result<(), SceneError> {
        if !self.contains(child) {
            return Err(SceneError::UnknownShape(child));
        }
        match self.node(parent) {
            None => return Err(SceneError::UnknownShape(parent)),
            Some(node) => {
                if !matches!(node.kind, ShapeKind::Collection(_)) {
                    return Err(SceneError::NotACollection(parent));
                }
            }
        }
        if self.node(child).is_some_and(|n| n.core.parent().is_some()) {
            return Err(SceneError::AlreadyAttached(child));
        }

        // Walking up from the parent must never reach the child.
        let mut cursor = Some(parent);
        while let Some(c) = cursor {
            if c == child {
                return Err(SceneError::WouldCycle(child));
            }
            cursor = self.node(c).and_then(|n| n.core.parent());
        }

        if let Some(ShapeNode { kind: ShapeKind::Collection(c), .. }) = self.node_mut(parent) {
            c.push_child(child);
        }
        if let Some(node) = self.node_mut(child) {
            node.core.set_parent(Some(parent));
        }
        Ok(())
    }

    /// Spawns a shape directly under `parent`.
    pub fn spawn_child(
        &mut self,
        parent: ShapeId,
        core: ShapeCore,
        kind: impl Into<ShapeKind>,
    ) -> Result<ShapeId, SceneError> {
        let id = self.spawn(core, kind);
        if let Err(e) = self.attach(parent, id) {
            self.nodes[id.0] = None;
            return Err(e);
        }
        Ok(id)
    }

    /// Removes a shape and its whole subtree; their handles become stale.
    ///
    /// Returns false when the handle is already gone.
    pub fn remove(&mut self, id: ShapeId) -> bool {
        if !self.contains(id) {
            log::debug!("remove: {id:?} is not in the scene");
            return false;
        }

        let parent = self.node(id).and_then(|n| n.core.parent());
        if let Some(parent) = parent
            && let Some(ShapeNode { kind: ShapeKind::Collection(c), .. }) = self.node_mut(parent)
        {
            c.remove_child(id);
        }

        self.remove_subtree(id);
        true
    }

    fn remove_subtree(&mut self, id: ShapeId) {
        if let Some(node) = self.nodes[id.0].take()
            && let ShapeKind::Collection(collection) = node.kind
        {
            for &child in collection.children() {
                self.remove_subtree(child);
            }
        }
    }

    // ── access ────────────────────────────────────────────────────────────

    pub fn node(&self, id: ShapeId) -> Option<&ShapeNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: ShapeId) -> Option<&mut ShapeNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn core(&self, id: ShapeId) -> Option<&ShapeCore> {
        self.node(id).map(|n| &n.core)
    }

    pub fn core_mut(&mut self, id: ShapeId) -> Option<&mut ShapeCore> {
        self.node_mut(id).map(|n| &mut n.core)
    }

    pub fn kind(&self, id: ShapeId) -> Option<&ShapeKind> {
        self.node(id).map(|n| &n.kind)
    }

    // ── collision ─────────────────────────────────────────────────────────

    /// Attaches the variant's default collider to the shape.
    pub fn add_collider(&mut self, id: ShapeId) -> Result<(), SceneError> {
        let node = self.node(id).ok_or(SceneError::UnknownShape(id))?;
        let collider = node.kind.default_collider(&node.core);
        if let Some(node) = self.node_mut(id) {
            node.core.set_collider(collider);
        }
        Ok(())
    }

    /// True when both shapes carry colliders and those intersect.
    ///
    /// A missing shape or missing collider is a legitimate silent state,
    /// not an error.
    pub fn intersects(&self, a: ShapeId, b: ShapeId) -> bool {
        match (
            self.core(a).and_then(ShapeCore::collider),
            self.core(b).and_then(ShapeCore::collider),
        ) {
            (Some(ca), Some(cb)) => ca.intersects(cb),
            _ => false,
        }
    }

    // ── transform composition ─────────────────────────────────────────────

    /// Applies the shape's own transform, then every ancestor's, innermost
    /// first. No rounding; see [`Scene::transformed_position`].
    pub fn transform_point(&self, id: ShapeId, p: Vec2) -> Vec2 {
        let Some(node) = self.node(id) else {
            return p;
        };
        let q = node.core.local_transform(p);
        match node.core.parent() {
            Some(parent) => self.transform_point(parent, q),
            None => q,
        }
    }

    /// Absolute pixel position of a shape-local point, rounded to nearest
    /// once after the full ancestor chain.
    pub fn transformed_position(&self, id: ShapeId, x: f32, y: f32) -> Option<(i32, i32)> {
        if !self.contains(id) {
            return None;
        }
        Some(self.transform_point(id, Vec2::new(x, y)).round_to_pixel())
    }

    #[inline]
    pub(crate) fn transformed_pixel(&self, id: ShapeId, p: Vec2) -> (i32, i32) {
        self.transform_point(id, p).round_to_pixel()
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Rasterizes one shape (collections: the whole subtree).
    pub fn draw(&self, id: ShapeId, options: &DrawOptions) -> PixelBuf {
        let mut out = PixelBuf::new();
        self.draw_into(id, options, &mut out);
        out
    }

    pub(crate) fn draw_into(&self, id: ShapeId, options: &DrawOptions, out: &mut PixelBuf) {
        let Some(node) = self.node(id) else {
            return;
        };
        shapes::draw(self, id, &node.core, &node.kind, options, out);
    }
}
