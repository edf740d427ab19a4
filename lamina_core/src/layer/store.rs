// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with allocation, topology, and property management.

use kurbo::{Affine, Rect};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{INVALID, LayerId};
use super::kind::{BooleanOp, LayerKind};
use super::traverse::Children;
use crate::dirty;
use crate::geometry::{local_bounds, transformed_bounds};
use crate::style::Style;
use crate::transform::Transform;

/// Per-layer boolean flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerFlags {
    /// Whether the layer is drawn. Hidden layers are also not hit-testable.
    pub visible: bool,
    /// Locked layers are drawn but ignore the pointer.
    pub locked: bool,
    /// The layer clips the siblings above it.
    pub clipping_mask: bool,
    /// The layer ends the mask chain started by a sibling below it.
    pub break_mask_chain: bool,
    /// Mirrored along the vertical axis.
    pub flipped_horizontal: bool,
    /// Mirrored along the horizontal axis.
    pub flipped_vertical: bool,
}

impl LayerFlags {
    /// Visible, unlocked, not a mask, not flipped.
    pub const DEFAULT: Self = Self {
        visible: true,
        locked: false,
        clipping_mask: false,
        break_mask_chain: false,
        flipped_horizontal: false,
        flipped_vertical: false,
    };

    /// Visible and not locked.
    #[inline]
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.visible && !self.locked
    }
}

impl Default for LayerFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Struct-of-arrays storage for all layers.
///
/// Layers are addressed by [`LayerId`] handles. Internally, each layer occupies
/// a slot in parallel arrays. Destroyed layers are recycled via a free list,
/// and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct LayerStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) kind: Vec<LayerKind>,
    pub(crate) name: Vec<String>,
    pub(crate) frame: Vec<Rect>,
    pub(crate) rotation: Vec<f64>,
    pub(crate) flags: Vec<LayerFlags>,
    pub(crate) style: Vec<Style>,
    pub(crate) boolean_op: Vec<BooleanOp>,
    pub(crate) local_transform: Vec<Affine>,

    // -- Computed properties (written by evaluate) --
    pub(crate) world_transform: Vec<Affine>,
    pub(crate) version: Vec<u64>,
    pub(crate) version_clock: u64,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    /// Creates an empty layer store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            kind: Vec::new(),
            name: Vec::new(),
            frame: Vec::new(),
            rotation: Vec::new(),
            flags: Vec::new(),
            style: Vec::new(),
            boolean_op: Vec::new(),
            local_transform: Vec::new(),
            world_transform: Vec::new(),
            version: Vec::new(),
            version_clock: 0,
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new detached layer of the given kind and returns its handle.
    ///
    /// The layer starts with an empty frame, default flags, default style and
    /// a fresh version.
    pub fn create_layer(&mut self, kind: LayerKind) -> LayerId {
        let version = self.next_version();
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.kind[i] = kind;
            self.name[i].clear();
            self.frame[i] = Rect::ZERO;
            self.rotation[i] = 0.0;
            self.flags[i] = LayerFlags::DEFAULT;
            self.style[i] = Style::default();
            self.boolean_op[i] = BooleanOp::None;
            self.local_transform[i] = Affine::IDENTITY;
            self.world_transform[i] = Affine::IDENTITY;
            self.version[i] = version;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.kind.push(kind);
            self.name.push(String::new());
            self.frame.push(Rect::ZERO);
            self.rotation.push(0.0);
            self.flags.push(LayerFlags::DEFAULT);
            self.style.push(Style::default());
            self.boolean_op.push(BooleanOp::None);
            self.local_transform.push(Affine::IDENTITY);
            self.world_transform.push(Affine::IDENTITY);
            self.version.push(version);
            self.generation.push(0);
            idx
        };

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a layer, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the layer has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_layer(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy layer with children"
        );

        if self.parent[idx as usize] != INVALID {
            let p = self.parent[idx as usize];
            self.unlink_from_parent(idx);
            self.dirty.mark(p, dirty::GEOMETRY);
            self.dirty.mark(p, dirty::TOPOLOGY);
        }

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.traversal_dirty = true;
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Destroys `root` and every layer below it, children first.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_subtree(&mut self, root: LayerId) {
        self.validate(root);
        let children: Vec<LayerId> = self.children(root).collect();
        for child in children {
            self.destroy_subtree(child);
        }
        self.destroy_layer(root);
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Number of live layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology API --

    /// Adds `child` as the last (topmost) child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: LayerId, child: LayerId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        self.attach_dependencies(c, p);
    }

    /// Inserts `child` before (below) `sibling` in the sibling list.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, or `sibling`
    /// has no parent.
    pub fn insert_before(&mut self, child: LayerId, sibling: LayerId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;

        self.attach_dependencies(c, p);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the layer has no parent.
    pub fn remove_from_parent(&mut self, child: LayerId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "layer has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);
        self.dirty.remove_dependency(c, p, dirty::TRANSFORM);

        self.dirty.mark_with(c, dirty::TRANSFORM, &EagerPolicy);
        self.dirty.mark(p, dirty::GEOMETRY);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Returns the parent of a layer, if any.
    #[must_use]
    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.validate(id);
        self.handle(self.parent[id.idx as usize])
    }

    /// Returns an iterator over the direct children of a layer, bottom to top.
    #[must_use]
    pub fn children(&self, id: LayerId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns whether the layer has no children.
    #[must_use]
    pub fn is_leaf(&self, id: LayerId) -> bool {
        self.validate(id);
        self.first_child[id.idx as usize] == INVALID
    }

    /// Returns the root layers (those with no parent).
    #[must_use]
    pub fn roots(&self) -> Vec<LayerId> {
        (0..self.len)
            .filter(|&idx| self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx))
            .filter_map(|idx| self.handle(idx))
            .collect()
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the kind of a layer.
    #[must_use]
    pub fn kind(&self, id: LayerId) -> &LayerKind {
        self.validate(id);
        &self.kind[id.idx as usize]
    }

    /// Returns the display name of a layer.
    #[must_use]
    pub fn name(&self, id: LayerId) -> &str {
        self.validate(id);
        &self.name[id.idx as usize]
    }

    /// Returns the frame of a layer in its parent's space.
    #[must_use]
    pub fn frame(&self, id: LayerId) -> Rect {
        self.validate(id);
        self.frame[id.idx as usize]
    }

    /// Returns the rotation of a layer in degrees.
    #[must_use]
    pub fn rotation(&self, id: LayerId) -> f64 {
        self.validate(id);
        self.rotation[id.idx as usize]
    }

    /// Returns the flags of a layer.
    #[must_use]
    pub fn flags(&self, id: LayerId) -> LayerFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns the style of a layer.
    #[must_use]
    pub fn style(&self, id: LayerId) -> &Style {
        self.validate(id);
        &self.style[id.idx as usize]
    }

    /// Returns the boolean operation of a layer.
    #[must_use]
    pub fn boolean_op(&self, id: LayerId) -> BooleanOp {
        self.validate(id);
        self.boolean_op[id.idx as usize]
    }

    /// Returns the local matrix of a layer, derived from frame, rotation and
    /// flips.
    #[must_use]
    pub fn local_transform(&self, id: LayerId) -> Affine {
        self.validate(id);
        self.local_transform[id.idx as usize]
    }

    /// Returns the computed world transform of a layer.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_transform(&self, id: LayerId) -> Affine {
        self.validate(id);
        self.world_transform[id.idx as usize]
    }

    /// Returns the axis-aligned world-space bounds of a layer's frame.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_bounds(&self, id: LayerId) -> Rect {
        self.validate(id);
        let i = id.idx as usize;
        transformed_bounds(self.world_transform[i], local_bounds(self.frame[i]))
    }

    /// Returns the version of a layer.
    ///
    /// The version changes whenever the layer's outline or style changes,
    /// and whenever a child of a shape group changes its outline. It is the
    /// cache key for anything derived from those.
    #[must_use]
    pub fn version(&self, id: LayerId) -> u64 {
        self.validate(id);
        self.version[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the kind (and payload) of a layer.
    pub fn set_kind(&mut self, id: LayerId, kind: LayerKind) {
        self.validate(id);
        self.kind[id.idx as usize] = kind;
        self.dirty.mark(id.idx, dirty::GEOMETRY);
    }

    /// Sets the display name of a layer. Names never affect rendering.
    pub fn set_name(&mut self, id: LayerId, name: impl Into<String>) {
        self.validate(id);
        self.name[id.idx as usize] = name.into();
    }

    /// Sets the frame of a layer.
    ///
    /// Marks TRANSFORM with eager propagation to descendants, and GEOMETRY.
    pub fn set_frame(&mut self, id: LayerId, frame: Rect) {
        self.validate(id);
        self.frame[id.idx as usize] = frame;
        self.refresh_local_transform(id.idx);
    }

    /// Sets the rotation of a layer in degrees.
    pub fn set_rotation(&mut self, id: LayerId, degrees: f64) {
        self.validate(id);
        self.rotation[id.idx as usize] = degrees;
        self.refresh_local_transform(id.idx);
    }

    /// Sets the flags of a layer.
    ///
    /// Flip changes are transform changes; everything else only marks FLAGS.
    pub fn set_flags(&mut self, id: LayerId, flags: LayerFlags) {
        self.validate(id);
        let old = self.flags[id.idx as usize];
        self.flags[id.idx as usize] = flags;
        self.dirty.mark(id.idx, dirty::FLAGS);
        if old.flipped_horizontal != flags.flipped_horizontal
            || old.flipped_vertical != flags.flipped_vertical
        {
            self.refresh_local_transform(id.idx);
        }
    }

    /// Sets the style of a layer.
    pub fn set_style(&mut self, id: LayerId, style: Style) {
        self.validate(id);
        self.style[id.idx as usize] = style;
        self.dirty.mark(id.idx, dirty::STYLE);
    }

    /// Sets the boolean operation of a layer.
    pub fn set_boolean_op(&mut self, id: LayerId, op: BooleanOp) {
        self.validate(id);
        self.boolean_op[id.idx as usize] = op;
        self.dirty.mark(id.idx, dirty::GEOMETRY);
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: LayerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds the current handle for a raw slot, `None` for [`INVALID`].
    pub(crate) fn handle(&self, idx: u32) -> Option<LayerId> {
        (idx != INVALID).then(|| LayerId {
            idx,
            generation: self.generation[idx as usize],
        })
    }

    pub(crate) fn next_version(&mut self) -> u64 {
        self.version_clock += 1;
        self.version_clock
    }

    fn refresh_local_transform(&mut self, idx: u32) {
        let i = idx as usize;
        let flags = self.flags[i];
        self.local_transform[i] = Transform::for_frame(
            self.frame[i],
            flags.flipped_horizontal,
            flags.flipped_vertical,
            self.rotation[i],
        )
        .local_matrix();
        self.dirty.mark_with(idx, dirty::TRANSFORM, &EagerPolicy);
        self.dirty.mark(idx, dirty::GEOMETRY);
    }

    /// Wires a freshly linked child into dirty tracking.
    fn attach_dependencies(&mut self, c: u32, p: u32) {
        let _ = self.dirty.add_dependency(c, p, dirty::TRANSFORM);
        self.dirty.mark_with(c, dirty::TRANSFORM, &EagerPolicy);
        self.dirty.mark(c, dirty::GEOMETRY);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = LayerStore::new();
        let id = store.create_layer(LayerKind::Group);
        assert!(store.is_alive(id));
        assert_eq!(store.layer_count(), 1);
        store.destroy_layer(id);
        assert!(!store.is_alive(id));
        assert_eq!(store.layer_count(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = LayerStore::new();
        let id1 = store.create_layer(LayerKind::Group);
        store.destroy_layer(id1);
        let id2 = store.create_layer(LayerKind::ShapeGroup);
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
        assert_eq!(store.kind(id2), &LayerKind::ShapeGroup);
    }

    #[test]
    fn add_child_and_query() {
        let mut store = LayerStore::new();
        let parent = store.create_layer(LayerKind::Group);
        let child1 = store.create_layer(LayerKind::Group);
        let child2 = store.create_layer(LayerKind::Group);

        store.add_child(parent, child1);
        store.add_child(parent, child2);

        assert_eq!(store.parent(child1), Some(parent));
        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![child1, child2]);
        assert!(store.is_leaf(child1));
        assert!(!store.is_leaf(parent));
    }

    #[test]
    fn insert_before_works() {
        let mut store = LayerStore::new();
        let parent = store.create_layer(LayerKind::Group);
        let a = store.create_layer(LayerKind::Group);
        let b = store.create_layer(LayerKind::Group);
        let c = store.create_layer(LayerKind::Group);

        store.add_child(parent, a);
        store.add_child(parent, c);
        store.insert_before(b, c);

        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![a, b, c]);
    }

    #[test]
    fn remove_from_parent_works() {
        let mut store = LayerStore::new();
        let parent = store.create_layer(LayerKind::Group);
        let child = store.create_layer(LayerKind::Group);

        store.add_child(parent, child);
        store.remove_from_parent(child);
        assert_eq!(store.parent(child), None);
        assert!(store.children(parent).next().is_none());
    }

    #[test]
    fn destroy_subtree_frees_everything() {
        let mut store = LayerStore::new();
        let root = store.create_layer(LayerKind::Page);
        let group = store.create_layer(LayerKind::Group);
        let leaf = store.create_layer(LayerKind::Group);
        store.add_child(root, group);
        store.add_child(group, leaf);

        store.destroy_subtree(root);
        assert_eq!(store.layer_count(), 0);
        assert!(!store.is_alive(leaf));
    }

    #[test]
    fn roots_returns_parentless_layers() {
        let mut store = LayerStore::new();
        let a = store.create_layer(LayerKind::Page);
        let b = store.create_layer(LayerKind::Page);
        let c = store.create_layer(LayerKind::Group);
        store.add_child(a, c);

        let roots = store.roots();
        assert!(roots.contains(&a));
        assert!(roots.contains(&b));
        assert!(!roots.contains(&c));
    }

    #[test]
    #[should_panic(expected = "cannot destroy layer with children")]
    fn destroy_with_children_panics() {
        let mut store = LayerStore::new();
        let parent = store.create_layer(LayerKind::Group);
        let child = store.create_layer(LayerKind::Group);
        store.add_child(parent, child);
        store.destroy_layer(parent);
    }

    #[test]
    #[should_panic(expected = "stale LayerId")]
    fn destroyed_handle_panics_on_get_frame() {
        let mut store = LayerStore::new();
        let id = store.create_layer(LayerKind::Group);
        store.destroy_layer(id);
        let _ = store.frame(id);
    }

    #[test]
    #[should_panic(expected = "stale LayerId")]
    fn destroyed_handle_panics_on_set_style() {
        let mut store = LayerStore::new();
        let id = store.create_layer(LayerKind::Group);
        store.destroy_layer(id);
        store.set_style(id, Style::default());
    }

    #[test]
    fn set_frame_updates_local_transform() {
        let mut store = LayerStore::new();
        let id = store.create_layer(LayerKind::Group);
        store.set_frame(id, Rect::new(10.0, 20.0, 30.0, 60.0));
        assert_eq!(
            store.local_transform(id) * kurbo::Point::ZERO,
            kurbo::Point::new(10.0, 20.0)
        );
    }

    #[test]
    fn flipping_refreshes_local_transform() {
        let mut store = LayerStore::new();
        let id = store.create_layer(LayerKind::Group);
        store.set_frame(id, Rect::new(0.0, 0.0, 10.0, 10.0));
        let before = store.local_transform(id);
        store.set_flags(
            id,
            LayerFlags {
                flipped_horizontal: true,
                ..LayerFlags::DEFAULT
            },
        );
        assert_ne!(store.local_transform(id), before);
    }

    #[test]
    fn interactive_flags() {
        assert!(LayerFlags::DEFAULT.is_interactive());
        let locked = LayerFlags {
            locked: true,
            ..LayerFlags::DEFAULT
        };
        assert!(!locked.is_interactive());
        let hidden = LayerFlags {
            visible: false,
            ..LayerFlags::DEFAULT
        };
        assert!(!hidden.is_interactive());
    }
}
