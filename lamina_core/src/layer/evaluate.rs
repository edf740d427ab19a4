// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame evaluation and change tracking.
//!
//! Evaluation follows a drain-recompute pattern for each dirty channel:
//!
//! 1. **TRANSFORM**: drain dirty indices, recompute each layer's
//!    `world_transform` as `parent_world * local_transform`.
//! 2. **GEOMETRY**: drain dirty indices and bump the version of each layer
//!    and of every shape group above it, since a group's combined outline
//!    is derived from its children.
//! 3. **STYLE**: drain dirty indices and bump versions.
//! 4. **FLAGS**: drain dirty indices (no recomputation).
//! 5. **TOPOLOGY**: drain and discard (the traversal order was already
//!    rebuilt at the start of evaluation if needed).
//!
//! [`FrameChanges`] uses raw slot indices (`u32`) rather than [`LayerId`]
//! handles, matching [`LayerId::index`].
//!
//! [`LayerId`]: super::LayerId
//! [`LayerId::index`]: super::LayerId::index

use kurbo::Affine;

use super::id::INVALID;
use super::kind::LayerKind;
use super::store::LayerStore;
use crate::dirty;

/// The set of changes produced by a single [`LayerStore::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Layers whose world transform was recomputed.
    pub transforms: Vec<u32>,
    /// Layers whose outline changed.
    pub geometry: Vec<u32>,
    /// Layers whose style changed.
    pub styles: Vec<u32>,
    /// Layers whose flags changed.
    pub flags: Vec<u32>,
    /// Layers added since the last evaluate.
    pub added: Vec<u32>,
    /// Layers removed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the tree topology changed (traversal order was rebuilt).
    pub topology_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.geometry.clear();
        self.styles.clear();
        self.flags.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Whether anything visible may have changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
            && self.geometry.is_empty()
            && self.styles.is_empty()
            && self.flags.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

impl LayerStore {
    /// Evaluates the layer tree, recomputing dirty properties and returning
    /// the set of changes.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        changes.clear();

        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        // -- TRANSFORM --
        let dirty_transforms: Vec<u32> = self
            .dirty
            .drain(dirty::TRANSFORM)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_transforms {
            let parent_idx = self.parent[idx as usize];
            let parent_world = if parent_idx != INVALID {
                self.world_transform[parent_idx as usize]
            } else {
                Affine::IDENTITY
            };
            self.world_transform[idx as usize] = parent_world * self.local_transform[idx as usize];
        }
        changes.transforms = dirty_transforms;

        // -- GEOMETRY --
        changes.geometry = self
            .dirty
            .drain(dirty::GEOMETRY)
            .deterministic()
            .run()
            .collect();
        for &idx in &changes.geometry {
            self.bump_version(idx);
            let mut p = self.parent[idx as usize];
            while p != INVALID && self.kind[p as usize] == LayerKind::ShapeGroup {
                self.bump_version(p);
                p = self.parent[p as usize];
            }
        }

        // -- STYLE --
        changes.styles = self
            .dirty
            .drain(dirty::STYLE)
            .deterministic()
            .run()
            .collect();
        for &idx in &changes.styles {
            self.bump_version(idx);
        }

        // -- FLAGS --
        changes.flags = self
            .dirty
            .drain(dirty::FLAGS)
            .deterministic()
            .run()
            .collect();

        // -- TOPOLOGY --
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Returns the current traversal order (depth-first pre-order).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called at least
    /// once.
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    fn bump_version(&mut self, idx: u32) {
        let version = self.next_version();
        self.version[idx as usize] = version;
    }

    /// Rebuilds the depth-first pre-order traversal of all live layers.
    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                self.dfs_collect(idx);
            }
        }
    }

    fn dfs_collect(&mut self, idx: u32) {
        self.traversal_order.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.dfs_collect(child);
            child = self.next_sibling[child as usize];
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;
    use crate::layer::LayerFlags;
    use crate::style::{Color, Fill, Style};

    fn near(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn evaluate_computes_world_transforms() {
        let mut store = LayerStore::new();
        let parent = store.create_layer(LayerKind::Group);
        let child = store.create_layer(LayerKind::Group);
        store.set_frame(parent, Rect::new(100.0, 50.0, 300.0, 250.0));
        store.set_frame(child, Rect::new(10.0, 20.0, 30.0, 40.0));
        store.add_child(parent, child);

        let _ = store.evaluate();

        let world = store.world_transform(child);
        assert!(near(world * Point::ZERO, Point::new(110.0, 70.0)));
        assert_eq!(store.world_bounds(child), Rect::new(110.0, 70.0, 130.0, 90.0));
    }

    #[test]
    fn moving_a_parent_updates_descendants() {
        let mut store = LayerStore::new();
        let parent = store.create_layer(LayerKind::Group);
        let child = store.create_layer(LayerKind::Group);
        store.set_frame(child, Rect::new(0.0, 0.0, 5.0, 5.0));
        store.add_child(parent, child);
        let _ = store.evaluate();

        store.set_frame(parent, Rect::new(40.0, 0.0, 50.0, 10.0));
        let changes = store.evaluate();
        assert!(changes.transforms.contains(&child.idx));
        assert!(near(store.world_transform(child) * Point::ZERO, Point::new(40.0, 0.0)));
    }

    #[test]
    fn no_change_evaluate_returns_empty() {
        let mut store = LayerStore::new();
        let _root = store.create_layer(LayerKind::Page);
        let _ = store.evaluate();

        let changes = store.evaluate();
        assert!(changes.is_empty());
    }

    #[test]
    fn traversal_order_is_depth_first() {
        let mut store = LayerStore::new();
        let a = store.create_layer(LayerKind::Page);
        let b = store.create_layer(LayerKind::Group);
        let c = store.create_layer(LayerKind::Group);
        let d = store.create_layer(LayerKind::Group);

        // Tree: a -> [b -> [d], c]
        store.add_child(a, b);
        store.add_child(a, c);
        store.add_child(b, d);

        let _ = store.evaluate();
        assert_eq!(store.traversal_order(), &[a.idx, b.idx, d.idx, c.idx]);
    }

    #[test]
    fn style_change_bumps_version() {
        let mut store = LayerStore::new();
        let id = store.create_layer(LayerKind::Group);
        let _ = store.evaluate();
        let before = store.version(id);

        store.set_style(
            id,
            Style {
                fills: vec![Fill::solid(Color::BLACK)],
                ..Style::default()
            },
        );
        let changes = store.evaluate();
        assert!(changes.styles.contains(&id.idx));
        assert!(store.version(id) > before);
    }

    #[test]
    fn flag_change_keeps_version() {
        let mut store = LayerStore::new();
        let id = store.create_layer(LayerKind::Group);
        let _ = store.evaluate();
        let before = store.version(id);

        store.set_flags(
            id,
            LayerFlags {
                visible: false,
                ..LayerFlags::DEFAULT
            },
        );
        let changes = store.evaluate();
        assert!(changes.flags.contains(&id.idx));
        assert_eq!(store.version(id), before);
    }

    #[test]
    fn child_geometry_bumps_shape_group_version() {
        let mut store = LayerStore::new();
        let group = store.create_layer(LayerKind::ShapeGroup);
        let part = store.create_layer(LayerKind::Group);
        store.add_child(group, part);
        let _ = store.evaluate();
        let before = store.version(group);

        store.set_frame(part, Rect::new(5.0, 5.0, 10.0, 10.0));
        let _ = store.evaluate();
        assert!(store.version(group) > before);
    }

    #[test]
    fn added_and_removed_are_reported_once() {
        let mut store = LayerStore::new();
        let id = store.create_layer(LayerKind::Group);
        let changes = store.evaluate();
        assert_eq!(changes.added, vec![id.idx]);

        store.destroy_layer(id);
        let changes = store.evaluate();
        assert_eq!(changes.removed, vec![id.idx]);
        assert!(store.evaluate().removed.is_empty());
    }
}
