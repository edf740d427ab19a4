// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-layer memoization of derived paint data.
//!
//! Entries are keyed by slot index and validated against the full
//! [`LayerId`] (so a recycled slot never serves its predecessor's data) and
//! the layer's version. A version mismatch replaces the entry, dropping the
//! stale paths and plans with it.

use std::collections::HashMap;
use std::sync::Arc;

use kurbo::BezPath;
use lamina_core::layer::{FrameChanges, LayerId};

use crate::backend::Paragraph;
use crate::compositor::PaintPlan;

/// Derived paint data of one layer.
#[derive(Clone, Debug, Default)]
pub struct LayerPaintData {
    /// Outline in layer space, when the layer has one.
    pub path: Option<Arc<BezPath>>,
    /// Compositor plan, for shapes and for text painted as outlines.
    pub plan: Option<Arc<PaintPlan>>,
    /// Laid-out paragraph of a text layer.
    pub paragraph: Option<Arc<Paragraph>>,
}

#[derive(Debug)]
struct Entry {
    layer: LayerId,
    version: u64,
    data: Arc<LayerPaintData>,
}

/// Version-keyed cache of [`LayerPaintData`].
#[derive(Debug, Default)]
pub struct PaintCache {
    entries: HashMap<u32, Entry>,
    hits: u32,
    misses: u32,
}

impl PaintCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached data when it was built for this exact layer and
    /// version.
    pub fn get(&mut self, layer: LayerId, version: u64) -> Option<Arc<LayerPaintData>> {
        let found = self
            .entries
            .get(&layer.index())
            .filter(|e| e.layer == layer && e.version == version)
            .map(|e| Arc::clone(&e.data));
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    /// Stores freshly built data, replacing any previous entry for the slot.
    pub fn insert(&mut self, layer: LayerId, version: u64, data: LayerPaintData) -> Arc<LayerPaintData> {
        self.misses += 1;
        let data = Arc::new(data);
        self.entries.insert(
            layer.index(),
            Entry {
                layer,
                version,
                data: Arc::clone(&data),
            },
        );
        data
    }

    /// Drops entries of layers removed from the store.
    pub fn prune(&mut self, changes: &FrameChanges) {
        for idx in &changes.removed {
            self.entries.remove(idx);
        }
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns and resets the hit and miss counters.
    pub fn take_counters(&mut self) -> (u32, u32) {
        let counters = (self.hits, self.misses);
        self.hits = 0;
        self.misses = 0;
        counters
    }
}

#[cfg(test)]
mod tests {
    use lamina_core::layer::{LayerKind, LayerStore};

    use super::*;

    #[test]
    fn version_mismatch_misses() {
        let mut store = LayerStore::new();
        let id = store.create_layer(LayerKind::Group);
        let mut cache = PaintCache::new();

        assert!(cache.get(id, 1).is_none());
        cache.insert(id, 1, LayerPaintData::default());
        assert!(cache.get(id, 1).is_some());
        assert!(cache.get(id, 2).is_none());
        assert_eq!(cache.take_counters(), (1, 1));
        assert_eq!(cache.take_counters(), (0, 0));
    }

    #[test]
    fn recycled_slot_misses() {
        let mut store = LayerStore::new();
        let old = store.create_layer(LayerKind::Group);
        let mut cache = PaintCache::new();
        cache.insert(old, 1, LayerPaintData::default());

        store.destroy_layer(old);
        let new = store.create_layer(LayerKind::Group);
        assert_eq!(new.index(), old.index());
        assert!(cache.get(new, 1).is_none());
    }

    #[test]
    fn prune_drops_removed_layers() {
        let mut store = LayerStore::new();
        let id = store.create_layer(LayerKind::Group);
        let mut cache = PaintCache::new();
        cache.insert(id, 1, LayerPaintData::default());

        store.destroy_layer(id);
        let changes = store.evaluate();
        cache.prune(&changes);
        assert!(cache.is_empty());
    }
}
