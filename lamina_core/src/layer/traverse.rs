// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, LayerId};
use super::store::LayerStore;

/// An iterator over the direct children of a layer, bottom to top.
///
/// Created by [`LayerStore::children`]. Reversing it walks top to bottom,
/// which is the order hit-testing wants.
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a LayerStore,
    front: u32,
    back: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a LayerStore, first: u32) -> Self {
        let mut back = first;
        if back != INVALID {
            while store.next_sibling[back as usize] != INVALID {
                back = store.next_sibling[back as usize];
            }
        }
        Self {
            store,
            front: first,
            back,
        }
    }

    fn handle(&self, idx: u32) -> LayerId {
        LayerId {
            idx,
            generation: self.store.generation[idx as usize],
        }
    }

    fn finish(&mut self) {
        self.front = INVALID;
        self.back = INVALID;
    }
}

impl Iterator for Children<'_> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.front == INVALID {
            return None;
        }
        let idx = self.front;
        if idx == self.back {
            self.finish();
        } else {
            self.front = self.store.next_sibling[idx as usize];
        }
        Some(self.handle(idx))
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<LayerId> {
        if self.back == INVALID {
            return None;
        }
        let idx = self.back;
        if idx == self.front {
            self.finish();
        } else {
            self.back = self.store.prev_sibling[idx as usize];
        }
        Some(self.handle(idx))
    }
}
