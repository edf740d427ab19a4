// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree data model.
//!
//! A *layer* is a node in the document's scene graph. Each layer has:
//!
//! - An identity ([`LayerId`]): a generational handle that becomes stale when
//!   the layer is destroyed.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//!   Children are stored bottom to top.
//! - **Local properties** set by the loader or an editor: kind, frame,
//!   rotation, flags, style and boolean operation.
//! - **Computed properties** produced by [`evaluate`](LayerStore::evaluate):
//!   `world_transform` (product of ancestor local transforms) and the layer
//!   version used as a cache key.
//!
//! Layers are stored in struct-of-arrays layout with index-based handles.
//!
//! # Dirty tracking
//!
//! Property mutations automatically mark the corresponding dirty channel
//! (see [`dirty`](crate::dirty)).

mod evaluate;
mod id;
mod kind;
mod load;
mod store;
mod traverse;

pub use evaluate::FrameChanges;
pub use id::{INVALID, LayerId};
pub use kind::{Background, BooleanOp, LayerKind, ShapeOutline, TextAlignment, TextContent};
pub use store::{LayerFlags, LayerStore};
pub use traverse::Children;
