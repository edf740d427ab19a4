// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Lamina uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! propagate invalidation through the layer tree. Each channel represents an
//! independent category of change.
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`TRANSFORM`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and has dependency edges
//!   from child to parent. Moving, rotating or flipping a layer marks every
//!   descendant, since world transforms are inherited.
//!
//! - **Local-only**: [`GEOMETRY`], [`STYLE`] and [`FLAGS`] are marked with the
//!   default policy. Geometry and style changes bump the layer's version, the
//!   key under which derived paths and paint plans are cached. Flag changes
//!   (visibility, locking, masking) only affect how the tree is walked.
//!
//! - **Structural**: [`TOPOLOGY`] is marked on topology mutations and
//!   triggers a traversal-order rebuild during evaluation.
//!
//! # Consumption
//!
//! Each [`LayerStore::evaluate`](crate::layer::LayerStore::evaluate) call
//! drains all channels and surfaces the results as
//! [`FrameChanges`](crate::layer::FrameChanges).

use understory_dirty::Channel;

/// Frame position, rotation or flip changed; world transforms of the layer
/// and its descendants need recomputation.
pub const TRANSFORM: Channel = Channel::new(0);

/// Outline changed (frame size, points, boolean operation, children of a
/// shape group).
pub const GEOMETRY: Channel = Channel::new(1);

/// Fills, borders, shadows, blur or context settings changed.
pub const STYLE: Channel = Channel::new(2);

/// Visibility, lock or mask flags changed.
pub const FLAGS: Channel = Channel::new(3);

/// Tree topology changed; triggers traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(4);
