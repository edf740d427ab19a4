// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry, layer tree and interaction core for rendering design documents.
//!
//! `lamina_core` turns a parsed design document (pages of artboards, shapes,
//! text, groups and symbols) into an arena of layers with world transforms,
//! synthesizes vector outlines from curve points, and resolves pointer input
//! against the tree. Drawing lives in `lamina_render`, which consumes the
//! types defined here.
//!
//! # Architecture
//!
//! ```text
//!   DocumentProvider ──► PageModel ──► LayerStore::load_page
//!                                            │
//!         setters mark dirty channels        ▼
//!   ─────────────────────────────────► LayerStore::evaluate ──► FrameChanges
//!                                            │
//!                   ┌────────────────────────┴──────────────┐
//!                   ▼                                       ▼
//!      world transforms, versions                 hit_test / PointerController
//!      (read by the renderer)                     (read by Session::tick)
//!
//!   InputQueue ──► Session::tick ──► RenderScheduler::poll ──► FrameRequest
//! ```
//!
//! **[`layer`]**: Struct-of-arrays layer tree with generational handles.
//! Frames, rotation, flags and styles are set by the loader; world
//! transforms and per-layer versions are computed by evaluation.
//!
//! **[`dirty`]**: Multi-channel dirty tracking via `understory_dirty`.
//! TRANSFORM propagates to descendants; GEOMETRY, STYLE and FLAGS are local;
//! TOPOLOGY triggers a traversal rebuild.
//!
//! **[`curve`]** and **[`path`]**: Curve points scaled to a frame, and the
//! builder that turns them into a [`kurbo::BezPath`] with rounded corners.
//!
//! **[`style`]**: Fills, borders, shadows, blur and context settings.
//!
//! **[`hit`]**, **[`selection`]** and **[`controller`]**: Shallow and deep
//! hit-testing, the selection box with its resize handles, and the pointer
//! state machine that ties them together.
//!
//! **[`viewport`]**, **[`input`]**, **[`schedule`]** and **[`session`]**:
//! Pan and zoom, the host event queue, frame coalescing, and the per-tick
//! driver.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types with
//! a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod controller;
pub mod curve;
pub mod dirty;
pub mod document;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod layer;
pub mod path;
pub mod schedule;
pub mod selection;
pub mod session;
pub mod style;
pub mod time;
pub mod trace;
pub mod transform;
pub mod viewport;
