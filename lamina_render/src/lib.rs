// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint compositing and scene rendering for `lamina_core` layer trees.
//!
//! `lamina_render` turns a loaded page into calls on an abstract 2D
//! [`Canvas`](backend::Canvas). It owns no GPU state: stroking, boolean path
//! operations, images and text layout are backend services reached through
//! the traits in [`backend`], bundled per pass in a
//! [`RenderContext`](backend::RenderContext).
//!
//! ```text
//!   LayerStore ──► SceneRenderer::render ──► Canvas calls
//!                        │
//!                        ├── PaintCache (per layer version)
//!                        │      └── PaintPlan::build ── shadow_path, paints
//!                        └── mask chains, save_layer, board clips
//! ```
//!
//! **[`scene`]**: Depth-first traversal with the mask-chain rule and
//! layer-level opacity, blend and blur.
//!
//! **[`compositor`]**, **[`shadow`]** and **[`paint`]**: Paint plans in the
//! fixed order outer shadows, fills, inner shadows, borders; the derived
//! shadow silhouette; fill, border and shadow paints.
//!
//! **[`text`]**: Direct paragraph drawing, or compositing on glyph outlines
//! when the style needs it.
//!
//! **[`cache`]**: Version-keyed memoization of paths, plans and paragraphs.
//!
//! **[`record`]**: A recording canvas for tests and diagnostics.
//!
//! # Errors
//!
//! Backend failures surface as [`RenderError`] and abort the pass. Anything
//! wrong with the document itself (a shape with too few points, an
//! unsupported blur, a missing image) is logged through `log`, reported to
//! the trace sink, and skipped.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Forwards to `lamina_core/trace`.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod backend;
pub mod cache;
pub mod compositor;
mod error;
pub mod paint;
pub mod record;
pub mod scene;
pub mod shadow;
pub mod text;

#[cfg(test)]
mod testing;

pub use error::RenderError;
pub use scene::SceneRenderer;
