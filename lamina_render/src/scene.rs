// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene rendering.
//!
//! [`SceneRenderer::render`] walks a loaded page depth-first, bottom to top,
//! and issues canvas calls for every visible layer:
//!
//! ```text
//! clear(background)
//! save, concat(viewport)
//!   for each child of the page (mask chain):
//!     save, concat(local)
//!       [save_layer(opacity, blend, blur)]
//!         content by kind (paint plan, paragraph, board, children)
//!       [restore]
//!     restore
//! restore
//! flush
//! ```
//!
//! # Mask chains
//!
//! A sibling flagged as clipping mask clips every sibling drawn after it
//! until another mask starts a new chain, a sibling breaks the chain, or
//! the sibling list ends. The clip is pushed with an extra `save` that is
//! not tied to the mask's own `save/restore`, and is popped when the chain
//! ends. Chains are closed on every exit path, including errors, so the
//! canvas stack is always balanced after a pass.

use std::sync::Arc;

use kurbo::{BezPath, Size};
use lamina_core::curve::resolve_points;
use lamina_core::geometry::local_bounds;
use lamina_core::layer::{BooleanOp, FrameChanges, LayerId, LayerKind, LayerStore, TextContent};
use lamina_core::path::build_path;
use lamina_core::style::{BlurKind, Style};
use lamina_core::trace::{RenderBeginEvent, RenderSummary, SkipReason};
use lamina_core::viewport::Viewport;

use crate::RenderError;
use crate::backend::{Canvas, ClipOp, LayerPaint, PathOp, RenderContext};
use crate::cache::{LayerPaintData, PaintCache};
use crate::compositor::{PaintPlan, report_skip};
use crate::paint::{Paint, blur_sigma};
use crate::text::{build_text, paint_text};

/// Maps a shape group child's boolean operation to a path operation.
#[must_use]
pub const fn path_op(op: BooleanOp) -> PathOp {
    match op {
        BooleanOp::None | BooleanOp::Union => PathOp::Union,
        BooleanOp::Subtract => PathOp::Difference,
        BooleanOp::Intersect => PathOp::Intersect,
        BooleanOp::Difference => PathOp::Xor,
    }
}

/// Renders pages of a [`LayerStore`] onto a [`Canvas`].
///
/// Holds the paint cache between passes. One renderer per view.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    cache: PaintCache,
    frame_index: u64,
}

impl SceneRenderer {
    /// Creates a renderer with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The paint cache.
    #[must_use]
    pub fn cache(&self) -> &PaintCache {
        &self.cache
    }

    /// Drops cache entries of removed layers.
    pub fn apply_changes(&mut self, changes: &FrameChanges) {
        self.cache.prune(changes);
    }

    /// Drops the whole cache, e.g. after loading another page.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of passes rendered so far.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Renders `page` as seen through `viewport`.
    ///
    /// Backend failures abort the pass after the canvas stack was unwound.
    pub fn render(
        &mut self,
        store: &LayerStore,
        page: LayerId,
        viewport: &Viewport,
        canvas: &mut dyn Canvas,
        ctx: &mut RenderContext<'_>,
    ) -> Result<RenderSummary, RenderError> {
        self.frame_index += 1;
        ctx.tracer.render_begin(&RenderBeginEvent {
            frame_index: self.frame_index,
            layer_count: store.layer_count(),
        });

        let mut pass = Pass {
            store,
            cache: &mut self.cache,
            summary: RenderSummary {
                frame_index: self.frame_index,
                ..RenderSummary::default()
            },
        };

        canvas.clear(viewport.config().background);
        canvas.save();
        canvas.concat(viewport.matrix());
        let result = pass.render_children(page, canvas, ctx);
        canvas.restore();
        result?;
        canvas.flush()?;

        let mut summary = pass.summary;
        (summary.cache_hits, summary.cache_misses) = self.cache.take_counters();
        log::trace!(
            "frame {}: {} drawn, {} skipped, {} steps",
            summary.frame_index,
            summary.layers_drawn,
            summary.layers_skipped,
            summary.paint_steps
        );
        ctx.tracer.render_summary(&summary);
        Ok(summary)
    }
}

/// State of one render pass.
struct Pass<'a> {
    store: &'a LayerStore,
    cache: &'a mut PaintCache,
    summary: RenderSummary,
}

impl Pass<'_> {
    /// Renders the children of `parent` applying the mask-chain rule.
    fn render_children(
        &mut self,
        parent: LayerId,
        canvas: &mut dyn Canvas,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let store = self.store;
        let mut masking = false;
        let mut failure = None;
        for child in store.children(parent) {
            if let Err(err) = self.render_sibling(child, &mut masking, canvas, ctx) {
                failure = Some(err);
                break;
            }
        }
        if masking {
            canvas.restore();
        }
        failure.map_or(Ok(()), Err)
    }

    fn render_sibling(
        &mut self,
        child: LayerId,
        masking: &mut bool,
        canvas: &mut dyn Canvas,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let flags = self.store.flags(child);
        if *masking && (flags.clipping_mask || flags.break_mask_chain) {
            canvas.restore();
            *masking = false;
        }
        if flags.visible {
            self.render_layer(child, canvas, ctx)?;
        } else {
            self.summary.layers_skipped += 1;
        }
        if flags.clipping_mask {
            canvas.save();
            *masking = true;
            self.apply_mask(child, canvas, ctx)?;
            self.summary.masks_applied += 1;
        }
        Ok(())
    }

    fn render_layer(
        &mut self,
        id: LayerId,
        canvas: &mut dyn Canvas,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        canvas.save();
        canvas.concat(self.store.local_transform(id));
        let offscreen = layer_paint(id, self.store.style(id), ctx);
        if let Some(paint) = &offscreen {
            canvas.save_layer(paint);
        }
        let result = self.render_content(id, canvas, ctx);
        if offscreen.is_some() {
            canvas.restore();
        }
        canvas.restore();
        result
    }

    fn render_content(
        &mut self,
        id: LayerId,
        canvas: &mut dyn Canvas,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let store = self.store;
        let bounds = local_bounds(store.frame(id));
        match store.kind(id) {
            LayerKind::Page | LayerKind::Group => self.render_children(id, canvas, ctx),
            LayerKind::Artboard(background) | LayerKind::SymbolMaster(background) => {
                if let Some(color) = background.color {
                    canvas.draw_rect(bounds, &Paint::solid(color));
                    self.summary.layers_drawn += 1;
                }
                self.render_clipped(id, canvas, ctx)
            }
            LayerKind::SymbolInstance { .. } => self.render_clipped(id, canvas, ctx),
            LayerKind::Shape(_) | LayerKind::ShapeGroup => {
                let data = self.shape_data(id, ctx)?;
                match &data.plan {
                    Some(plan) => {
                        self.summary.paint_steps += plan.replay(canvas);
                        self.summary.layers_drawn += 1;
                    }
                    None => self.summary.layers_skipped += 1,
                }
                Ok(())
            }
            LayerKind::Text(content) => {
                let data = self.text_data(id, content, ctx)?;
                let frame = bounds.size();
                let steps = paint_text(id, &data, store.style(id), frame, canvas, ctx);
                if steps > 0 {
                    self.summary.paint_steps += steps;
                    self.summary.layers_drawn += 1;
                } else {
                    self.summary.layers_skipped += 1;
                }
                Ok(())
            }
        }
    }

    /// Renders children clipped to the layer's own bounds.
    fn render_clipped(
        &mut self,
        id: LayerId,
        canvas: &mut dyn Canvas,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        canvas.save();
        canvas.clip_rect(local_bounds(self.store.frame(id)), ClipOp::Intersect);
        let result = self.render_children(id, canvas, ctx);
        canvas.restore();
        result
    }

    /// Pushes the clip of a mask layer.
    ///
    /// The clip must outlive the mask's own save/restore, so the local
    /// transform is applied and undone by hand.
    fn apply_mask(
        &mut self,
        id: LayerId,
        canvas: &mut dyn Canvas,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let store = self.store;
        let local = store.local_transform(id);
        canvas.concat(local);
        let clip = match store.kind(id) {
            LayerKind::Shape(_) | LayerKind::ShapeGroup => {
                self.shape_data(id, ctx).map(|d| d.path.clone())
            }
            LayerKind::Text(content) => self.text_data(id, content, ctx).map(|d| d.path.clone()),
            _ => {
                canvas.clip_rect(local_bounds(store.frame(id)), ClipOp::Intersect);
                Ok(None)
            }
        };
        if let Ok(Some(path)) = &clip {
            canvas.clip_path(path, ClipOp::Intersect);
        }
        canvas.concat(local.inverse());
        clip.map(|_| ())
    }

    fn shape_data(
        &mut self,
        id: LayerId,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Arc<LayerPaintData>, RenderError> {
        let store = self.store;
        let version = store.version(id);
        if let Some(data) = self.cache.get(id, version) {
            return Ok(data);
        }
        let data = match outline(store, id, ctx)? {
            Some(path) => {
                let path = Arc::new(path);
                let frame = store.frame(id).size();
                let plan = PaintPlan::build(id, Arc::clone(&path), store.style(id), frame, ctx)?;
                LayerPaintData {
                    path: Some(path),
                    plan: Some(Arc::new(plan)),
                    paragraph: None,
                }
            }
            None => {
                report_skip(ctx, id, SkipReason::NoPath);
                LayerPaintData::default()
            }
        };
        Ok(self.cache.insert(id, version, data))
    }

    fn text_data(
        &mut self,
        id: LayerId,
        content: &TextContent,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Arc<LayerPaintData>, RenderError> {
        let store = self.store;
        let version = store.version(id);
        if let Some(data) = self.cache.get(id, version) {
            return Ok(data);
        }
        let frame = store.frame(id).size();
        let data = build_text(id, content, store.style(id), frame, ctx)?;
        Ok(self.cache.insert(id, version, data))
    }
}

/// Outline of a shape, or the combined outline of a shape group, in the
/// layer's own space.
fn outline(
    store: &LayerStore,
    id: LayerId,
    ctx: &mut RenderContext<'_>,
) -> Result<Option<BezPath>, RenderError> {
    match store.kind(id) {
        LayerKind::Shape(shape) => {
            let size: Size = store.frame(id).size();
            Ok(build_path(&resolve_points(&shape.points, size), shape.is_closed))
        }
        LayerKind::ShapeGroup => {
            let mut combined: Option<BezPath> = None;
            for child in store.children(id) {
                let Some(mut path) = outline(store, child, ctx)? else {
                    continue;
                };
                path.apply_affine(store.local_transform(child));
                combined = Some(match combined {
                    None => path,
                    Some(acc) => {
                        ctx.path_ops
                            .combine(&acc, &path, path_op(store.boolean_op(child)))?
                    }
                });
            }
            Ok(combined)
        }
        _ => Ok(None),
    }
}

/// Offscreen layer parameters, when the layer's own settings need one.
fn layer_paint(id: LayerId, style: &Style, ctx: &mut RenderContext<'_>) -> Option<LayerPaint> {
    let blur = match style.active_blur() {
        Some(blur) if blur.kind == BlurKind::Gaussian => {
            (blur.radius > 0.0).then(|| blur_sigma(blur.radius))
        }
        Some(blur) => {
            report_skip(ctx, id, SkipReason::UnsupportedBlur(blur.kind));
            None
        }
        None => None,
    };
    let settings = style.context_settings;
    (!settings.is_default() || blur.is_some()).then_some(LayerPaint {
        opacity: settings.opacity,
        blend_mode: settings.blend_mode,
        blur_sigma: blur,
    })
}
