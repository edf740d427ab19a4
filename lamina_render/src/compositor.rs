// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint plans: the ordered draw steps of one shape.
//!
//! Building a plan resolves every enabled style entry into a ready-to-draw
//! [`PaintStep`] and derives the shadow path once. Replaying a plan issues
//! the steps on a [`Canvas`] in the fixed order
//!
//! ```text
//! outer shadows ──► fills ──► inner shadows ──► borders
//! ```
//!
//! each group in declaration order. Plans depend only on the layer's path,
//! style and frame size, so the scene renderer caches them per layer
//! version.

use std::sync::Arc;

use kurbo::{BezPath, Size, Vec2};
use lamina_core::layer::LayerId;
use lamina_core::style::{BorderPosition, Style};
use lamina_core::trace::{LayerSkippedEvent, SkipReason};

use crate::RenderError;
use crate::backend::{Canvas, ClipOp, FillRule, RenderContext};
use crate::paint::{Paint, border_paint, fill_paint, shadow_paint};
use crate::shadow::{inner_shadow_geometry, outer_shadow_geometry, shadow_path};

/// One draw operation of a [`PaintPlan`].
#[derive(Clone, Debug, PartialEq)]
pub enum PaintStep {
    /// An outer or inner shadow.
    ///
    /// Replayed as `save → clip → translate(offset) → draw → restore`.
    Shadow {
        /// Geometry to draw, before the offset.
        geometry: Arc<BezPath>,
        /// Inner shadows use [`FillRule::InverseEvenOdd`].
        fill_rule: FillRule,
        /// Blurred fill paint.
        paint: Paint,
        /// Shadow offset.
        offset: Vec2,
        /// Clip applied before the offset.
        clip: Option<(Arc<BezPath>, ClipOp)>,
    },
    /// A fill of the shape's path.
    Fill {
        /// Fill paint.
        paint: Paint,
    },
    /// A border stroke of the shape's path.
    Border {
        /// Stroke paint.
        paint: Paint,
        /// Clip against the path for inside and outside borders.
        clip: Option<ClipOp>,
    },
}

/// The resolved paint of one shape.
#[derive(Clone, Debug)]
pub struct PaintPlan {
    path: Arc<BezPath>,
    shadow_path: Arc<BezPath>,
    steps: Vec<PaintStep>,
}

impl PaintPlan {
    /// Builds the plan for `path` painted with `style`.
    ///
    /// Entries that cannot be painted are logged, reported to the tracer and
    /// left out. Backend failures abort the build.
    pub fn build(
        layer: LayerId,
        path: Arc<BezPath>,
        style: &Style,
        frame: Size,
        ctx: &mut RenderContext<'_>,
    ) -> Result<Self, RenderError> {
        let shadow_path = shadow_path(&path, style, ctx.path_ops)?;
        let has_fill = style.has_enabled_fill();
        let mut steps = Vec::new();

        for shadow in style.enabled_shadows().filter(|s| !s.is_empty()) {
            let geometry = outer_shadow_geometry(&shadow_path, shadow, has_fill, ctx.path_ops)?;
            steps.push(PaintStep::Shadow {
                geometry,
                fill_rule: FillRule::NonZero,
                paint: shadow_paint(shadow),
                offset: Vec2::new(shadow.offset_x, shadow.offset_y),
                clip: has_fill.then(|| (Arc::clone(&shadow_path), ClipOp::Difference)),
            });
        }

        for fill in style.enabled_fills() {
            match fill_paint(fill, frame, ctx.images) {
                Ok(paint) => steps.push(PaintStep::Fill { paint }),
                Err(reason) => report_skip(ctx, layer, reason),
            }
        }

        for shadow in style.enabled_inner_shadows().filter(|s| !s.is_empty()) {
            let geometry = inner_shadow_geometry(&path, shadow, ctx.path_ops)?;
            steps.push(PaintStep::Shadow {
                geometry: Arc::new(geometry),
                fill_rule: FillRule::InverseEvenOdd,
                paint: shadow_paint(shadow),
                offset: Vec2::new(shadow.offset_x, shadow.offset_y),
                clip: Some((Arc::clone(&path), ClipOp::Intersect)),
            });
        }

        let options = style.active_border_options();
        for border in style.visible_borders() {
            match border_paint(border, frame, options) {
                Ok(paint) => {
                    let clip = match border.position {
                        BorderPosition::Center => None,
                        BorderPosition::Inside => Some(ClipOp::Intersect),
                        BorderPosition::Outside => Some(ClipOp::Difference),
                    };
                    steps.push(PaintStep::Border { paint, clip });
                }
                Err(reason) => report_skip(ctx, layer, reason),
            }
        }

        Ok(Self {
            path,
            shadow_path,
            steps,
        })
    }

    /// The shape's path in layer space.
    #[must_use]
    pub fn path(&self) -> &Arc<BezPath> {
        &self.path
    }

    /// Silhouette used by outer shadows.
    #[must_use]
    pub fn shadow_path(&self) -> &Arc<BezPath> {
        &self.shadow_path
    }

    /// Draw steps in paint order.
    #[must_use]
    pub fn steps(&self) -> &[PaintStep] {
        &self.steps
    }

    /// Issues every step on `canvas`. Returns the number of steps replayed.
    pub fn replay(&self, canvas: &mut dyn Canvas) -> u32 {
        let mut count = 0_u32;
        for step in &self.steps {
            match step {
                PaintStep::Shadow {
                    geometry,
                    fill_rule,
                    paint,
                    offset,
                    clip,
                } => {
                    canvas.save();
                    if let Some((clip_path, op)) = clip {
                        canvas.clip_path(clip_path, *op);
                    }
                    canvas.translate(*offset);
                    canvas.draw_path(geometry, *fill_rule, paint);
                    canvas.restore();
                }
                PaintStep::Fill { paint } => {
                    canvas.draw_path(&self.path, FillRule::NonZero, paint);
                }
                PaintStep::Border { paint, clip: None } => {
                    canvas.draw_path(&self.path, FillRule::NonZero, paint);
                }
                PaintStep::Border {
                    paint,
                    clip: Some(op),
                } => {
                    canvas.save();
                    canvas.clip_path(&self.path, *op);
                    canvas.draw_path(&self.path, FillRule::NonZero, paint);
                    canvas.restore();
                }
            }
            count += 1;
        }
        count
    }
}

pub(crate) fn report_skip(ctx: &mut RenderContext<'_>, layer: LayerId, reason: SkipReason) {
    log::warn!("layer {}: skipped {}", layer.index(), reason.describe());
    ctx.tracer.layer_skipped(&LayerSkippedEvent {
        layer: layer.index(),
        reason,
    });
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Shape};
    use lamina_core::layer::{LayerKind, LayerStore};
    use lamina_core::style::{Border, Color, Fill, FillType, Shadow};

    use super::*;
    use crate::backend::{NoImages, NoText};
    use crate::record::{DrawCommand, DrawList};
    use crate::testing::{GridPathOps, covers};

    fn layer() -> LayerId {
        LayerStore::new().create_layer(LayerKind::Group)
    }

    fn build(style: &Style) -> PaintPlan {
        let path = Arc::new(Rect::new(0.0, 0.0, 200.0, 150.0).to_path(0.1));
        let mut ops = GridPathOps;
        let mut images = NoImages;
        let mut text = NoText;
        let mut ctx = RenderContext::new(&mut ops, &mut images, &mut text);
        PaintPlan::build(layer(), path, style, Size::new(200.0, 150.0), &mut ctx).expect("plan")
    }

    fn kinds(plan: &PaintPlan) -> Vec<&'static str> {
        plan.steps()
            .iter()
            .map(|s| match s {
                PaintStep::Shadow {
                    fill_rule: FillRule::InverseEvenOdd,
                    ..
                } => "inner",
                PaintStep::Shadow { .. } => "outer",
                PaintStep::Fill { .. } => "fill",
                PaintStep::Border { .. } => "border",
            })
            .collect()
    }

    #[test]
    fn steps_follow_fixed_order() {
        let style = Style {
            borders: vec![Border::solid(BorderPosition::Inside, 2.0, Color::BLACK)],
            inner_shadows: vec![Shadow::inner(0.0, 2.0, 4.0, 0.0, Color::BLACK)],
            fills: vec![Fill::solid(Color::WHITE), Fill::solid(Color::BLACK)],
            shadows: vec![Shadow::outer(0.0, 4.0, 8.0, 0.0, Color::BLACK)],
            ..Style::default()
        };
        let plan = build(&style);
        assert_eq!(kinds(&plan), ["outer", "fill", "fill", "inner", "border"]);
    }

    #[test]
    fn empty_and_disabled_entries_are_dropped() {
        let mut hidden = Fill::solid(Color::WHITE);
        hidden.is_enabled = false;
        let style = Style {
            fills: vec![hidden, Fill::solid(Color::BLACK)],
            shadows: vec![Shadow::outer(0.0, 0.0, 0.0, 0.0, Color::BLACK)],
            borders: vec![Border::solid(BorderPosition::Center, 0.0, Color::BLACK)],
            ..Style::default()
        };
        assert_eq!(kinds(&build(&style)), ["fill"]);
    }

    #[test]
    fn outer_shadow_clips_fill_silhouette() {
        let style = Style {
            fills: vec![Fill::solid(Color::WHITE)],
            shadows: vec![Shadow::outer(3.0, 4.0, 2.0, 0.0, Color::BLACK)],
            ..Style::default()
        };
        let plan = build(&style);
        let PaintStep::Shadow {
            offset, clip, paint, ..
        } = &plan.steps()[0]
        else {
            panic!("expected a shadow step");
        };
        assert_eq!(*offset, Vec2::new(3.0, 4.0));
        let (clip_path, op) = clip.as_ref().expect("clip");
        assert_eq!(*op, ClipOp::Difference);
        assert!(Arc::ptr_eq(clip_path, plan.shadow_path()));
        assert!(paint.blur_sigma.is_some());
    }

    #[test]
    fn inner_shadow_spread_paints_inside_the_edge() {
        let style = Style {
            fills: vec![Fill::solid(Color::WHITE)],
            inner_shadows: vec![Shadow::inner(0.0, 0.0, 2.0, 5.0, Color::BLACK)],
            ..Style::default()
        };
        let plan = build(&style);
        let PaintStep::Shadow {
            geometry,
            fill_rule,
            clip,
            ..
        } = &plan.steps()[1]
        else {
            panic!("expected an inner shadow step");
        };
        assert_eq!(*fill_rule, FillRule::InverseEvenOdd);
        assert!(matches!(clip, Some((_, ClipOp::Intersect))));
        // Inverse fill: the band within 5 of the edge is uncovered, so painted.
        assert!(!covers(geometry, (3.0, 75.0)));
        assert!(!covers(geometry, (100.0, 147.0)));
        assert!(covers(geometry, (100.0, 75.0)));
    }

    #[test]
    fn border_only_shadow_is_unclipped() {
        let style = Style {
            borders: vec![Border::solid(BorderPosition::Outside, 2.0, Color::BLACK)],
            shadows: vec![Shadow::outer(0.0, 4.0, 2.0, 0.0, Color::BLACK)],
            ..Style::default()
        };
        let plan = build(&style);
        assert!(matches!(&plan.steps()[0], PaintStep::Shadow { clip: None, .. }));
    }

    #[test]
    fn pattern_border_is_skipped_not_fatal() {
        let style = Style {
            fills: vec![Fill::solid(Color::WHITE)],
            borders: vec![Border {
                fill_type: FillType::Pattern,
                ..Border::solid(BorderPosition::Center, 1.0, Color::BLACK)
            }],
            ..Style::default()
        };
        assert_eq!(kinds(&build(&style)), ["fill"]);
    }

    #[test]
    fn replay_balances_saves() {
        let style = Style {
            fills: vec![Fill::solid(Color::WHITE)],
            borders: vec![
                Border::solid(BorderPosition::Inside, 2.0, Color::BLACK),
                Border::solid(BorderPosition::Center, 2.0, Color::BLACK),
            ],
            shadows: vec![Shadow::outer(0.0, 4.0, 2.0, 0.0, Color::BLACK)],
            inner_shadows: vec![Shadow::inner(1.0, 1.0, 2.0, 0.0, Color::BLACK)],
            ..Style::default()
        };
        let plan = build(&style);
        let mut canvas = DrawList::new();
        assert_eq!(plan.replay(&mut canvas), 5);
        assert_eq!(canvas.depth(), 0);
        assert_eq!(canvas.draw_count(), 5);

        let clips: Vec<_> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::ClipPath { op, .. } => Some(*op),
                _ => None,
            })
            .collect();
        assert_eq!(
            clips,
            [ClipOp::Difference, ClipOp::Intersect, ClipOp::Intersect]
        );
    }
}
