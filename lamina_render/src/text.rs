// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text layers.
//!
//! Simple styles draw the paragraph directly: once with the first fill
//! (carrying the outer shadows as text shadows) and once more with a stroke
//! of the first border. Styles the text backend cannot express, such as
//! inner shadows, gradient or image paints, or stacked fills, go through the
//! compositor on the glyph outlines instead.

use std::sync::Arc;

use kurbo::{Point, Size};
use lamina_core::layer::{LayerId, TextContent};
use lamina_core::style::{Border, BorderPosition, Color, FillType, Shadow, Style};
use lamina_core::trace::SkipReason;

use crate::RenderError;
use crate::backend::{Canvas, RenderContext};
use crate::cache::LayerPaintData;
use crate::compositor::{PaintPlan, report_skip};
use crate::paint::{Paint, border_paint, fill_paint};

/// Whether the style needs the compositor rather than direct text drawing.
#[must_use]
pub fn needs_outline_paint(style: &Style) -> bool {
    style.enabled_inner_shadows().next().is_some()
        || style.enabled_fills().any(|f| f.fill_type != FillType::Color)
        || style.visible_borders().any(|b| b.fill_type != FillType::Color)
        || style.enabled_fills().nth(1).is_some()
}

/// Lays out a text layer and prepares its paint data.
pub(crate) fn build_text(
    layer: LayerId,
    content: &TextContent,
    style: &Style,
    frame: Size,
    ctx: &mut RenderContext<'_>,
) -> Result<LayerPaintData, RenderError> {
    let Some(paragraph) = ctx.text.layout(content, frame.width) else {
        report_skip(ctx, layer, SkipReason::NoTextLayout);
        return Ok(LayerPaintData::default());
    };
    let path = paragraph.outline.clone();
    let plan = match (&path, needs_outline_paint(style)) {
        (Some(outline), true) => Some(Arc::new(PaintPlan::build(
            layer,
            Arc::clone(outline),
            style,
            frame,
            ctx,
        )?)),
        (None, true) => {
            log::debug!(
                "layer {}: no glyph outlines, drawing text directly",
                layer.index()
            );
            None
        }
        (_, false) => None,
    };
    Ok(LayerPaintData {
        path,
        plan,
        paragraph: Some(Arc::new(paragraph)),
    })
}

/// Draws a prepared text layer. Returns the number of draw steps issued.
pub(crate) fn paint_text(
    layer: LayerId,
    data: &LayerPaintData,
    style: &Style,
    frame: Size,
    canvas: &mut dyn Canvas,
    ctx: &mut RenderContext<'_>,
) -> u32 {
    if let Some(plan) = &data.plan {
        return plan.replay(canvas);
    }
    let Some(paragraph) = &data.paragraph else {
        return 0;
    };

    let fill = match style.enabled_fills().next() {
        Some(fill) => match fill_paint(fill, frame, ctx.images) {
            Ok(paint) => paint,
            Err(reason) => {
                report_skip(ctx, layer, reason);
                Paint::solid(Color::BLACK)
            }
        },
        None => Paint::solid(Color::BLACK),
    };
    let shadows: Vec<Shadow> = style
        .enabled_shadows()
        .filter(|s| !s.is_empty())
        .copied()
        .collect();
    canvas.draw_paragraph(paragraph, Point::ZERO, &fill, &shadows);

    let Some(border) = style.visible_borders().next() else {
        return 1;
    };
    // Glyph strokes straddle the outline whatever the border position.
    let centered = Border {
        position: BorderPosition::Center,
        ..border.clone()
    };
    match border_paint(&centered, frame, style.active_border_options()) {
        Ok(paint) => {
            canvas.draw_paragraph(paragraph, Point::ZERO, &paint, &[]);
            2
        }
        Err(reason) => {
            report_skip(ctx, layer, reason);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{BezPath, Rect, Shape};
    use lamina_core::layer::{LayerKind, LayerStore, TextAlignment};
    use lamina_core::style::{Fill, Gradient, GradientKind};

    use super::*;
    use crate::backend::{NoImages, Paragraph, TextLayout};
    use crate::paint::PaintStyle;
    use crate::record::{DrawCommand, DrawList};
    use crate::testing::GridPathOps;

    struct BoxText {
        with_outline: bool,
    }

    impl TextLayout for BoxText {
        fn layout(&mut self, content: &TextContent, width: f64) -> Option<Paragraph> {
            let size = Size::new(width, content.font_size * 1.2);
            let outline: Option<Arc<BezPath>> = self
                .with_outline
                .then(|| Arc::new(size.to_rect().to_path(0.1)));
            Some(Paragraph {
                id: 7,
                size,
                outline,
            })
        }
    }

    fn content() -> TextContent {
        TextContent {
            text: "Hello".into(),
            font_family: "Inter".into(),
            font_size: 20.0,
            line_height: None,
            alignment: TextAlignment::Left,
        }
    }

    fn render(style: &Style, with_outline: bool) -> DrawList {
        let layer = LayerStore::new().create_layer(LayerKind::Text(content()));
        let frame = Size::new(100.0, 24.0);
        let mut ops = GridPathOps;
        let mut text = BoxText { with_outline };
        let mut images = NoImages;
        let mut ctx = RenderContext::new(&mut ops, &mut images, &mut text);
        let data = build_text(layer, &content(), style, frame, &mut ctx).expect("text");
        let mut canvas = DrawList::new();
        paint_text(layer, &data, style, frame, &mut canvas, &mut ctx);
        canvas
    }

    #[test]
    fn simple_style_draws_paragraph_twice() {
        let style = Style {
            fills: vec![Fill::solid(Color::WHITE)],
            borders: vec![Border::solid(BorderPosition::Inside, 2.0, Color::BLACK)],
            shadows: vec![Shadow::outer(0.0, 2.0, 2.0, 0.0, Color::BLACK)],
            ..Style::default()
        };
        let canvas = render(&style, true);
        let draws: Vec<_> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::DrawParagraph { paint, shadows, .. } => Some((paint, shadows.len())),
                _ => None,
            })
            .collect();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].0.style, PaintStyle::Fill);
        assert_eq!(draws[0].1, 1);
        assert_eq!(draws[1].0.stroke_width(), Some(2.0));
        assert_eq!(draws[1].1, 0);
    }

    #[test]
    fn missing_fill_defaults_to_black() {
        let canvas = render(&Style::default(), false);
        let Some(DrawCommand::DrawParagraph { paint, .. }) = canvas.commands().first() else {
            panic!("expected a paragraph draw");
        };
        assert_eq!(*paint, Paint::solid(Color::BLACK));
    }

    #[test]
    fn gradient_fill_paints_outlines() {
        let style = Style {
            fills: vec![Fill::gradient(Gradient {
                kind: GradientKind::Linear,
                from: Point::new(0.0, 0.0),
                to: Point::new(1.0, 0.0),
                stops: Vec::new(),
            })],
            ..Style::default()
        };
        assert!(needs_outline_paint(&style));
        let canvas = render(&style, true);
        let Some(DrawCommand::DrawPath { path, .. }) = canvas.commands().first() else {
            panic!("expected a path draw");
        };
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 100.0, 24.0));
    }

    #[test]
    fn stacked_fills_need_outlines() {
        let style = Style {
            fills: vec![Fill::solid(Color::WHITE), Fill::solid(Color::BLACK)],
            ..Style::default()
        };
        assert!(needs_outline_paint(&style));
        let single = Style {
            fills: vec![Fill::solid(Color::WHITE)],
            ..Style::default()
        };
        assert!(!needs_outline_paint(&single));
    }

    #[test]
    fn without_outlines_falls_back_to_paragraph() {
        let style = Style {
            fills: vec![Fill::solid(Color::WHITE), Fill::solid(Color::BLACK)],
            ..Style::default()
        };
        let canvas = render(&style, false);
        assert_eq!(canvas.draw_count(), 1);
        assert!(matches!(
            canvas.commands()[0],
            DrawCommand::DrawParagraph { .. }
        ));
    }
}
