// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded draw lists.
//!
//! [`export`] writes a [`DrawList`] as a JSON array with one object per
//! canvas call. Paths are encoded as SVG path data, matrices as the six
//! affine coefficients `[a, b, c, d, e, f]`.

use std::io::{self, Write};

use kurbo::{Affine, Rect};
use lamina_core::style::{Color, GradientStop};
use lamina_render::paint::{Paint, PaintStyle, Shader};
use lamina_render::record::{DrawCommand, DrawList};
use serde_json::{Value, json};

/// Writes `list` as pretty-printed JSON.
pub fn export(list: &DrawList, writer: &mut dyn Write) -> io::Result<()> {
    let commands: Vec<Value> = list.commands().iter().map(command).collect();
    serde_json::to_writer_pretty(writer, &commands)?;
    Ok(())
}

/// Converts one command to JSON.
#[must_use]
pub fn command(command: &DrawCommand) -> Value {
    match command {
        DrawCommand::Save => json!({ "op": "save" }),
        DrawCommand::SaveLayer(paint) => json!({
            "op": "save_layer",
            "opacity": paint.opacity,
            "blend_mode": format!("{:?}", paint.blend_mode),
            "blur_sigma": paint.blur_sigma,
        }),
        DrawCommand::Restore => json!({ "op": "restore" }),
        DrawCommand::Concat(m) => json!({ "op": "concat", "matrix": matrix(*m) }),
        DrawCommand::Translate(v) => json!({ "op": "translate", "offset": [v.x, v.y] }),
        DrawCommand::ClipPath {
            path,
            op,
            transform,
        } => json!({
            "op": "clip_path",
            "clip_op": format!("{op:?}"),
            "path": path.to_svg(),
            "transform": matrix(*transform),
        }),
        DrawCommand::ClipRect {
            rect,
            op,
            transform,
        } => json!({
            "op": "clip_rect",
            "clip_op": format!("{op:?}"),
            "rect": rect_value(*rect),
            "transform": matrix(*transform),
        }),
        DrawCommand::DrawPath {
            path,
            fill_rule,
            paint,
            transform,
        } => json!({
            "op": "draw_path",
            "path": path.to_svg(),
            "fill_rule": format!("{fill_rule:?}"),
            "paint": paint_value(paint),
            "transform": matrix(*transform),
        }),
        DrawCommand::DrawRect {
            rect,
            paint,
            transform,
        } => json!({
            "op": "draw_rect",
            "rect": rect_value(*rect),
            "paint": paint_value(paint),
            "transform": matrix(*transform),
        }),
        DrawCommand::DrawParagraph {
            paragraph,
            origin,
            paint,
            shadows,
            transform,
        } => json!({
            "op": "draw_paragraph",
            "paragraph": paragraph.id,
            "size": [paragraph.size.width, paragraph.size.height],
            "origin": [origin.x, origin.y],
            "paint": paint_value(paint),
            "shadows": shadows.iter().map(|s| json!({
                "offset": [s.offset_x, s.offset_y],
                "blur_radius": s.blur_radius,
                "color": color(s.color),
            })).collect::<Vec<_>>(),
            "transform": matrix(*transform),
        }),
        DrawCommand::Clear(c) => json!({ "op": "clear", "color": color(*c) }),
    }
}

fn paint_value(paint: &Paint) -> Value {
    let shader = match &paint.shader {
        Shader::Solid(c) => json!({ "type": "solid", "color": color(*c) }),
        Shader::Linear { start, end, stops } => json!({
            "type": "linear",
            "start": [start.x, start.y],
            "end": [end.x, end.y],
            "stops": stops_value(stops),
        }),
        Shader::Radial {
            center,
            radius,
            stops,
        } => json!({
            "type": "radial",
            "center": [center.x, center.y],
            "radius": radius,
            "stops": stops_value(stops),
        }),
        Shader::Sweep { center, stops } => json!({
            "type": "sweep",
            "center": [center.x, center.y],
            "stops": stops_value(stops),
        }),
        Shader::Image {
            image,
            matrix: m,
            tile,
        } => json!({
            "type": "image",
            "source": image.source.0,
            "size": [image.size.width, image.size.height],
            "matrix": matrix(*m),
            "tile": format!("{tile:?}"),
        }),
    };
    let style = match &paint.style {
        PaintStyle::Fill => json!("fill"),
        PaintStyle::Stroke(stroke) => json!({
            "width": stroke.width,
            "join": format!("{:?}", stroke.join),
            "cap": format!("{:?}", stroke.start_cap),
            "dashes": stroke.dash_pattern.as_slice(),
        }),
    };
    json!({
        "shader": shader,
        "style": style,
        "alpha": paint.alpha,
        "blend_mode": format!("{:?}", paint.blend_mode),
        "blur_sigma": paint.blur_sigma,
    })
}

fn stops_value(stops: &[GradientStop]) -> Value {
    stops
        .iter()
        .map(|s| json!({ "position": s.position, "color": color(s.color) }))
        .collect()
}

fn color(c: Color) -> Value {
    json!([c.red, c.green, c.blue, c.alpha])
}

fn rect_value(r: Rect) -> Value {
    json!([r.x0, r.y0, r.x1, r.y1])
}

fn matrix(m: Affine) -> [f64; 6] {
    m.as_coeffs()
}
