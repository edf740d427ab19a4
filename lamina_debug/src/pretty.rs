// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).
//! [`write_draw_list`] lists a recorded pass, indented by save depth.

use std::io::{self, Write};

use kurbo::Affine;
use lamina_core::trace::{
    HitTestEvent, LayerSkippedEvent, RenderBeginEvent, RenderSummary, TraceSink,
};
use lamina_render::paint::{Paint, PaintStyle, Shader};
use lamina_render::record::{DrawCommand, DrawList};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_render_begin(&mut self, e: &RenderBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[render:begin] frame={} layers={}",
            e.frame_index, e.layer_count,
        );
    }

    fn on_render_summary(&mut self, s: &RenderSummary) {
        let _ = writeln!(
            self.writer,
            "[render:summary] frame={} drawn={} skipped={} masks={} steps={} cache={}/{}",
            s.frame_index,
            s.layers_drawn,
            s.layers_skipped,
            s.masks_applied,
            s.paint_steps,
            s.cache_hits,
            s.cache_hits + s.cache_misses,
        );
    }

    fn on_layer_skipped(&mut self, e: &LayerSkippedEvent) {
        let _ = writeln!(
            self.writer,
            "[skip] layer={} reason={}",
            e.layer,
            e.reason.describe(),
        );
    }

    fn on_hit_test(&mut self, e: &HitTestEvent) {
        let result = match e.result {
            Some(idx) => idx.to_string(),
            None => "none".to_owned(),
        };
        let _ = writeln!(
            self.writer,
            "[hit] point=({:.1}, {:.1}) mode={:?} result={result}",
            e.point.x, e.point.y, e.mode,
        );
    }
}

/// Writes one line per recorded command, indented by save depth.
pub fn write_draw_list(list: &DrawList, writer: &mut dyn Write) -> io::Result<()> {
    let mut depth = 0_usize;
    for command in list.commands() {
        if matches!(command, DrawCommand::Restore) {
            depth = depth.saturating_sub(1);
        }
        let indent = "  ".repeat(depth);
        match command {
            DrawCommand::Save => writeln!(writer, "{indent}save")?,
            DrawCommand::SaveLayer(paint) => writeln!(
                writer,
                "{indent}save_layer opacity={} blend={:?} blur={}",
                paint.opacity,
                paint.blend_mode,
                optional(paint.blur_sigma),
            )?,
            DrawCommand::Restore => writeln!(writer, "{indent}restore")?,
            DrawCommand::Concat(m) => writeln!(writer, "{indent}concat {}", matrix(*m))?,
            DrawCommand::Translate(v) => {
                writeln!(writer, "{indent}translate ({:.2}, {:.2})", v.x, v.y)?;
            }
            DrawCommand::ClipPath { path, op, .. } => writeln!(
                writer,
                "{indent}clip_path {op:?} elements={}",
                path.elements().len(),
            )?,
            DrawCommand::ClipRect { rect, op, .. } => writeln!(
                writer,
                "{indent}clip_rect {op:?} ({:.2}, {:.2}, {:.2}, {:.2})",
                rect.x0, rect.y0, rect.x1, rect.y1,
            )?,
            DrawCommand::DrawPath {
                path,
                fill_rule,
                paint,
                ..
            } => writeln!(
                writer,
                "{indent}draw_path {fill_rule:?} elements={} {}",
                path.elements().len(),
                describe_paint(paint),
            )?,
            DrawCommand::DrawRect { rect, paint, .. } => writeln!(
                writer,
                "{indent}draw_rect ({:.2}, {:.2}, {:.2}, {:.2}) {}",
                rect.x0,
                rect.y0,
                rect.x1,
                rect.y1,
                describe_paint(paint),
            )?,
            DrawCommand::DrawParagraph {
                paragraph,
                shadows,
                paint,
                ..
            } => writeln!(
                writer,
                "{indent}draw_paragraph id={} shadows={} {}",
                paragraph.id,
                shadows.len(),
                describe_paint(paint),
            )?,
            DrawCommand::Clear(c) => writeln!(
                writer,
                "{indent}clear rgba({:.3}, {:.3}, {:.3}, {:.3})",
                c.red, c.green, c.blue, c.alpha,
            )?,
        }
        if matches!(command, DrawCommand::Save | DrawCommand::SaveLayer(_)) {
            depth += 1;
        }
    }
    Ok(())
}

fn describe_paint(paint: &Paint) -> String {
    let shader = match &paint.shader {
        Shader::Solid(c) => format!(
            "solid({:.3}, {:.3}, {:.3}, {:.3})",
            c.red, c.green, c.blue, c.alpha
        ),
        Shader::Linear { stops, .. } => format!("linear[{}]", stops.len()),
        Shader::Radial { radius, stops, .. } => format!("radial(r={radius:.2})[{}]", stops.len()),
        Shader::Sweep { stops, .. } => format!("sweep[{}]", stops.len()),
        Shader::Image { image, tile, .. } => format!("image({}, {tile:?})", image.source.0),
    };
    let style = match &paint.style {
        PaintStyle::Fill => "fill".to_owned(),
        PaintStyle::Stroke(stroke) => format!("stroke(w={:.2})", stroke.width),
    };
    let mut out = format!("{style} {shader}");
    if paint.alpha != 1.0 {
        out.push_str(&format!(" alpha={}", paint.alpha));
    }
    if let Some(sigma) = paint.blur_sigma {
        out.push_str(&format!(" blur={sigma:.2}"));
    }
    out
}

fn matrix(m: Affine) -> String {
    let c = m.as_coeffs();
    format!(
        "[{:.3} {:.3} {:.3} {:.3} {:.2} {:.2}]",
        c[0], c[1], c[2], c[3], c[4], c[5]
    )
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "none".to_owned(), |v| format!("{v:.2}"))
}
