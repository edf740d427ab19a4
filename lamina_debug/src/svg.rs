// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG export of recorded draw lists.
//!
//! [`export`] replays a [`DrawList`] into an SVG document. Every draw carries
//! its recorded device transform, so the output does not depend on the
//! `concat`/`translate` commands themselves. Saves open `<g>` scopes that
//! accumulate clips and offscreen-layer opacity; restores close them.
//!
//! The conversion is lossy where SVG has no equivalent: difference clips and
//! inverse fills are drawn as their plain counterparts, sweep gradients and
//! images fall back to their first stop or a gray placeholder, and
//! paragraphs are drawn as their layout boxes.

use std::fmt::Write as _;
use std::io::{self, Write};

use kurbo::{Affine, Cap, Join, Size};
use lamina_core::style::{Color, GradientStop};
use lamina_render::backend::{ClipOp, FillRule};
use lamina_render::paint::{Paint, PaintStyle, Shader};
use lamina_render::record::{DrawCommand, DrawList};

/// Writes `list` as an SVG document of the given surface size.
pub fn export(list: &DrawList, size: Size, writer: &mut dyn Write) -> io::Result<()> {
    let mut svg = SvgWriter::default();
    for command in list.commands() {
        svg.command(command, size);
    }
    svg.close_all();
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = size.width,
        h = size.height,
    )?;
    writer.write_all(svg.body.as_bytes())?;
    writeln!(writer, "</svg>")
}

#[derive(Default)]
struct SvgWriter {
    body: String,
    /// Open `<g>` elements per save level.
    scopes: Vec<usize>,
    next_id: usize,
}

impl SvgWriter {
    fn command(&mut self, command: &DrawCommand, size: Size) {
        match command {
            DrawCommand::Save => self.scopes.push(0),
            DrawCommand::SaveLayer(paint) => {
                let _ = writeln!(self.body, r#"<g opacity="{}">"#, paint.opacity);
                self.scopes.push(1);
            }
            DrawCommand::Restore => {
                for _ in 0..self.scopes.pop().unwrap_or(0) {
                    self.body.push_str("</g>\n");
                }
            }
            // Draws carry their device transform.
            DrawCommand::Concat(_) | DrawCommand::Translate(_) => {}
            DrawCommand::ClipPath {
                path,
                op,
                transform,
            } => self.clip(&path.to_svg(), *op, *transform),
            DrawCommand::ClipRect {
                rect,
                op,
                transform,
            } => {
                let d = format!(
                    "M{} {}H{}V{}H{}Z",
                    rect.x0, rect.y0, rect.x1, rect.y1, rect.x0
                );
                self.clip(&d, *op, *transform);
            }
            DrawCommand::DrawPath {
                path,
                fill_rule,
                paint,
                transform,
            } => {
                let rule = match fill_rule {
                    FillRule::NonZero => "nonzero",
                    FillRule::EvenOdd | FillRule::InverseEvenOdd => "evenodd",
                };
                let paint = self.paint_attributes(paint);
                let _ = writeln!(
                    self.body,
                    r#"<path d="{}" fill-rule="{rule}" transform="{}" {paint}/>"#,
                    path.to_svg(),
                    matrix(*transform),
                );
            }
            DrawCommand::DrawRect {
                rect,
                paint,
                transform,
            } => {
                let paint = self.paint_attributes(paint);
                let _ = writeln!(
                    self.body,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" transform="{}" {paint}/>"#,
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height(),
                    matrix(*transform),
                );
            }
            DrawCommand::DrawParagraph {
                paragraph,
                origin,
                transform,
                ..
            } => {
                let _ = writeln!(
                    self.body,
                    r#"<rect class="paragraph" x="{}" y="{}" width="{}" height="{}" transform="{}" fill="none" stroke="gray" stroke-dasharray="2 2"/>"#,
                    origin.x,
                    origin.y,
                    paragraph.size.width,
                    paragraph.size.height,
                    matrix(*transform),
                );
            }
            DrawCommand::Clear(c) => {
                let _ = writeln!(
                    self.body,
                    r#"<rect width="{}" height="{}" fill="{}"/>"#,
                    size.width,
                    size.height,
                    css(*c),
                );
            }
        }
    }

    fn clip(&mut self, d: &str, op: ClipOp, transform: Affine) {
        let id = self.fresh_id("clip");
        if op == ClipOp::Difference {
            self.body.push_str("<!-- difference clip drawn as intersect -->\n");
        }
        let _ = writeln!(
            self.body,
            r#"<clipPath id="{id}"><path d="{d}" transform="{}"/></clipPath>"#,
            matrix(transform),
        );
        let _ = writeln!(self.body, r#"<g clip-path="url(#{id})">"#);
        match self.scopes.last_mut() {
            Some(open) => *open += 1,
            None => self.scopes.push(1),
        }
    }

    /// Emits any definitions the paint needs and returns its attributes.
    fn paint_attributes(&mut self, paint: &Paint) -> String {
        let color = self.shader(&paint.shader);
        let mut attrs = match &paint.style {
            PaintStyle::Fill => format!(r#"fill="{color}""#),
            PaintStyle::Stroke(stroke) => {
                let mut s = format!(
                    r#"fill="none" stroke="{color}" stroke-width="{}" stroke-linejoin="{}" stroke-linecap="{}""#,
                    stroke.width,
                    match stroke.join {
                        Join::Bevel => "bevel",
                        Join::Miter => "miter",
                        Join::Round => "round",
                    },
                    match stroke.start_cap {
                        Cap::Butt => "butt",
                        Cap::Square => "square",
                        Cap::Round => "round",
                    },
                );
                if !stroke.dash_pattern.is_empty() {
                    let dashes: Vec<String> =
                        stroke.dash_pattern.iter().map(f64::to_string).collect();
                    let _ = write!(s, r#" stroke-dasharray="{}""#, dashes.join(" "));
                }
                s
            }
        };
        if paint.alpha != 1.0 {
            let _ = write!(attrs, r#" opacity="{}""#, paint.alpha);
        }
        if let Some(sigma) = paint.blur_sigma.filter(|s| *s > 0.0) {
            let id = self.fresh_id("blur");
            let _ = writeln!(
                self.body,
                r#"<filter id="{id}"><feGaussianBlur stdDeviation="{sigma}"/></filter>"#,
            );
            let _ = write!(attrs, r#" filter="url(#{id})""#);
        }
        attrs
    }

    /// Returns a color or a gradient reference for `shader`.
    fn shader(&mut self, shader: &Shader) -> String {
        match shader {
            Shader::Solid(c) => css(*c),
            Shader::Linear { start, end, stops } => {
                let id = self.fresh_id("gradient");
                let _ = writeln!(
                    self.body,
                    r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">{}</linearGradient>"#,
                    start.x,
                    start.y,
                    end.x,
                    end.y,
                    stops_markup(stops),
                );
                format!("url(#{id})")
            }
            Shader::Radial {
                center,
                radius,
                stops,
            } => {
                let id = self.fresh_id("gradient");
                let _ = writeln!(
                    self.body,
                    r#"<radialGradient id="{id}" gradientUnits="userSpaceOnUse" cx="{}" cy="{}" r="{radius}">{}</radialGradient>"#,
                    center.x,
                    center.y,
                    stops_markup(stops),
                );
                format!("url(#{id})")
            }
            Shader::Sweep { stops, .. } => stops
                .first()
                .map_or_else(|| "gray".to_owned(), |s| css(s.color)),
            Shader::Image { .. } => "gray".to_owned(),
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn close_all(&mut self) {
        while let Some(open) = self.scopes.pop() {
            for _ in 0..open {
                self.body.push_str("</g>\n");
            }
        }
    }
}

fn stops_markup(stops: &[GradientStop]) -> String {
    stops
        .iter()
        .map(|s| format!(r#"<stop offset="{}" stop-color="{}"/>"#, s.position, css(s.color)))
        .collect()
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "channels are clamped to 0..=255 before the cast"
)]
fn css(c: Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{})",
        channel(c.red),
        channel(c.green),
        channel(c.blue),
        c.alpha
    )
}

fn matrix(m: Affine) -> String {
    let [a, b, c, d, e, f] = m.as_coeffs();
    format!("matrix({a} {b} {c} {d} {e} {f})")
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Shape};
    use lamina_render::backend::Canvas;

    use super::*;

    fn export_string(list: &DrawList) -> String {
        let mut out = Vec::new();
        export(list, Size::new(100.0, 50.0), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn clips_open_and_close_groups() {
        let mut list = DrawList::new();
        list.save();
        list.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0), ClipOp::Intersect);
        list.draw_path(
            &Rect::new(0.0, 0.0, 20.0, 20.0).to_path(0.1),
            FillRule::NonZero,
            &Paint::solid(Color::BLACK),
        );
        list.restore();

        let svg = export_string(&list);
        assert!(svg.starts_with("<svg"), "got: {svg}");
        assert!(svg.contains(r#"<g clip-path="url(#clip1)">"#), "got: {svg}");
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
        assert!(svg.contains(r#"fill="rgba(0,0,0,1)""#), "got: {svg}");
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn unbalanced_saves_are_closed() {
        let mut list = DrawList::new();
        list.save();
        list.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0), ClipOp::Intersect);
        let svg = export_string(&list);
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
    }

    #[test]
    fn blurred_paint_gets_a_filter() {
        let mut list = DrawList::new();
        let paint = Paint {
            blur_sigma: Some(2.5),
            ..Paint::solid(Color::BLACK)
        };
        list.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), &paint);
        let svg = export_string(&list);
        assert!(svg.contains(r#"<feGaussianBlur stdDeviation="2.5"/>"#), "got: {svg}");
        assert!(svg.contains(r#"filter="url(#blur1)""#), "got: {svg}");
    }
}
