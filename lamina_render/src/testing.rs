// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry doubles for unit tests.

use kurbo::{BezPath, Join, Point, Rect, Shape, Stroke, StrokeOpts};

use crate::RenderError;
use crate::backend::{PathOp, PathOps};

/// Strokes with kurbo and evaluates boolean operations cell by cell.
///
/// Every vertex of either operand contributes a grid line. Each grid cell is
/// kept or dropped by sampling one interior point of it against both
/// operands with the nonzero rule, and kept cells are emitted as rectangles.
/// Exact for rectilinear outlines; curved operands come out as their
/// vertex grid.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GridPathOps;

impl PathOps for GridPathOps {
    fn stroke(&mut self, path: &BezPath, width: f64) -> Result<BezPath, RenderError> {
        let style = Stroke::new(width).with_join(Join::Miter);
        Ok(kurbo::stroke(
            path.elements().iter().copied(),
            &style,
            &StrokeOpts::default(),
            0.01,
        ))
    }

    fn combine(&mut self, a: &BezPath, b: &BezPath, op: PathOp) -> Result<BezPath, RenderError> {
        let xs = grid_lines(a, b, |p| p.x);
        let ys = grid_lines(a, b, |p| p.y);
        let mut out = BezPath::new();
        for x in xs.windows(2) {
            for y in ys.windows(2) {
                // Off-center so the sample never lies on a cell diagonal.
                let sample = Point::new(
                    x[0] + (x[1] - x[0]) * 0.37,
                    y[0] + (y[1] - y[0]) * 0.61,
                );
                let in_a = covers(a, sample);
                let in_b = covers(b, sample);
                let keep = match op {
                    PathOp::Union => in_a || in_b,
                    PathOp::Intersect => in_a && in_b,
                    PathOp::Difference => in_a && !in_b,
                    PathOp::Xor => in_a != in_b,
                };
                if keep {
                    out.extend(Rect::new(x[0], y[0], x[1], y[1]).path_elements(0.1));
                }
            }
        }
        Ok(out)
    }
}

/// Returns whether `path` covers `point` under the nonzero rule.
pub(crate) fn covers(path: &BezPath, point: impl Into<Point>) -> bool {
    path.winding(point.into()) != 0
}

fn grid_lines(a: &BezPath, b: &BezPath, axis: fn(Point) -> f64) -> Vec<f64> {
    let mut lines: Vec<f64> = a
        .elements()
        .iter()
        .chain(b.elements())
        .filter_map(|el| el.end_point())
        .map(axis)
        .collect();
    lines.sort_by(f64::total_cmp);
    lines.dedup_by(|next, kept| (*next - *kept).abs() < 1e-6);
    lines
}

/// Fails every operation.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FailingPathOps;

impl PathOps for FailingPathOps {
    fn stroke(&mut self, path: &BezPath, width: f64) -> Result<BezPath, RenderError> {
        _ = path;
        Err(RenderError::Stroke {
            width,
            message: "backend unavailable".into(),
        })
    }

    fn combine(&mut self, a: &BezPath, b: &BezPath, op: PathOp) -> Result<BezPath, RenderError> {
        _ = (a, b);
        Err(RenderError::PathOp {
            op,
            message: "backend unavailable".into(),
        })
    }
}
