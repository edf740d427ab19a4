// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path synthesis from curve points, including corner rounding.
//!
//! Each consecutive pair of points becomes one segment: a line when neither
//! end supplies a handle, a cubic otherwise. A straight point with a positive
//! corner radius is replaced by two tangent points joined by a cubic arc
//! approximation. The distance from the vertex to each tangent point is
//! clamped so that neighbouring arcs never overlap:
//!
//! ```text
//!        A ─────────── t_in ╮
//!                           │  arc (handle_in, handle_out)
//!                           ╰ t_out
//!                             │
//!                             C
//! ```
//!
//! The first and last points of an open path never round.

use kurbo::{BezPath, Point};

use crate::curve::CurvePoint;
use crate::geometry::angle_abc;

/// Edges shorter than this cannot carry a corner.
const MIN_EDGE: f64 = 1e-9;

/// The resolved geometry of one rounded corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerGeometry {
    /// Tangent point on the edge arriving from the previous point.
    pub tangent_in: Point,
    /// Tangent point on the edge leaving towards the next point.
    pub tangent_out: Point,
    /// First control point of the arc.
    pub handle_in: Point,
    /// Second control point of the arc.
    pub handle_out: Point,
    /// Radius after clamping.
    pub radius: f64,
}

#[derive(Clone, Copy, Debug)]
enum CornerSlot {
    Pending,
    Plain,
    Rounded(CornerGeometry),
}

/// Builds a path from `points`.
///
/// Returns `None` for fewer than two points.
#[must_use]
pub fn build_path(points: &[CurvePoint], is_closed: bool) -> Option<BezPath> {
    PathBuilder::new(points, is_closed).build()
}

/// Single-use path builder.
///
/// Corner geometry is computed at most once per point index and reused by
/// both segments that touch the corner.
#[derive(Debug)]
pub struct PathBuilder<'a> {
    points: &'a [CurvePoint],
    is_closed: bool,
    corners: Vec<CornerSlot>,
}

impl<'a> PathBuilder<'a> {
    /// Creates a builder over `points`.
    #[must_use]
    pub fn new(points: &'a [CurvePoint], is_closed: bool) -> Self {
        Self {
            points,
            is_closed,
            corners: vec![CornerSlot::Pending; points.len()],
        }
    }

    /// Emits the path.
    #[must_use]
    pub fn build(mut self) -> Option<BezPath> {
        let len = self.points.len();
        if len < 2 {
            log::debug!("path with {len} point(s) skipped");
            return None;
        }

        let mut path = BezPath::new();
        for i in 0..len - 1 {
            self.connect(&mut path, i, i + 1);
        }
        if self.is_closed {
            self.connect(&mut path, len - 1, 0);
            path.close_path();
        }
        Some(path)
    }

    /// Returns the rounded geometry at `idx`, or `None` for a plain vertex.
    pub fn corner(&mut self, idx: usize) -> Option<CornerGeometry> {
        match self.corners[idx] {
            CornerSlot::Rounded(geometry) => Some(geometry),
            CornerSlot::Plain => None,
            CornerSlot::Pending => {
                let geometry = if self.rounds_at(idx) {
                    self.compute_corner(idx)
                } else {
                    None
                };
                self.corners[idx] = match geometry {
                    Some(g) => CornerSlot::Rounded(g),
                    None => CornerSlot::Plain,
                };
                geometry
            }
        }
    }

    fn rounds_at(&self, idx: usize) -> bool {
        let is_endpoint = idx == 0 || idx == self.points.len() - 1;
        if !self.is_closed && is_endpoint {
            return false;
        }
        self.points[idx].is_corner_candidate()
    }

    fn compute_corner(&self, idx: usize) -> Option<CornerGeometry> {
        let len = self.points.len();
        let prev = &self.points[(idx + len - 1) % len];
        let cur = &self.points[idx];
        let next = &self.points[(idx + 1) % len];

        let to_prev = prev.point - cur.point;
        let to_next = next.point - cur.point;
        let len_prev = to_prev.hypot();
        let len_next = to_next.hypot();
        let theta = angle_abc(prev.point, cur.point, next.point);
        if len_prev < MIN_EDGE || len_next < MIN_EDGE || !theta.is_finite() {
            log::warn!("degenerate corner at point {idx}; drawing a plain vertex");
            return None;
        }

        let half_tan = (theta / 2.0).tan();
        let limit_prev = if prev.is_corner_candidate() {
            len_prev / 2.0
        } else {
            len_prev
        };
        let limit_next = if next.is_corner_candidate() {
            len_next / 2.0
        } else {
            len_next
        };
        let limit = limit_prev.min(limit_next);

        let mut radius = cur.corner_radius;
        let mut dist = radius / half_tan;
        // A zero angle gives an infinite (or NaN) distance.
        if dist.is_nan() || dist > limit {
            dist = limit;
            radius = dist * half_tan;
        }

        let dir_prev = to_prev / len_prev;
        let dir_next = to_next / len_next;
        let tangent_in = cur.point + dir_prev * dist;
        let tangent_out = cur.point + dir_next * dist;

        let kappa = 4.0 / 3.0 * ((core::f64::consts::PI - theta) / 4.0).tan();
        let handle_len = -radius * kappa;
        Some(CornerGeometry {
            tangent_in,
            tangent_out,
            handle_in: tangent_in + dir_prev * handle_len,
            handle_out: tangent_out + dir_next * handle_len,
            radius,
        })
    }

    fn connect(&mut self, path: &mut BezPath, from: usize, to: usize) {
        let (start, start_handle) = match self.corner(from) {
            Some(c) => (c.tangent_out, None),
            None => {
                let p = &self.points[from];
                (p.point, p.has_curve_from.then_some(p.curve_from))
            }
        };
        if path.elements().is_empty() {
            path.move_to(start);
        }

        let end_corner = self.corner(to);
        let (end, end_handle) = match end_corner {
            Some(c) => (c.tangent_in, None),
            None => {
                let p = &self.points[to];
                (p.point, p.has_curve_to.then_some(p.curve_to))
            }
        };

        if start_handle.is_none() && end_handle.is_none() {
            path.line_to(end);
        } else {
            path.curve_to(
                start_handle.unwrap_or(start),
                end_handle.unwrap_or(end),
                end,
            );
        }

        if let Some(c) = end_corner {
            path.curve_to(c.handle_in, c.handle_out, c.tangent_out);
        }
    }
}
