// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve control points.
//!
//! Documents describe shape outlines as a list of control points whose
//! coordinates are normalized to the unit square of the owning layer's frame.
//! [`NormalizedCurvePoint`] is that document record; [`CurvePoint`] is the
//! same point resolved against a concrete frame size, ready for
//! [`build_path`](crate::path::build_path).

use kurbo::{Point, Size};

/// How the two handles of a control point relate to each other.
///
/// Only [`Straight`](Self::Straight) points take part in corner rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CurveMode {
    /// A sharp vertex, optionally rounded by its corner radius.
    #[default]
    Straight,
    /// Both handles mirror each other in angle and length.
    Mirrored,
    /// Handles share an angle but not a length.
    Asymmetric,
    /// Handles are independent.
    Disconnected,
}

impl CurveMode {
    /// Maps the numeric code used in document files.
    ///
    /// Unknown codes fall back to [`Straight`](Self::Straight).
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            2 => Self::Mirrored,
            3 => Self::Disconnected,
            4 => Self::Asymmetric,
            _ => Self::Straight,
        }
    }
}

/// A control point as stored in the document, in unit-square coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedCurvePoint {
    /// The vertex.
    pub point: Point,
    /// Handle controlling the segment leaving this point.
    pub curve_from: Point,
    /// Handle controlling the segment arriving at this point.
    pub curve_to: Point,
    /// Whether `curve_from` is meaningful.
    pub has_curve_from: bool,
    /// Whether `curve_to` is meaningful.
    pub has_curve_to: bool,
    /// Handle relationship.
    pub curve_mode: CurveMode,
    /// Corner radius in frame units.
    pub corner_radius: f64,
}

/// A control point in the local coordinate space of its layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint {
    /// The vertex.
    pub point: Point,
    /// Handle controlling the segment leaving this point.
    pub curve_from: Point,
    /// Handle controlling the segment arriving at this point.
    pub curve_to: Point,
    /// Whether `curve_from` is meaningful.
    pub has_curve_from: bool,
    /// Whether `curve_to` is meaningful.
    pub has_curve_to: bool,
    /// Handle relationship.
    pub curve_mode: CurveMode,
    /// Corner radius; never negative.
    pub corner_radius: f64,
}

impl CurvePoint {
    /// A plain straight vertex with no handles and no rounding.
    #[must_use]
    pub const fn vertex(point: Point) -> Self {
        Self {
            point,
            curve_from: point,
            curve_to: point,
            has_curve_from: false,
            has_curve_to: false,
            curve_mode: CurveMode::Straight,
            corner_radius: 0.0,
        }
    }

    /// A straight vertex rounded with `radius`.
    #[must_use]
    pub fn rounded(point: Point, radius: f64) -> Self {
        Self {
            corner_radius: radius.max(0.0),
            ..Self::vertex(point)
        }
    }

    /// Resolves a document point against the frame size of its layer.
    #[must_use]
    pub fn from_normalized(raw: &NormalizedCurvePoint, size: Size) -> Self {
        let scale = |p: Point| Point::new(p.x * size.width, p.y * size.height);
        Self {
            point: scale(raw.point),
            curve_from: scale(raw.curve_from),
            curve_to: scale(raw.curve_to),
            has_curve_from: raw.has_curve_from,
            has_curve_to: raw.has_curve_to,
            curve_mode: raw.curve_mode,
            corner_radius: raw.corner_radius.max(0.0),
        }
    }

    /// Whether this point asks for a rounded corner.
    ///
    /// Endpoints of open paths are candidates too; the path builder decides
    /// whether a candidate is actually rounded.
    #[inline]
    #[must_use]
    pub fn is_corner_candidate(&self) -> bool {
        self.curve_mode == CurveMode::Straight && self.corner_radius > 0.0
    }
}

/// Resolves a whole point list against a frame size.
#[must_use]
pub fn resolve_points(raw: &[NormalizedCurvePoint], size: Size) -> Vec<CurvePoint> {
    raw.iter()
        .map(|p| CurvePoint::from_normalized(p, size))
        .collect()
}
