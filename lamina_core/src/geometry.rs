// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small geometric helpers on top of `kurbo`.

use kurbo::{Affine, Point, Rect};

/// Returns the angle at `b` formed by the rays `b → a` and `b → c`, in
/// radians within `[0, π]`.
#[must_use]
pub fn angle_abc(a: Point, b: Point, c: Point) -> f64 {
    let ba = a - b;
    let bc = c - b;
    ba.cross(bc).abs().atan2(ba.dot(bc))
}

/// Returns whether `rect` contains `pt`, edges included.
///
/// [`Rect::contains`] treats the far edges as outside; hit regions in the
/// editor include them.
#[must_use]
pub fn contains_inclusive(rect: Rect, pt: Point) -> bool {
    let r = rect.abs();
    pt.x >= r.x0 && pt.x <= r.x1 && pt.y >= r.y0 && pt.y <= r.y1
}

/// The frame moved to the origin, i.e. the layer's own bounds in local space.
#[must_use]
pub fn local_bounds(frame: Rect) -> Rect {
    Rect::from_origin_size(Point::ZERO, frame.size())
}

/// Axis-aligned bounds of `rect` after applying `transform`.
#[must_use]
pub fn transformed_bounds(transform: Affine, rect: Rect) -> Rect {
    transform.transform_rect_bbox(rect)
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    #[test]
    fn right_angle() {
        let angle = angle_abc(Point::new(0.0, 10.0), Point::ZERO, Point::new(10.0, 0.0));
        assert!((angle - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn straight_line_is_pi() {
        let angle = angle_abc(Point::new(-5.0, 0.0), Point::ZERO, Point::new(3.0, 0.0));
        assert!((angle - PI).abs() < 1e-12);
    }

    #[test]
    fn inclusive_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(contains_inclusive(r, Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(10.0, 10.0)));
        assert!(!contains_inclusive(r, Point::new(10.5, 3.0)));
    }

    #[test]
    fn transformed_bounds_of_rotation() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = transformed_bounds(Affine::rotate(FRAC_PI_2), r);
        assert!((b.x0 + 10.0).abs() < 1e-9);
        assert!((b.x1).abs() < 1e-9);
        assert!((b.height() - 10.0).abs() < 1e-9);
    }
}
