// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shadow path algebra.
//!
//! An outer shadow silhouettes what is actually painted, which is not always
//! the shape's path: an outside border widens the silhouette, and a shape
//! with only borders is a ring rather than a solid. The derived *shadow
//! path* captures that silhouette:
//!
//! | fills | borders            | shadow path                                    |
//! |-------|--------------------|------------------------------------------------|
//! | no    | no                 | path                                           |
//! | yes   | no                 | path                                           |
//! | yes   | yes, outside > 0   | stroke(path, 2·outside) ∪ path                 |
//! | yes   | yes, outside = 0   | path                                           |
//! | no    | inside = outside   | stroke(path, 2·inside)                         |
//! | no    | inside ≠ outside   | (stroke(2·in) ∩ path) ∪ (stroke(2·out) − path) |
//! | no    | inside only        | stroke(path, 2·inside) ∩ path                  |
//! | no    | outside only       | stroke(path, 2·outside) − path                 |
//!
//! Whenever the result is the path itself, the same [`Arc`] is returned.

use std::sync::Arc;

use kurbo::{BezPath, Rect, Shape as _};
use lamina_core::style::{BorderPosition, Shadow, Style};

use crate::RenderError;
use crate::backend::{PathOp, PathOps};

/// How far the enabled borders of a style reach into and out of the path.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BorderExtent {
    /// Largest reach towards the interior.
    pub inside: f64,
    /// Largest reach towards the exterior.
    pub outside: f64,
}

impl BorderExtent {
    /// Folds the visible borders of `style`. Center borders count half
    /// their thickness on each side.
    #[must_use]
    pub fn of(style: &Style) -> Self {
        style
            .visible_borders()
            .fold(Self::default(), |acc, border| {
                let t = border.thickness;
                let (inside, outside) = match border.position {
                    BorderPosition::Inside => (t, 0.0),
                    BorderPosition::Outside => (0.0, t),
                    BorderPosition::Center => (t / 2.0, t / 2.0),
                };
                Self {
                    inside: acc.inside.max(inside),
                    outside: acc.outside.max(outside),
                }
            })
    }
}

/// Derives the silhouette used by outer shadows.
pub fn shadow_path(
    path: &Arc<BezPath>,
    style: &Style,
    ops: &mut dyn PathOps,
) -> Result<Arc<BezPath>, RenderError> {
    let has_fill = style.has_enabled_fill();
    let has_border = style.borders.iter().any(|b| b.is_enabled);
    let BorderExtent { inside, outside } = BorderExtent::of(style);

    let derived = match (has_fill, has_border) {
        (_, false) => None,
        (true, true) if outside > 0.0 => {
            let ring = ops.stroke(path, outside * 2.0)?;
            Some(ops.combine(&ring, path, PathOp::Union)?)
        }
        (true, true) => None,
        (false, true) => {
            if inside > 0.0 && outside > 0.0 {
                if inside == outside {
                    Some(ops.stroke(path, inside * 2.0)?)
                } else {
                    let inner = ops.stroke(path, inside * 2.0)?;
                    let inner = ops.combine(&inner, path, PathOp::Intersect)?;
                    let outer = ops.stroke(path, outside * 2.0)?;
                    let outer = ops.combine(&outer, path, PathOp::Difference)?;
                    Some(ops.combine(&inner, &outer, PathOp::Union)?)
                }
            } else if inside > 0.0 {
                let inner = ops.stroke(path, inside * 2.0)?;
                Some(ops.combine(&inner, path, PathOp::Intersect)?)
            } else if outside > 0.0 {
                let outer = ops.stroke(path, outside * 2.0)?;
                Some(ops.combine(&outer, path, PathOp::Difference)?)
            } else {
                None
            }
        }
    };
    Ok(derived.map_or_else(|| Arc::clone(path), Arc::new))
}

/// Expands the shadow path of an outer shadow by its spread.
///
/// With a fill the silhouette grows by `spread` on each side, so the stroke
/// is twice as wide; a border-only ring grows by half as much.
pub fn outer_shadow_geometry(
    shadow_path: &Arc<BezPath>,
    shadow: &Shadow,
    has_fill: bool,
    ops: &mut dyn PathOps,
) -> Result<Arc<BezPath>, RenderError> {
    if shadow.spread == 0.0 {
        return Ok(Arc::clone(shadow_path));
    }
    let width = if has_fill {
        shadow.spread * 2.0
    } else {
        shadow.spread
    };
    let grown = ops.stroke(shadow_path, width)?;
    Ok(Arc::new(ops.combine(&grown, shadow_path, PathOp::Union)?))
}

/// Builds the geometry of an inner shadow, drawn with the inverse even-odd
/// rule and clipped to the path.
///
/// The painted band is everything outside the geometry, so a spread shrinks
/// the geometry to the interior minus a `2·spread` stroke of the outline.
///
/// Inverse fills are unbounded, and backends crop blurred draws to the
/// geometry's bounds. With an offset, a 1×1 rectangle is injected beyond the
/// blurred region so that the cropped area still covers the visible shadow.
pub fn inner_shadow_geometry(
    path: &BezPath,
    shadow: &Shadow,
    ops: &mut dyn PathOps,
) -> Result<BezPath, RenderError> {
    let mut geometry = if shadow.spread != 0.0 {
        let band = ops.stroke(path, shadow.spread * 2.0)?;
        ops.combine(path, &band, PathOp::Difference)?
    } else {
        path.clone()
    };
    if shadow.offset_x != 0.0 || shadow.offset_y != 0.0 {
        let bounds = path.bounding_box();
        let blur = shadow.blur_radius;
        let x = if shadow.offset_x > 0.0 {
            bounds.x0 - shadow.offset_x - blur - 1.0
        } else {
            bounds.x1 - shadow.offset_x + blur
        };
        let y = if shadow.offset_y > 0.0 {
            bounds.y0 - shadow.offset_y - blur - 1.0
        } else {
            bounds.y1 - shadow.offset_y + blur
        };
        geometry.extend(Rect::new(x, y, x + 1.0, y + 1.0).path_elements(0.1));
    }
    Ok(geometry)
}
