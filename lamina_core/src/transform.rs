// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decomposed 2-D layer transform.
//!
//! A [`Transform`] keeps the four components a design document describes a
//! layer with (position, pivot, scale, rotation) and composes them into a
//! [`kurbo::Affine`] on demand. World transforms are never stored here; they
//! are derived by [`LayerStore::evaluate`](crate::layer::LayerStore::evaluate).

use kurbo::{Affine, Point, Rect, Vec2};

/// Position, pivot, scale and rotation of a layer relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Where the pivot lands in parent space.
    pub position: Point,
    /// The point in local space that rotation and scale are applied around.
    pub pivot: Point,
    /// Per-axis scale; `-1` encodes a flip.
    pub scale: Vec2,
    /// Rotation in radians (clockwise in a y-down space).
    pub rotation: f64,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        position: Point::ZERO,
        pivot: Point::ZERO,
        scale: Vec2::new(1.0, 1.0),
        rotation: 0.0,
    };

    /// Builds the transform of a layer from its frame, flip flags and
    /// declared rotation in degrees.
    ///
    /// The pivot is the frame center in local space and the position is the
    /// frame center in parent space. Flipping one axis reverses the direction
    /// of rotation.
    #[must_use]
    pub fn for_frame(
        frame: Rect,
        flipped_horizontal: bool,
        flipped_vertical: bool,
        rotation_degrees: f64,
    ) -> Self {
        let scale_x = if flipped_horizontal { -1.0 } else { 1.0 };
        let scale_y = if flipped_vertical { -1.0 } else { 1.0 };
        Self {
            position: frame.center(),
            pivot: Point::new(frame.width() / 2.0, frame.height() / 2.0),
            scale: Vec2::new(scale_x, scale_y),
            rotation: -scale_x * scale_y * rotation_degrees.to_radians(),
        }
    }

    /// Composes the components into a local matrix.
    ///
    /// Points are moved so the pivot sits at the origin, scaled, rotated and
    /// finally moved to `position`.
    #[must_use]
    pub fn local_matrix(&self) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::translate(-self.pivot.to_vec2())
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}
