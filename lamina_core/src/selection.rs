// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection box, resize handles and cursors.
//!
//! All geometry here is in canvas CSS pixels. The box is recomputed from the
//! selected layer's world bounds whenever the overlay is refreshed; nothing
//! here is persisted.
//!
//! ```text
//!   ■───────────────■      ■ corner handles (size × size)
//!   │               │      edge bands extend `edge_band` either side
//!   │               │      of each edge
//!   ■───────────────■
//! ```

use kurbo::{Point, Rect};

use crate::geometry::contains_inclusive;
use crate::layer::LayerId;

/// Overlay geometry tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleConfig {
    /// Side length of a corner handle.
    pub handle_size: f64,
    /// Half-thickness of an edge band.
    pub edge_band: f64,
    /// Height of the title bar drawn above boards.
    pub title_height: f64,
}

impl HandleConfig {
    /// Defaults matching common design tools.
    pub const DEFAULT: Self = Self {
        handle_size: 6.0,
        edge_band: 5.0,
        title_height: 20.0,
    };

    /// How far a corner handle extends past the corner on the outer side.
    #[inline]
    #[must_use]
    pub fn handle_offset(&self) -> f64 {
        self.handle_size / 2.0 - 1.0
    }
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which part of the selection box the pointer is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragDirection {
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl DragDirection {
    /// The resize cursor for this direction.
    #[must_use]
    pub const fn cursor(self) -> Cursor {
        match self {
            Self::Top | Self::Bottom => Cursor::NsResize,
            Self::Left | Self::Right => Cursor::EwResize,
            Self::TopLeft | Self::BottomRight => Cursor::NwseResize,
            Self::TopRight | Self::BottomLeft => Cursor::NeswResize,
        }
    }
}

/// Pointer cursor requested from the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Platform default.
    #[default]
    Auto,
    /// Vertical resize.
    NsResize,
    /// Horizontal resize.
    EwResize,
    /// Diagonal resize, top-left to bottom-right.
    NwseResize,
    /// Diagonal resize, top-right to bottom-left.
    NeswResize,
}

impl Cursor {
    /// CSS cursor keyword.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::NsResize => "ns-resize",
            Self::EwResize => "ew-resize",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
        }
    }
}

/// A hit region of the selection box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleHit {
    /// The region's rectangle.
    pub rect: Rect,
    /// What dragging it would do.
    pub direction: DragDirection,
}

/// Selected and hovered layers plus the selection box geometry.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    config: HandleConfig,
    selected: Option<LayerId>,
    hovered: Option<LayerId>,
    drag_direction: Option<DragDirection>,
    actual_frame: Option<Rect>,
    handles: [Rect; 4],
}

impl SelectionState {
    /// Creates an empty selection.
    #[must_use]
    pub fn new(config: HandleConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The selected layer.
    #[must_use]
    pub fn selected(&self) -> Option<LayerId> {
        self.selected
    }

    /// The hovered layer.
    #[must_use]
    pub fn hovered(&self) -> Option<LayerId> {
        self.hovered
    }

    /// The region found by the last successful [`find_handle`](Self::find_handle).
    #[must_use]
    pub fn drag_direction(&self) -> Option<DragDirection> {
        self.drag_direction
    }

    /// The selection box in canvas pixels.
    #[must_use]
    pub fn actual_frame(&self) -> Option<Rect> {
        self.actual_frame
    }

    /// Corner handles in the order top-left, top-right, bottom-left,
    /// bottom-right. Empty when nothing is selected.
    #[must_use]
    pub fn handles(&self) -> &[Rect] {
        if self.actual_frame.is_some() {
            &self.handles
        } else {
            &[]
        }
    }

    /// Selects `layer`. Returns whether the selection changed.
    pub fn select(&mut self, layer: Option<LayerId>) -> bool {
        let changed = self.selected != layer;
        self.selected = layer;
        if layer.is_none() {
            self.set_actual_frame(None);
        }
        changed
    }

    /// Marks `layer` as hovered. Returns whether the hover changed.
    pub fn hover(&mut self, layer: Option<LayerId>) -> bool {
        let changed = self.hovered != layer;
        self.hovered = layer;
        changed
    }

    /// Replaces the selection box and recomputes the handle squares.
    pub fn set_actual_frame(&mut self, frame: Option<Rect>) {
        self.actual_frame = frame;
        let Some(f) = frame else {
            return;
        };
        let size = self.config.handle_size;
        let inner = self.config.handle_offset();
        let outer = size - inner;
        let square = |x: f64, y: f64| Rect::from_origin_size((x, y), (size, size));
        self.handles = [
            square(f.x0 - inner, f.y0 - inner),
            square(f.x1 - outer, f.y0 - inner),
            square(f.x0 - inner, f.y1 - outer),
            square(f.x1 - outer, f.y1 - outer),
        ];
    }

    /// Finds the handle or edge band under `point`, corners first.
    ///
    /// Records the direction of a hit as the current drag direction.
    pub fn find_handle(&mut self, point: Point) -> Option<HandleHit> {
        let frame = self.actual_frame?;
        let corners = [
            DragDirection::TopLeft,
            DragDirection::TopRight,
            DragDirection::BottomLeft,
            DragDirection::BottomRight,
        ];
        let corner_hit = self
            .handles
            .iter()
            .zip(corners)
            .find(|(rect, _)| contains_inclusive(**rect, point))
            .map(|(&rect, direction)| HandleHit { rect, direction });

        let hit = corner_hit.or_else(|| {
            edge_bands(frame, self.config.edge_band)
                .into_iter()
                .find(|hit| contains_inclusive(hit.rect, point))
        });
        if let Some(hit) = hit {
            self.drag_direction = Some(hit.direction);
        }
        hit
    }
}

fn edge_bands(f: Rect, band: f64) -> [HandleHit; 4] {
    let across = band * 2.0;
    [
        HandleHit {
            rect: Rect::from_origin_size((f.x0, f.y0 - band), (f.width(), across)),
            direction: DragDirection::Top,
        },
        HandleHit {
            rect: Rect::from_origin_size((f.x1 - band, f.y0), (across, f.height())),
            direction: DragDirection::Right,
        },
        HandleHit {
            rect: Rect::from_origin_size((f.x0, f.y1 - band), (f.width(), across)),
            direction: DragDirection::Bottom,
        },
        HandleHit {
            rect: Rect::from_origin_size((f.x0 - band, f.y0), (across, f.height())),
            direction: DragDirection::Left,
        },
    ]
}
