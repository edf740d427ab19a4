// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer handling: clicks select, moves hover.
//!
//! ```text
//! Idle ── click ──▶ handle? ── yes ──▶ Idle (drag direction recorded)
//!                      │ no
//!                      ▼
//!                 title bar? ── yes ──▶ select board
//!                      │ no
//!                      ▼
//!                 hit test (deep with Ctrl/Cmd) ──▶ select result
//!
//! Idle ── move (throttled) ──▶ handle? ── yes ──▶ resize cursor
//!                                 │ no
//!                                 ▼
//!                            hit test ──▶ hovered layer, default cursor
//! ```
//!
//! The controller reads the layer store and the viewport but never mutates
//! render state; callers request a frame when it reports a change.

use kurbo::{Point, Rect};

use crate::geometry::contains_inclusive;
use crate::hit::{HitMode, hit_test};
use crate::input::{InputEvent, Modifiers};
use crate::layer::{LayerId, LayerStore};
use crate::selection::{Cursor, HandleConfig, SelectionState};
use crate::time::{Duration, HostTime};
use crate::trace::{HitTestEvent, Tracer};
use crate::viewport::Viewport;

/// Clickable strip above a top-level board, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TitleBar {
    /// The board.
    pub layer: LayerId,
    /// The strip.
    pub rect: Rect,
}

/// Resolves pointer events against the scene.
#[derive(Clone, Debug)]
pub struct PointerController {
    config: HandleConfig,
    hover_throttle: Duration,
    selection: SelectionState,
    cursor: Cursor,
    last_hover: Option<HostTime>,
    title_bars: Vec<TitleBar>,
}

impl PointerController {
    /// Creates a controller with nothing selected.
    #[must_use]
    pub fn new(config: HandleConfig, hover_throttle: Duration) -> Self {
        Self {
            config,
            hover_throttle,
            selection: SelectionState::new(config),
            cursor: Cursor::Auto,
            last_hover: None,
            title_bars: Vec::new(),
        }
    }

    /// Selection and hover state.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Cursor the host should show.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Title bars of the current page, bottom to top.
    #[must_use]
    pub fn title_bars(&self) -> &[TitleBar] {
        &self.title_bars
    }

    /// Clears selection, hover and overlays, e.g. when a page is unloaded.
    pub fn reset(&mut self) {
        self.selection = SelectionState::new(self.config);
        self.cursor = Cursor::Auto;
        self.last_hover = None;
        self.title_bars.clear();
    }

    /// Recomputes title bars and the selection box from the evaluated store.
    ///
    /// Call after the store was evaluated or the viewport changed.
    pub fn refresh_overlay(&mut self, store: &LayerStore, page: LayerId, viewport: &Viewport) {
        let height = self.config.title_height;
        self.title_bars = store
            .children(page)
            .filter(|&id| store.kind(id).is_board() && store.flags(id).visible)
            .map(|id| {
                let frame = viewport.page_rect_to_canvas(store.world_bounds(id));
                TitleBar {
                    layer: id,
                    rect: Rect::new(frame.x0, frame.y0 - height, frame.x1, frame.y0),
                }
            })
            .collect();

        if let Some(selected) = self.selection.selected() {
            if store.is_alive(selected) {
                let frame = viewport.page_rect_to_canvas(store.world_bounds(selected));
                self.selection.set_actual_frame(Some(frame));
            } else {
                self.selection.select(None);
            }
        }
        if self.selection.hovered().is_some_and(|id| !store.is_alive(id)) {
            self.selection.hover(None);
        }
    }

    /// Handles one pointer event. Returns whether selection or hover changed.
    ///
    /// Non-pointer events are ignored.
    pub fn process(
        &mut self,
        event: &InputEvent,
        store: &LayerStore,
        page: LayerId,
        viewport: &Viewport,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        match *event {
            InputEvent::Click {
                position,
                modifiers,
                ..
            } => self.on_click(store, page, viewport, position, modifiers, tracer),
            InputEvent::PointerMove {
                position,
                modifiers,
                time,
            } => self.on_move(store, page, viewport, position, modifiers, time, tracer),
            InputEvent::Wheel(_) | InputEvent::Resize { .. } => false,
        }
    }

    fn on_click(
        &mut self,
        store: &LayerStore,
        page: LayerId,
        viewport: &Viewport,
        position: Point,
        modifiers: Modifiers,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if self.selection.find_handle(position).is_some() {
            return false;
        }
        let board = self
            .title_bars
            .iter()
            .rev()
            .find(|bar| contains_inclusive(bar.rect, position))
            .map(|bar| bar.layer);
        let target = match board {
            Some(board) => Some(board),
            None => resolve(store, page, viewport, position, modifiers, tracer),
        };

        let changed = self.selection.select(target);
        if let Some(id) = target {
            let frame = viewport.page_rect_to_canvas(store.world_bounds(id));
            self.selection.set_actual_frame(Some(frame));
            log::debug!("selected {:?} {:?}", id, store.name(id));
        }
        changed
    }

    fn on_move(
        &mut self,
        store: &LayerStore,
        page: LayerId,
        viewport: &Viewport,
        position: Point,
        modifiers: Modifiers,
        time: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if let Some(last) = self.last_hover {
            if time.saturating_duration_since(last) < self.hover_throttle {
                return false;
            }
        }
        self.last_hover = Some(time);

        if let Some(hit) = self.selection.find_handle(position) {
            self.cursor = hit.direction.cursor();
            return false;
        }
        self.cursor = Cursor::Auto;
        let target = resolve(store, page, viewport, position, modifiers, tracer);
        self.selection.hover(target)
    }
}

fn resolve(
    store: &LayerStore,
    page: LayerId,
    viewport: &Viewport,
    position: Point,
    modifiers: Modifiers,
    tracer: &mut Tracer<'_>,
) -> Option<LayerId> {
    let mode = if modifiers.command() {
        HitMode::Deep
    } else {
        HitMode::Shallow
    };
    let point = viewport.canvas_to_page(position);
    let result = hit_test(store, page, point, mode);
    tracer.hit_test(&HitTestEvent {
        point,
        mode,
        result: result.map(LayerId::index),
    });
    result
}
