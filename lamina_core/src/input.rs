// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host input events and the per-tick queue that carries them.
//!
//! Hosts translate their native events into [`InputEvent`]s and push them
//! into an [`InputQueue`]. The queue is drained once per tick by
//! [`Session::tick`](crate::session::Session::tick), so handlers never run
//! re-entrantly from inside a host callback.

use std::collections::VecDeque;

use kurbo::{Point, Size, Vec2};

use crate::time::HostTime;

/// Keyboard modifiers held during an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control.
    pub ctrl: bool,
    /// Command on macOS, the Windows key elsewhere.
    pub meta: bool,
    /// Shift.
    pub shift: bool,
    /// Alt / Option.
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    /// Only Control.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Only Meta.
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Ctrl or Meta, the modifiers that switch to deep selection and zoom.
    #[inline]
    #[must_use]
    pub const fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Unit of wheel deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeltaMode {
    /// Pixels (trackpads, high-resolution wheels).
    #[default]
    Pixel,
    /// Lines (classic wheels).
    Line,
    /// Pages.
    Page,
}

/// A wheel or trackpad scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Scroll delta.
    pub delta: Vec2,
    /// Unit of `delta`.
    pub delta_mode: DeltaMode,
    /// Pointer position in canvas CSS pixels.
    pub offset: Point,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

/// One host event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// The pointer moved over the canvas.
    PointerMove {
        /// Position in canvas CSS pixels.
        position: Point,
        /// Held modifiers.
        modifiers: Modifiers,
        /// Event timestamp.
        time: HostTime,
    },
    /// A primary click, or a context-menu click that hosts report as one.
    Click {
        /// Position in canvas CSS pixels.
        position: Point,
        /// Held modifiers.
        modifiers: Modifiers,
        /// Event timestamp.
        time: HostTime,
    },
    /// Wheel or trackpad scroll.
    Wheel(WheelEvent),
    /// The canvas element changed size.
    Resize {
        /// New size in CSS pixels.
        size: Size,
        /// Event timestamp.
        time: HostTime,
    },
}

/// FIFO of pending input events.
#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes and yields all pending events in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}
