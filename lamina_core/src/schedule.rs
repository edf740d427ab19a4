// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render request coalescing and resize debouncing.
//!
//! Rendering is tick driven. Anything that changes what is on screen calls
//! [`RenderScheduler::request`]; the host polls once per tick and renders at
//! most one frame, however many requests arrived. Resizes are debounced so
//! that dragging a window edge does not reallocate the surface every tick.

use kurbo::Size;

use crate::time::{Duration, HostTime};

/// Timing tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Quiet period after the last resize before the surface is resized.
    pub resize_debounce: Duration,
    /// Minimum interval between two hover resolutions.
    pub hover_throttle: Duration,
}

impl SchedulerConfig {
    /// 200 ms resize debounce, 100 ms hover throttle.
    pub const DEFAULT: Self = Self {
        resize_debounce: Duration::from_millis(200),
        hover_throttle: Duration::from_millis(100),
    };
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Why a frame is being rendered. The first reason since the last frame
/// wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderReason {
    /// A page was loaded.
    DocumentLoaded,
    /// The host asked explicitly.
    Requested,
    /// Pan or zoom changed.
    Viewport,
    /// Selection or hover changed.
    Overlay,
    /// The debounced resize fired.
    Resize,
}

/// One frame to render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRequest {
    /// Why the frame is needed.
    pub reason: RenderReason,
    /// New surface size in CSS pixels, when the surface must be resized first.
    pub resize: Option<Size>,
}

/// Coalesces render requests into at most one frame per tick.
#[derive(Clone, Debug, Default)]
pub struct RenderScheduler {
    config: SchedulerConfig,
    pending: Option<RenderReason>,
    resize_deadline: Option<HostTime>,
    pending_size: Option<Size>,
    frames: u64,
}

impl RenderScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Asks for a frame on the next poll.
    pub fn request(&mut self, reason: RenderReason) {
        self.pending.get_or_insert(reason);
    }

    /// Records a resize. Each call pushes the deadline back.
    pub fn request_resize(&mut self, size: Size, now: HostTime) {
        self.pending_size = Some(size);
        self.resize_deadline = Some(now + self.config.resize_debounce);
    }

    /// Whether a frame or resize is outstanding.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some() || self.resize_deadline.is_some()
    }

    /// Returns the frame to render at `now`, if any.
    pub fn poll(&mut self, now: HostTime) -> Option<FrameRequest> {
        let resize = match self.resize_deadline {
            Some(deadline) if now >= deadline => {
                self.resize_deadline = None;
                self.pending_size.take()
            }
            _ => None,
        };
        let reason = match (self.pending.take(), resize) {
            (Some(reason), _) => reason,
            (None, Some(_)) => RenderReason::Resize,
            (None, None) => return None,
        };
        self.frames += 1;
        Some(FrameRequest { reason, resize })
    }

    /// Number of frames handed out so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_coalesce() {
        let mut s = RenderScheduler::new(SchedulerConfig::DEFAULT);
        s.request(RenderReason::Viewport);
        s.request(RenderReason::Overlay);
        let frame = s.poll(HostTime::from_millis(0)).expect("frame");
        assert_eq!(frame.reason, RenderReason::Viewport);
        assert!(s.poll(HostTime::from_millis(1)).is_none());
        assert_eq!(s.frames(), 1);
    }

    #[test]
    fn resize_waits_for_quiet_period() {
        let mut s = RenderScheduler::new(SchedulerConfig::DEFAULT);
        s.request_resize(Size::new(800.0, 600.0), HostTime::from_millis(0));
        s.request_resize(Size::new(820.0, 600.0), HostTime::from_millis(150));
        assert!(s.poll(HostTime::from_millis(300)).is_none());
        let frame = s.poll(HostTime::from_millis(350)).expect("frame");
        assert_eq!(frame.reason, RenderReason::Resize);
        assert_eq!(frame.resize, Some(Size::new(820.0, 600.0)));
        assert!(!s.has_pending());
    }

    #[test]
    fn resize_rides_along_with_pending_request() {
        let mut s = RenderScheduler::new(SchedulerConfig::DEFAULT);
        s.request_resize(Size::new(100.0, 100.0), HostTime::from_millis(0));
        s.request(RenderReason::Requested);
        let early = s.poll(HostTime::from_millis(10)).expect("frame");
        assert_eq!(early.resize, None);
        assert!(s.has_pending());
        let late = s.poll(HostTime::from_millis(250)).expect("frame");
        assert_eq!(late.resize, Some(Size::new(100.0, 100.0)));
    }
}
