// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-viewer interaction state and the tick that drives it.
//!
//! A [`Session`] owns everything that is not document content: the
//! viewport, the pointer controller and the render scheduler. The host
//! pushes platform events into an [`InputQueue`] as they arrive and calls
//! [`Session::tick`] once per display refresh:
//!
//! ```text
//!   InputQueue ──► Session::tick ──┬─► Viewport::on_wheel
//!                                  ├─► PointerController::process
//!                                  └─► RenderScheduler::request_resize
//!                                             │
//!                                             ▼
//!                               RenderScheduler::poll ──► FrameRequest
//! ```

use kurbo::Size;

use crate::controller::PointerController;
use crate::document::PageModel;
use crate::input::{InputEvent, InputQueue};
use crate::layer::{LayerId, LayerStore};
use crate::schedule::{FrameRequest, RenderReason, RenderScheduler, SchedulerConfig};
use crate::selection::HandleConfig;
use crate::time::HostTime;
use crate::trace::Tracer;
use crate::viewport::{Viewport, ViewportConfig};

/// All tuning knobs of a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Pan and zoom.
    pub viewport: ViewportConfig,
    /// Selection overlay geometry.
    pub handles: HandleConfig,
    /// Frame coalescing and input throttling.
    pub scheduler: SchedulerConfig,
}

impl SessionConfig {
    /// All defaults.
    pub const DEFAULT: Self = Self {
        viewport: ViewportConfig::DEFAULT,
        handles: HandleConfig::DEFAULT,
        scheduler: SchedulerConfig::DEFAULT,
    };
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Viewer state for one canvas.
#[derive(Clone, Debug)]
pub struct Session {
    viewport: Viewport,
    pointer: PointerController,
    scheduler: RenderScheduler,
    page: Option<LayerId>,
    surface_size: Size,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::DEFAULT)
    }
}

impl Session {
    /// Creates a session with no page loaded.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            viewport: Viewport::new(config.viewport),
            pointer: PointerController::new(config.handles, config.scheduler.hover_throttle),
            scheduler: RenderScheduler::new(config.scheduler),
            page: None,
            surface_size: Size::ZERO,
        }
    }

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable access to the viewport, e.g. to set the device pixel ratio.
    ///
    /// Changes made here are not rendered until something requests a frame.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The pointer controller.
    #[must_use]
    pub fn pointer(&self) -> &PointerController {
        &self.pointer
    }

    /// Root layer of the loaded page.
    #[must_use]
    pub fn page(&self) -> Option<LayerId> {
        self.page
    }

    /// Last surface size delivered in a [`FrameRequest`].
    #[must_use]
    pub fn surface_size(&self) -> Size {
        self.surface_size
    }

    /// Replaces the loaded page, destroying the previous one.
    pub fn load_page(&mut self, store: &mut LayerStore, page: &PageModel) -> LayerId {
        if let Some(old) = self.page.take() {
            store.unload_page(old);
        }
        self.pointer.reset();
        let root = store.load_page(page);
        self.page = Some(root);
        self.scheduler.request(RenderReason::DocumentLoaded);
        root
    }

    /// Asks for a frame on the next tick.
    pub fn request_render(&mut self) {
        self.scheduler.request(RenderReason::Requested);
    }

    /// Evaluates the store, consumes all queued input and returns the frame
    /// to render, if any.
    pub fn tick(
        &mut self,
        store: &mut LayerStore,
        queue: &mut InputQueue,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Option<FrameRequest> {
        let changes = store.evaluate();
        if !changes.is_empty() {
            self.scheduler.request(RenderReason::Requested);
        }
        if let Some(page) = self.page {
            self.pointer.refresh_overlay(store, page, &self.viewport);
        }

        for event in queue.drain() {
            match event {
                InputEvent::Wheel(wheel) => {
                    if self.viewport.on_wheel(&wheel) {
                        self.scheduler.request(RenderReason::Viewport);
                        if let Some(page) = self.page {
                            self.pointer.refresh_overlay(store, page, &self.viewport);
                        }
                    }
                }
                InputEvent::Resize { size, time } => {
                    self.scheduler.request_resize(size, time);
                }
                InputEvent::PointerMove { .. } | InputEvent::Click { .. } => {
                    let Some(page) = self.page else {
                        continue;
                    };
                    if self.pointer.process(&event, store, page, &self.viewport, tracer) {
                        self.scheduler.request(RenderReason::Overlay);
                    }
                }
            }
        }

        let frame = self.scheduler.poll(now)?;
        if let Some(size) = frame.resize {
            self.surface_size = size;
        }
        Some(frame)
    }
}
