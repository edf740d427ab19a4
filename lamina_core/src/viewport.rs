// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan and zoom of the page on the canvas.
//!
//! The viewport maps page coordinates to device pixels:
//!
//! ```text
//! device = translate(position) · scale(scale) · page
//! canvas = device / dpi
//! ```
//!
//! Wheel input pans by default and zooms with Ctrl/Cmd held. Zoom steps are
//! quantized to one decimal and anchored at the pointer, so the page point
//! under the pointer stays put.

use kurbo::{Affine, Point, Rect, Vec2};

use crate::input::{DeltaMode, WheelEvent};
use crate::style::Color;

/// Viewport tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Smallest zoom factor.
    pub min_scale: f64,
    /// Largest zoom factor.
    pub max_scale: f64,
    /// Multiplier applied per zoom tick.
    pub zoom_step: f64,
    /// Pixel-mode wheel distance that makes one zoom tick.
    pub pixels_per_tick: f64,
    /// Clear color behind the page.
    pub background: Color,
}

impl ViewportConfig {
    /// Defaults matching common design tools.
    pub const DEFAULT: Self = Self {
        min_scale: 0.1,
        max_scale: 10.0,
        zoom_step: 1.1,
        pixels_per_tick: 30.0,
        background: Color::new(249.0 / 255.0, 249.0 / 255.0, 249.0 / 255.0, 1.0),
    };
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Current pan and zoom.
#[derive(Clone, Debug)]
pub struct Viewport {
    config: ViewportConfig,
    scale: f64,
    position: Point,
    dpi: f64,
    zoom_origin: Option<Point>,
    tick_accumulator: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::DEFAULT)
    }
}

impl Viewport {
    /// Creates an unzoomed, unpanned viewport at 1 device pixel per CSS
    /// pixel.
    #[must_use]
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            scale: 1.0,
            position: Point::ZERO,
            dpi: 1.0,
            zoom_origin: None,
            tick_accumulator: 0.0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Zoom factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Translation in device pixels.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Device pixels per CSS pixel.
    #[must_use]
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Sets the device pixel ratio.
    pub fn set_dpi(&mut self, dpi: f64) {
        self.dpi = dpi;
    }

    /// Moves the page to `position` (device pixels).
    pub fn set_position(&mut self, position: Point) -> bool {
        let changed = position != self.position;
        self.position = position;
        changed
    }

    /// Page to device-pixel matrix.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        Affine::translate(self.position.to_vec2()) * Affine::scale(self.scale)
    }

    /// Maps a canvas point (CSS pixels) into page coordinates.
    #[must_use]
    pub fn canvas_to_page(&self, point: Point) -> Point {
        let device = Point::new(point.x * self.dpi, point.y * self.dpi);
        self.matrix().inverse() * device
    }

    /// Maps a page rectangle to canvas CSS pixels.
    #[must_use]
    pub fn page_rect_to_canvas(&self, rect: Rect) -> Rect {
        let device = self.matrix().transform_rect_bbox(rect);
        device.scale_from_origin(1.0 / self.dpi)
    }

    /// Handles a wheel event. Returns whether the viewport changed.
    pub fn on_wheel(&mut self, event: &WheelEvent) -> bool {
        if event.modifiers.command() {
            let ticks = self.wheel_ticks(event);
            if ticks == 0 {
                return false;
            }
            self.zoom_origin = Some(Point::new(
                event.offset.x * self.dpi,
                event.offset.y * self.dpi,
            ));
            if ticks > 0 {
                self.zoom_in(ticks.unsigned_abs())
            } else {
                self.zoom_out(ticks.unsigned_abs())
            }
        } else {
            self.set_position(self.position - event.delta)
        }
    }

    /// Zooms in by `steps`, anchored at the last zoom origin if any.
    pub fn zoom_in(&mut self, steps: u32) -> bool {
        let mut scale = self.scale;
        for _ in 0..steps {
            scale = ceil_tenth(round_hundredth(scale * self.config.zoom_step))
                .min(self.config.max_scale);
        }
        self.set_scale(scale)
    }

    /// Zooms out by `steps`, anchored at the last zoom origin if any.
    pub fn zoom_out(&mut self, steps: u32) -> bool {
        let mut scale = self.scale;
        for _ in 0..steps {
            scale = floor_tenth(round_hundredth(scale / self.config.zoom_step))
                .max(self.config.min_scale);
        }
        self.set_scale(scale)
    }

    /// Sets the zoom factor, keeping the zoom origin (or the device origin)
    /// fixed on screen. The zoom origin is consumed.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        let old = self.scale;
        let origin = self.zoom_origin.take().unwrap_or(Point::ZERO);
        if scale == old {
            return false;
        }
        let anchor: Vec2 = (origin - self.position) / old;
        self.position -= anchor * (scale - old);
        self.scale = scale;
        log::trace!("zoom {old} -> {scale}");
        true
    }

    /// Converts a wheel event into whole zoom ticks, positive to zoom in.
    fn wheel_ticks(&mut self, event: &WheelEvent) -> i32 {
        let delta = normalized_wheel_delta(event.delta);
        match event.delta_mode {
            DeltaMode::Line | DeltaMode::Page if delta.abs() >= 1.0 => sign(delta),
            DeltaMode::Line | DeltaMode::Page => self.accumulate(delta),
            DeltaMode::Pixel => self.accumulate(delta / self.config.pixels_per_tick),
        }
    }

    fn accumulate(&mut self, delta: f64) -> i32 {
        if self.tick_accumulator != 0.0 && sign(self.tick_accumulator) != sign(delta) {
            self.tick_accumulator = 0.0;
        }
        self.tick_accumulator += delta;
        let whole = self.tick_accumulator.abs().floor();
        let ticks = f64::from(sign(self.tick_accumulator)) * whole;
        self.tick_accumulator -= ticks;
        whole_ticks(ticks)
    }
}

/// Collapses a 2-D wheel delta into a signed magnitude.
///
/// Scrolling down or right (angles in `(−π/4, 3π/4)`) yields a negative
/// value, i.e. zooms out.
#[must_use]
pub fn normalized_wheel_delta(delta: Vec2) -> f64 {
    let magnitude = delta.hypot();
    let angle = delta.y.atan2(delta.x);
    let quarter = core::f64::consts::FRAC_PI_4;
    if angle > -quarter && angle < 3.0 * quarter {
        -magnitude
    } else {
        magnitude
    }
}

fn sign(x: f64) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "tick counts per event are small integers"
)]
fn whole_ticks(x: f64) -> i32 {
    x as i32
}

fn round_hundredth(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// The epsilons absorb representation error such as 1.1 * 10 = 11.000000000000002.
fn ceil_tenth(x: f64) -> f64 {
    (x * 10.0 - 1e-9).ceil() / 10.0
}

fn floor_tenth(x: f64) -> f64 {
    (x * 10.0 + 1e-9).floor() / 10.0
}
