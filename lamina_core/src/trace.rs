// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for render passes and pointer resolution.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! renderer and the pointer controller call. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Recoverable anomalies are reported twice: once through the `log` facade
//! for humans, and once as a [`LayerSkippedEvent`] for tools.

use kurbo::Point;

use crate::hit::HitMode;
use crate::style::BlurKind;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a layer, or one effect of it, was not drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The outline has fewer than two points.
    NoPath,
    /// A blur variant the renderer cannot draw.
    UnsupportedBlur(BlurKind),
    /// A border painted with an image.
    UnsupportedBorderFill,
    /// A pattern fill whose image could not be resolved.
    MissingImage,
    /// The text layout backend produced nothing.
    NoTextLayout,
}

impl SkipReason {
    /// Short description for logs.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::NoPath => "no path",
            Self::UnsupportedBlur(_) => "unsupported blur",
            Self::UnsupportedBorderFill => "unsupported border fill",
            Self::MissingImage => "missing image",
            Self::NoTextLayout => "no text layout",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a render pass starts.
#[derive(Clone, Copy, Debug)]
pub struct RenderBeginEvent {
    /// Monotonic pass counter.
    pub frame_index: u64,
    /// Live layers in the store.
    pub layer_count: usize,
}

/// Emitted when a render pass completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Monotonic pass counter.
    pub frame_index: u64,
    /// Layers that issued draw calls.
    pub layers_drawn: u32,
    /// Hidden layers and layers with nothing drawable.
    pub layers_skipped: u32,
    /// Clipping masks applied.
    pub masks_applied: u32,
    /// Paint steps replayed.
    pub paint_steps: u32,
    /// Paint plans served from cache.
    pub cache_hits: u32,
    /// Paint plans built this pass.
    pub cache_misses: u32,
}

/// Emitted when a layer or one of its effects is skipped.
#[derive(Clone, Copy, Debug)]
pub struct LayerSkippedEvent {
    /// Raw slot index of the layer.
    pub layer: u32,
    /// Why.
    pub reason: SkipReason,
}

/// Emitted after a pointer position was resolved to a layer.
#[derive(Clone, Copy, Debug)]
pub struct HitTestEvent {
    /// Point in page coordinates.
    pub point: Point,
    /// Resolution mode.
    pub mode: HitMode,
    /// Raw slot index of the resolved layer.
    pub result: Option<u32>,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a render pass starts.
    fn on_render_begin(&mut self, e: &RenderBeginEvent) {
        _ = e;
    }

    /// Called when a render pass completes.
    fn on_render_summary(&mut self, s: &RenderSummary) {
        _ = s;
    }

    /// Called when a layer or effect is skipped.
    fn on_layer_skipped(&mut self, e: &LayerSkippedEvent) {
        _ = e;
    }

    /// Called after a hit test.
    fn on_hit_test(&mut self, e: &HitTestEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Default for Tracer<'_> {
    fn default() -> Self {
        Self::none()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`RenderBeginEvent`].
    #[inline]
    pub fn render_begin(&mut self, e: &RenderBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_render_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RenderSummary`].
    #[inline]
    pub fn render_summary(&mut self, s: &RenderSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_render_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`LayerSkippedEvent`].
    #[inline]
    pub fn layer_skipped(&mut self, e: &LayerSkippedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layer_skipped(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HitTestEvent`].
    #[inline]
    pub fn hit_test(&mut self, e: &HitTestEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_hit_test(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_render_begin(&RenderBeginEvent {
            frame_index: 0,
            layer_count: 3,
        });
        sink.on_render_summary(&RenderSummary::default());
        sink.on_layer_skipped(&LayerSkippedEvent {
            layer: 1,
            reason: SkipReason::NoPath,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.render_summary(&RenderSummary::default());
        tracer.hit_test(&HitTestEvent {
            point: Point::ZERO,
            mode: HitMode::Deep,
            result: None,
        });
    }

    #[test]
    fn reasons_describe_themselves() {
        assert_eq!(
            SkipReason::UnsupportedBlur(BlurKind::Zoom).describe(),
            "unsupported blur"
        );
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        struct RecordingSink {
            skipped: Vec<(u32, SkipReason)>,
        }
        impl TraceSink for RecordingSink {
            fn on_layer_skipped(&mut self, e: &LayerSkippedEvent) {
                self.skipped.push((e.layer, e.reason));
            }
        }

        let mut sink = RecordingSink {
            skipped: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.layer_skipped(&LayerSkippedEvent {
            layer: 7,
            reason: SkipReason::MissingImage,
        });
        drop(tracer);
        assert_eq!(sink.skipped, &[(7, SkipReason::MissingImage)]);
    }
}
