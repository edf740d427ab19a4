// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, JSON and SVG export for lamina diagnostics.
//!
//! - [`pretty::PrettyPrintSink`]: a [`TraceSink`](lamina_core::trace::TraceSink)
//!   writing one line per event, and [`pretty::write_draw_list`] for an
//!   indented listing of a recorded pass.
//! - [`json::export`]: a recorded [`DrawList`](lamina_render::record::DrawList)
//!   as a JSON array, one object per canvas call.
//! - [`svg::export`]: the same list rendered as an SVG document, for eyeballing
//!   a pass in a browser.

pub mod json;
pub mod pretty;
pub mod svg;
