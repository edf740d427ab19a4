// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors that abort a render pass.
//!
//! Only backend failures live here. Geometry and style anomalies are
//! contained to the affected shape and reported through `log` and the trace
//! sink instead.

use thiserror::Error;

use crate::backend::PathOp;

/// A backend failure. The render pass that hit it is abandoned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A boolean path operation failed.
    #[error("path operation {op:?} failed: {message}")]
    PathOp {
        /// The operation.
        op: PathOp,
        /// Backend message.
        message: String,
    },

    /// Stroke outline generation failed.
    #[error("stroke of width {width} failed: {message}")]
    Stroke {
        /// Requested stroke width.
        width: f64,
        /// Backend message.
        message: String,
    },

    /// The drawing surface could not be created, resized or flushed.
    #[error("surface error: {0}")]
    Surface(String),
}
