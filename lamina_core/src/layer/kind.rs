// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer variants and their per-kind payload.

use kurbo::Point;

use crate::curve::NormalizedCurvePoint;
use crate::style::Color;

/// What a layer is, with the data only that kind carries.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerKind {
    /// The root of a loaded page.
    Page,
    /// A vector outline.
    Shape(ShapeOutline),
    /// Children combined into one outline by their boolean operations.
    ShapeGroup,
    /// A text block.
    Text(TextContent),
    /// A plain container.
    Group,
    /// A top-level board with its own background and clip.
    Artboard(Background),
    /// The definition of a reusable symbol; rendered like an artboard.
    SymbolMaster(Background),
    /// A placed symbol. Its children are the resolved master contents.
    SymbolInstance {
        /// Identifier of the master this instance was resolved from.
        symbol_id: String,
    },
}

impl LayerKind {
    /// Short lowercase name for logs and diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Shape(_) => "shape",
            Self::ShapeGroup => "shape-group",
            Self::Text(_) => "text",
            Self::Group => "group",
            Self::Artboard(_) => "artboard",
            Self::SymbolMaster(_) => "symbol-master",
            Self::SymbolInstance { .. } => "symbol-instance",
        }
    }

    /// Artboards and symbol masters, the boards with title bars.
    #[inline]
    #[must_use]
    pub const fn is_board(&self) -> bool {
        matches!(self, Self::Artboard(_) | Self::SymbolMaster(_))
    }

    /// Whether the layer has an outline of its own (as opposed to a box).
    #[inline]
    #[must_use]
    pub const fn has_outline(&self) -> bool {
        matches!(self, Self::Shape(_) | Self::ShapeGroup | Self::Text(_))
    }
}

/// The control points of a shape, normalized to its frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeOutline {
    /// Points in drawing order.
    pub points: Vec<NormalizedCurvePoint>,
    /// Whether the last point connects back to the first.
    pub is_closed: bool,
}

impl ShapeOutline {
    /// The closed unit square, corners clockwise from the top left, each
    /// rounded by `corner_radius`.
    #[must_use]
    pub fn rectangle(corner_radius: f64) -> Self {
        let corner = |x: f64, y: f64| {
            let point = Point::new(x, y);
            NormalizedCurvePoint {
                point,
                curve_from: point,
                curve_to: point,
                corner_radius,
                ..NormalizedCurvePoint::default()
            }
        };
        Self {
            points: vec![
                corner(0.0, 0.0),
                corner(1.0, 0.0),
                corner(1.0, 1.0),
                corner(0.0, 1.0),
            ],
            is_closed: true,
        }
    }
}

/// Board background.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Background {
    /// Explicit background color, if the document enables one.
    pub color: Option<Color>,
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    /// Flush left.
    #[default]
    Left,
    /// Flush right.
    Right,
    /// Centered.
    Center,
    /// Justified.
    Justified,
}

/// Text payload handed to the text layout backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextContent {
    /// The characters.
    pub text: String,
    /// Font family name.
    pub font_family: String,
    /// Font size in points.
    pub font_size: f64,
    /// Fixed line height, if set.
    pub line_height: Option<f64>,
    /// Alignment.
    pub alignment: TextAlignment,
}

/// How a child of a shape group combines with the siblings before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    /// No operation; treated as a union.
    #[default]
    None,
    /// Add the child's area.
    Union,
    /// Remove the child's area.
    Subtract,
    /// Keep only the overlap.
    Intersect,
    /// Keep everything but the overlap.
    Difference,
}

impl BooleanOp {
    /// Maps the numeric code used in document files.
    #[must_use]
    pub const fn from_code(code: i8) -> Self {
        match code {
            0 => Self::Union,
            1 => Self::Subtract,
            2 => Self::Intersect,
            3 => Self::Difference,
            _ => Self::None,
        }
    }
}
