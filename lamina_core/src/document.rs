// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-side input model.
//!
//! Parsing document files is someone else's job. Whatever does it hands the
//! core a [`PageModel`] tree through [`DocumentProvider`], and
//! [`LayerStore::load_page`](crate::layer::LayerStore::load_page) flattens
//! that tree into the arena.

use kurbo::Rect;

use crate::layer::{BooleanOp, LayerFlags, LayerKind};
use crate::style::Style;

/// One layer as described by the document.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerModel {
    /// Display name.
    pub name: String,
    /// Variant and its payload.
    pub kind: LayerKind,
    /// Frame in the parent's coordinate space.
    pub frame: Rect,
    /// Rotation in degrees, counter-clockwise as displayed.
    pub rotation: f64,
    /// Visibility, lock, mask and flip flags.
    pub flags: LayerFlags,
    /// Style.
    pub style: Style,
    /// Combination rule inside a shape group.
    pub boolean_operation: BooleanOp,
    /// Children, bottom to top.
    pub children: Vec<Self>,
}

impl LayerModel {
    /// A visible layer with default style and no children.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: LayerKind, frame: Rect) -> Self {
        Self {
            name: name.into(),
            kind,
            frame,
            rotation: 0.0,
            flags: LayerFlags::DEFAULT,
            style: Style::default(),
            boolean_operation: BooleanOp::None,
            children: Vec::new(),
        }
    }

    /// Replaces the style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replaces the flags.
    #[must_use]
    pub fn with_flags(mut self, flags: LayerFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Appends a child on top of the existing ones.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

/// One page of a document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageModel {
    /// Display name.
    pub name: String,
    /// Top-level layers, bottom to top.
    pub layers: Vec<LayerModel>,
}

/// Source of parsed pages.
pub trait DocumentProvider {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// The page at `index`, if it exists.
    fn page(&self, index: usize) -> Option<&PageModel>;
}

impl DocumentProvider for Vec<PageModel> {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page(&self, index: usize) -> Option<&PageModel> {
        self.get(index)
    }
}
