// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the 2D graphics backend.
//!
//! The renderer never talks to a GPU library directly. It issues calls on a
//! [`Canvas`], asks [`PathOps`] for stroke outlines and boolean operations,
//! resolves pattern images through [`ImageSource`] and lays out text through
//! [`TextLayout`]. The last three are bundled in a [`RenderContext`] that is
//! passed explicitly into every render pass, so tests can substitute
//! recording doubles and several viewers can share one process.
//!
//! Paths cross the seam as [`kurbo::BezPath`]; fill rules and clip
//! operations travel alongside as plain enums.

use std::sync::Arc;

use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};
use lamina_core::layer::TextContent;
use lamina_core::style::{BlendMode, Color, ImageRef, Shadow};
use lamina_core::trace::Tracer;

use crate::RenderError;
use crate::paint::Paint;

/// How a clip combines with the current clip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClipOp {
    /// Keep the inside of the geometry.
    #[default]
    Intersect,
    /// Keep the outside of the geometry.
    Difference,
}

/// Fill rule for drawing a path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillRule {
    /// Nonzero winding.
    #[default]
    NonZero,
    /// Even-odd.
    EvenOdd,
    /// Everything outside the even-odd interior. Unbounded.
    InverseEvenOdd,
}

/// Boolean path operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathOp {
    /// A ∪ B.
    Union,
    /// A ∩ B.
    Intersect,
    /// A − B.
    Difference,
    /// (A ∪ B) − (A ∩ B).
    Xor,
}

/// Geometry services of the backend.
pub trait PathOps {
    /// Outline of `path` stroked with `width`, centered on the path.
    fn stroke(&mut self, path: &BezPath, width: f64) -> Result<BezPath, RenderError>;

    /// Combines two paths.
    fn combine(&mut self, a: &BezPath, b: &BezPath, op: PathOp) -> Result<BezPath, RenderError>;
}

/// Parameters of an offscreen layer opened with [`Canvas::save_layer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerPaint {
    /// Group opacity.
    pub opacity: f32,
    /// Blend mode used when compositing the layer back.
    pub blend_mode: BlendMode,
    /// Gaussian blur sigma applied to the layer's content.
    pub blur_sigma: Option<f64>,
}

/// Drawing surface.
///
/// All geometry is in the current user space, which starts as device
/// pixels and is changed by [`concat`](Self::concat) and
/// [`translate`](Self::translate). `save`/`save_layer` push the matrix and
/// clip; `restore` pops them.
pub trait Canvas {
    /// Pushes matrix and clip.
    fn save(&mut self);

    /// Pushes matrix and clip and redirects drawing into an offscreen layer
    /// composited with `paint` on the matching restore.
    fn save_layer(&mut self, paint: &LayerPaint);

    /// Pops the most recent save.
    fn restore(&mut self);

    /// Pre-multiplies the current matrix.
    fn concat(&mut self, transform: Affine);

    /// Pre-translates the current matrix.
    fn translate(&mut self, offset: Vec2);

    /// Clips to a path (nonzero fill).
    fn clip_path(&mut self, path: &BezPath, op: ClipOp);

    /// Clips to a rectangle.
    fn clip_rect(&mut self, rect: Rect, op: ClipOp);

    /// Draws a path.
    fn draw_path(&mut self, path: &BezPath, fill_rule: FillRule, paint: &Paint);

    /// Draws a rectangle.
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);

    /// Draws a laid-out paragraph with its top-left corner at `origin`.
    ///
    /// `shadows` are text shadows drawn beneath the glyphs.
    fn draw_paragraph(
        &mut self,
        paragraph: &Paragraph,
        origin: Point,
        paint: &Paint,
        shadows: &[Shadow],
    );

    /// Fills the whole surface, ignoring matrix and clip.
    fn clear(&mut self, color: Color);

    /// Submits pending work.
    fn flush(&mut self) -> Result<(), RenderError>;
}

/// A decoded image known to the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    /// Document reference it was resolved from.
    pub source: ImageRef,
    /// Pixel size.
    pub size: Size,
}

/// Resolves image references found in pattern fills.
pub trait ImageSource {
    /// Returns the image, or `None` when it is unknown or failed to decode.
    fn resolve(&mut self, image: &ImageRef) -> Option<Image>;
}

/// A paragraph laid out by the text backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    /// Backend handle.
    pub id: u64,
    /// Laid-out size.
    pub size: Size,
    /// Glyph outlines, when the backend can produce them.
    pub outline: Option<Arc<BezPath>>,
}

/// Lays out text layers.
pub trait TextLayout {
    /// Lays out `content` wrapped at `width`.
    fn layout(&mut self, content: &TextContent, width: f64) -> Option<Paragraph>;
}

/// Backend services and diagnostics for one render pass.
pub struct RenderContext<'a> {
    /// Stroke and boolean operations.
    pub path_ops: &'a mut dyn PathOps,
    /// Pattern images.
    pub images: &'a mut dyn ImageSource,
    /// Text layout.
    pub text: &'a mut dyn TextLayout,
    /// Structured diagnostics.
    pub tracer: Tracer<'a>,
}

impl core::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderContext")
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}

impl<'a> RenderContext<'a> {
    /// Bundles backend services without tracing.
    #[must_use]
    pub fn new(
        path_ops: &'a mut dyn PathOps,
        images: &'a mut dyn ImageSource,
        text: &'a mut dyn TextLayout,
    ) -> Self {
        Self {
            path_ops,
            images,
            text,
            tracer: Tracer::none(),
        }
    }

    /// Replaces the tracer.
    #[must_use]
    pub fn with_tracer(mut self, tracer: Tracer<'a>) -> Self {
        self.tracer = tracer;
        self
    }
}

/// An [`ImageSource`] that knows no images.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoImages;

impl ImageSource for NoImages {
    fn resolve(&mut self, image: &ImageRef) -> Option<Image> {
        _ = image;
        None
    }
}

/// A [`TextLayout`] that lays out nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoText;

impl TextLayout for NoText {
    fn layout(&mut self, content: &TextContent, width: f64) -> Option<Paragraph> {
        _ = (content, width);
        None
    }
}
