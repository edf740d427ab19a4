// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving style entries into backend paints.
//!
//! A [`Paint`] is a plain value: what to draw with ([`Shader`]), how
//! ([`PaintStyle`]), and how to composite it. Gradient endpoints and
//! pattern placement are resolved against the frame size here so that the
//! compositor only deals with ready-to-draw values.

use kurbo::{Affine, Cap, Join, Point, Size, Stroke};
use lamina_core::style::{
    BlendMode, Border, BorderOptions, BorderPosition, Color, ContextSettings, Fill, FillType,
    Gradient, GradientKind, GradientStop, LineCap, LineJoin, PatternFit, Shadow,
};
use lamina_core::trace::SkipReason;

use crate::backend::{Image, ImageSource};

/// How a shader extends beyond its defined area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileMode {
    /// Repeat the edge color.
    #[default]
    Clamp,
    /// Repeat the whole image.
    Repeat,
    /// Transparent outside.
    Decal,
}

/// Source of color for a paint.
#[derive(Clone, Debug, PartialEq)]
pub enum Shader {
    /// One color.
    Solid(Color),
    /// Linear gradient between two points, clamped.
    Linear {
        /// Start point in layer space.
        start: Point,
        /// End point in layer space.
        end: Point,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Radial gradient, clamped.
    Radial {
        /// Center in layer space.
        center: Point,
        /// Radius.
        radius: f64,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Sweep gradient around a center, clamped.
    Sweep {
        /// Center in layer space.
        center: Point,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// An image placed by `matrix`.
    Image {
        /// The image.
        image: Image,
        /// Image space to layer space.
        matrix: Affine,
        /// Tiling on both axes.
        tile: TileMode,
    },
}

/// Fill or stroke.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintStyle {
    /// Fill the interior.
    Fill,
    /// Stroke the outline.
    Stroke(Stroke),
}

/// Everything needed to draw one path.
#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    /// Color source.
    pub shader: Shader,
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Opacity applied on top of the shader's own alpha.
    pub alpha: f32,
    /// Blend mode.
    pub blend_mode: BlendMode,
    /// Gaussian mask blur sigma.
    pub blur_sigma: Option<f64>,
    /// Always on for document content.
    pub anti_alias: bool,
}

impl Paint {
    /// An anti-aliased solid fill.
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self {
            shader: Shader::Solid(color),
            style: PaintStyle::Fill,
            alpha: 1.0,
            blend_mode: BlendMode::Normal,
            blur_sigma: None,
            anti_alias: true,
        }
    }

    /// Applies per-entry opacity and blend mode.
    #[must_use]
    pub fn with_context(mut self, settings: &ContextSettings) -> Self {
        self.anti_alias = true;
        if settings.opacity != 1.0 {
            self.alpha = settings.opacity;
        }
        if settings.blend_mode != BlendMode::Normal {
            self.blend_mode = settings.blend_mode;
        }
        self
    }

    /// Turns the paint into a stroke.
    #[must_use]
    pub fn stroked(mut self, stroke: Stroke) -> Self {
        self.style = PaintStyle::Stroke(stroke);
        self
    }

    /// Stroke width, or `None` for a fill.
    #[must_use]
    pub fn stroke_width(&self) -> Option<f64> {
        match &self.style {
            PaintStyle::Fill => None,
            PaintStyle::Stroke(stroke) => Some(stroke.width),
        }
    }
}

/// Converts a design-tool blur radius into a Gaussian sigma.
#[must_use]
pub fn blur_sigma(radius: f64) -> f64 {
    if radius > 0.0 {
        0.57735 * radius + 0.5
    } else {
        0.0
    }
}

/// Resolves a fill.
///
/// Fails with [`SkipReason::MissingImage`] when a pattern image is absent
/// or cannot be resolved.
pub fn fill_paint(
    fill: &Fill,
    frame: Size,
    images: &mut dyn ImageSource,
) -> Result<Paint, SkipReason> {
    let shader = match fill.fill_type {
        FillType::Color => Shader::Solid(fill.color),
        FillType::Gradient => match &fill.gradient {
            Some(gradient) => gradient_shader(gradient, frame),
            None => Shader::Solid(fill.color),
        },
        FillType::Pattern => {
            let image = fill
                .image
                .as_ref()
                .and_then(|r| images.resolve(r))
                .ok_or(SkipReason::MissingImage)?;
            let (matrix, tile) = pattern_placement(fill.pattern_fit, image.size, frame, fill.tile_scale);
            Shader::Image {
                image,
                matrix,
                tile,
            }
        }
    };
    Ok(Paint {
        shader,
        ..Paint::solid(Color::BLACK)
    }
    .with_context(&fill.context_settings))
}

/// Resolves a border into a stroke paint.
///
/// Inside and outside borders are stroked at twice their thickness; the
/// caller clips away the half that falls on the wrong side of the path.
pub fn border_paint(
    border: &Border,
    frame: Size,
    options: Option<&BorderOptions>,
) -> Result<Paint, SkipReason> {
    let shader = match (border.fill_type, &border.gradient) {
        (FillType::Color, _) | (FillType::Gradient, None) => Shader::Solid(border.color),
        (FillType::Gradient, Some(gradient)) => gradient_shader(gradient, frame),
        (FillType::Pattern, _) => return Err(SkipReason::UnsupportedBorderFill),
    };
    let width = match border.position {
        BorderPosition::Center => border.thickness,
        BorderPosition::Inside | BorderPosition::Outside => border.thickness * 2.0,
    };
    let mut stroke = Stroke::new(width).with_join(Join::Miter).with_caps(Cap::Butt);
    if let Some(options) = options.filter(|o| o.is_enabled) {
        stroke = stroke
            .with_caps(cap(options.line_cap))
            .with_join(join(options.line_join));
        if !options.dash_pattern.is_empty() {
            stroke = stroke.with_dashes(0.0, options.dash_pattern.iter().copied());
        }
    }
    Ok(Paint {
        shader,
        ..Paint::solid(Color::BLACK)
    }
    .stroked(stroke)
    .with_context(&border.context_settings))
}

/// Resolves a shadow into a blurred fill paint.
#[must_use]
pub fn shadow_paint(shadow: &Shadow) -> Paint {
    Paint {
        blur_sigma: Some(blur_sigma(shadow.blur_radius)),
        ..Paint::solid(shadow.color)
    }
    .with_context(&shadow.context_settings)
}

/// Builds a gradient shader with endpoints scaled from unit space to `frame`.
#[must_use]
pub fn gradient_shader(gradient: &Gradient, frame: Size) -> Shader {
    let scale = |p: Point| Point::new(p.x * frame.width, p.y * frame.height);
    let from = scale(gradient.from);
    let to = scale(gradient.to);
    let stops = gradient.stops.clone();
    match gradient.kind {
        GradientKind::Linear => Shader::Linear {
            start: from,
            end: to,
            stops,
        },
        GradientKind::Radial => Shader::Radial {
            center: from,
            radius: from.distance(to),
            stops,
        },
        GradientKind::Angular => Shader::Sweep {
            center: from,
            stops,
        },
    }
}

/// Places a pattern image inside `frame`.
///
/// - Tile repeats the image at `tile_scale`.
/// - Stretch scales both axes independently.
/// - Fill matches one axis and centers the overflow of the other.
/// - Fit matches one axis and centers the remaining gap on the other.
#[must_use]
pub fn pattern_placement(
    fit: PatternFit,
    image: Size,
    frame: Size,
    tile_scale: f64,
) -> (Affine, TileMode) {
    let ratio_x = frame.width / image.width;
    let ratio_y = frame.height / image.height;
    // The image is thinner than the frame when its aspect ratio is smaller.
    let is_thin = image.width / image.height < frame.width / frame.height;

    let fit_width = match fit {
        PatternFit::Tile => return (Affine::scale(tile_scale), TileMode::Repeat),
        PatternFit::Stretch => {
            return (Affine::scale_non_uniform(ratio_x, ratio_y), TileMode::Decal);
        }
        PatternFit::Fill => is_thin,
        PatternFit::Fit => !is_thin,
    };

    let matrix = if fit_width {
        let y_offset = -(image.height * ratio_x - frame.height) / 2.0;
        Affine::translate((0.0, y_offset)) * Affine::scale(ratio_x)
    } else {
        let x_offset = -(image.width * ratio_y - frame.width) / 2.0;
        Affine::translate((x_offset, 0.0)) * Affine::scale(ratio_y)
    };
    (matrix, TileMode::Decal)
}

fn cap(cap: LineCap) -> Cap {
    match cap {
        LineCap::Butt => Cap::Butt,
        LineCap::Round => Cap::Round,
        LineCap::Square => Cap::Square,
    }
}

fn join(join: LineJoin) -> Join {
    match join {
        LineJoin::Miter => Join::Miter,
        LineJoin::Round => Join::Round,
        LineJoin::Bevel => Join::Bevel,
    }
}

#[cfg(test)]
mod tests {
    use lamina_core::style::ImageRef;

    use super::*;
    use crate::backend::NoImages;

    struct OneImage(Size);

    impl ImageSource for OneImage {
        fn resolve(&mut self, image: &ImageRef) -> Option<Image> {
            Some(Image {
                source: image.clone(),
                size: self.0,
            })
        }
    }

    fn near(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sigma_conversion() {
        assert!(near(blur_sigma(0.0), 0.0));
        assert!(near(blur_sigma(10.0), 6.2735));
    }

    #[test]
    fn radial_gradient_radius_is_scaled_distance() {
        let gradient = Gradient {
            kind: GradientKind::Radial,
            from: Point::new(0.5, 0.5),
            to: Point::new(0.5, 1.0),
            stops: Vec::new(),
        };
        let Shader::Radial { center, radius, .. } = gradient_shader(&gradient, Size::new(200.0, 100.0))
        else {
            panic!("expected a radial shader");
        };
        assert_eq!(center, Point::new(100.0, 50.0));
        assert!(near(radius, 50.0));
    }

    #[test]
    fn stretch_scales_axes_independently() {
        let (m, tile) = pattern_placement(
            PatternFit::Stretch,
            Size::new(50.0, 50.0),
            Size::new(100.0, 200.0),
            1.0,
        );
        assert_eq!(tile, TileMode::Decal);
        assert_eq!(m * Point::new(50.0, 50.0), Point::new(100.0, 200.0));
    }

    #[test]
    fn fill_covers_and_centers_overflow() {
        // A square image in a wide frame is thin: match width, crop height.
        let (m, _) = pattern_placement(
            PatternFit::Fill,
            Size::new(100.0, 100.0),
            Size::new(200.0, 100.0),
            1.0,
        );
        assert_eq!(m * Point::ZERO, Point::new(0.0, -50.0));
        assert_eq!(m * Point::new(100.0, 100.0), Point::new(200.0, 150.0));
    }

    #[test]
    fn fit_letterboxes() {
        let (m, _) = pattern_placement(
            PatternFit::Fit,
            Size::new(100.0, 100.0),
            Size::new(200.0, 100.0),
            1.0,
        );
        assert_eq!(m * Point::ZERO, Point::new(50.0, 0.0));
        assert_eq!(m * Point::new(100.0, 100.0), Point::new(150.0, 100.0));
    }

    #[test]
    fn tile_repeats_at_scale() {
        let (m, tile) = pattern_placement(
            PatternFit::Tile,
            Size::new(10.0, 10.0),
            Size::new(100.0, 100.0),
            0.5,
        );
        assert_eq!(tile, TileMode::Repeat);
        assert_eq!(m * Point::new(10.0, 10.0), Point::new(5.0, 5.0));
    }

    #[test]
    fn missing_pattern_image_is_skipped() {
        let fill = Fill::pattern(ImageRef("images/a.png".into()), PatternFit::Fill);
        assert_eq!(
            fill_paint(&fill, Size::new(10.0, 10.0), &mut NoImages),
            Err(SkipReason::MissingImage)
        );
        let paint = fill_paint(&fill, Size::new(10.0, 10.0), &mut OneImage(Size::new(5.0, 5.0)))
            .expect("resolved");
        assert!(matches!(paint.shader, Shader::Image { .. }));
    }

    #[test]
    fn context_settings_apply_only_when_not_default() {
        let mut fill = Fill::solid(Color::WHITE);
        let plain = fill_paint(&fill, Size::new(1.0, 1.0), &mut NoImages).expect("paint");
        assert_eq!(plain.alpha, 1.0);
        assert_eq!(plain.blend_mode, BlendMode::Normal);

        fill.context_settings = ContextSettings {
            opacity: 0.5,
            blend_mode: BlendMode::Multiply,
        };
        let tinted = fill_paint(&fill, Size::new(1.0, 1.0), &mut NoImages).expect("paint");
        assert_eq!(tinted.alpha, 0.5);
        assert_eq!(tinted.blend_mode, BlendMode::Multiply);
        assert!(tinted.anti_alias);
    }

    #[test]
    fn border_widths_and_options() {
        let size = Size::new(10.0, 10.0);
        let center = Border::solid(BorderPosition::Center, 3.0, Color::BLACK);
        let inside = Border::solid(BorderPosition::Inside, 3.0, Color::BLACK);
        assert_eq!(border_paint(&center, size, None).expect("paint").stroke_width(), Some(3.0));
        assert_eq!(border_paint(&inside, size, None).expect("paint").stroke_width(), Some(6.0));

        let options = BorderOptions {
            is_enabled: true,
            dash_pattern: vec![4.0, 2.0],
            line_cap: LineCap::Round,
            line_join: LineJoin::Bevel,
        };
        let paint = border_paint(&center, size, Some(&options)).expect("paint");
        let PaintStyle::Stroke(stroke) = paint.style else {
            panic!("expected a stroke");
        };
        assert_eq!(stroke.join, Join::Bevel);
        assert_eq!(stroke.start_cap, Cap::Round);
        assert_eq!(stroke.dash_pattern.as_slice(), &[4.0, 2.0]);
    }

    #[test]
    fn pattern_borders_are_unsupported() {
        let border = Border {
            fill_type: FillType::Pattern,
            ..Border::solid(BorderPosition::Center, 1.0, Color::BLACK)
        };
        assert_eq!(
            border_paint(&border, Size::new(1.0, 1.0), None),
            Err(SkipReason::UnsupportedBorderFill)
        );
    }
}
