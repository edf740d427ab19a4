// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer style model.
//!
//! A [`Style`] lists fills, borders, outer and inner shadows, layer-level
//! context settings, an optional blur and optional border options. Every
//! entry carries an `is_enabled` flag; disabled entries are kept so that the
//! declaration order of the document survives toggling.

use kurbo::Point;

/// A straight (non-premultiplied) RGBA color with components in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red.
    pub red: f32,
    /// Green.
    pub green: f32,
    /// Blue.
    pub blue: f32,
    /// Alpha.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a color from its components.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(
            f32::from(red) / 255.0,
            f32::from(green) / 255.0,
            f32::from(blue) / 255.0,
            1.0,
        )
    }

    /// Returns this color with its alpha multiplied by `factor`.
    #[must_use]
    pub fn multiply_alpha(self, factor: f32) -> Self {
        Self {
            alpha: self.alpha * factor,
            ..self
        }
    }
}

/// Porter-Duff and separable/non-separable blend modes of the document model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Source over.
    #[default]
    Normal,
    /// Darken.
    Darken,
    /// Multiply.
    Multiply,
    /// Color burn.
    ColorBurn,
    /// Lighten.
    Lighten,
    /// Screen.
    Screen,
    /// Color dodge.
    ColorDodge,
    /// Overlay.
    Overlay,
    /// Soft light.
    SoftLight,
    /// Hard light.
    HardLight,
    /// Difference.
    Difference,
    /// Exclusion.
    Exclusion,
    /// Hue.
    Hue,
    /// Saturation.
    Saturation,
    /// Color.
    Color,
    /// Luminosity.
    Luminosity,
    /// Plus darker.
    PlusDarker,
    /// Plus lighter.
    PlusLighter,
}

impl BlendMode {
    /// Maps the numeric code used in document files.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Darken,
            2 => Self::Multiply,
            3 => Self::ColorBurn,
            4 => Self::Lighten,
            5 => Self::Screen,
            6 => Self::ColorDodge,
            7 => Self::Overlay,
            8 => Self::SoftLight,
            9 => Self::HardLight,
            10 => Self::Difference,
            11 => Self::Exclusion,
            12 => Self::Hue,
            13 => Self::Saturation,
            14 => Self::Color,
            15 => Self::Luminosity,
            16 => Self::PlusDarker,
            17 => Self::PlusLighter,
            _ => Self::Normal,
        }
    }
}

/// Opacity and blend mode applied to a layer or to a single style entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContextSettings {
    /// Opacity in `0..=1`.
    pub opacity: f32,
    /// Blend mode.
    pub blend_mode: BlendMode,
}

impl ContextSettings {
    /// Fully opaque, normal blending.
    pub const DEFAULT: Self = Self {
        opacity: 1.0,
        blend_mode: BlendMode::Normal,
    };

    /// Whether these settings change anything when applied.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.opacity == 1.0 && self.blend_mode == BlendMode::Normal
    }
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What a fill or border paints with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillType {
    /// A solid color.
    #[default]
    Color,
    /// A gradient.
    Gradient,
    /// An image.
    Pattern,
}

/// Gradient geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientKind {
    /// Along the line `from → to`.
    #[default]
    Linear,
    /// Circles around `from` with radius `|to − from|`.
    Radial,
    /// Sweep around `from`.
    Angular,
}

/// A color stop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Offset along the gradient in `0..=1`.
    pub position: f32,
    /// Stop color.
    pub color: Color,
}

/// A gradient with endpoints normalized to the layer frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    /// Geometry.
    pub kind: GradientKind,
    /// Start point, normalized.
    pub from: Point,
    /// End point, normalized.
    pub to: Point,
    /// Stops, ordered by position.
    pub stops: Vec<GradientStop>,
}

/// Placement of a pattern image inside the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PatternFit {
    /// Repeat the image at `tile_scale`.
    Tile,
    /// Cover the frame, cropping the overflow.
    #[default]
    Fill,
    /// Scale both axes independently to the frame.
    Stretch,
    /// Show the whole image, letterboxed.
    Fit,
}

impl PatternFit {
    /// Maps the numeric code used in document files.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Tile,
            2 => Self::Stretch,
            3 => Self::Fit,
            _ => Self::Fill,
        }
    }
}

/// Reference to an image owned by the document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageRef(pub String);

/// One fill entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    /// Whether the fill is painted.
    pub is_enabled: bool,
    /// What the fill paints with.
    pub fill_type: FillType,
    /// Color for [`FillType::Color`].
    pub color: Color,
    /// Gradient for [`FillType::Gradient`].
    pub gradient: Option<Gradient>,
    /// Image for [`FillType::Pattern`].
    pub image: Option<ImageRef>,
    /// Placement for [`FillType::Pattern`].
    pub pattern_fit: PatternFit,
    /// Scale for [`PatternFit::Tile`].
    pub tile_scale: f64,
    /// Per-fill opacity and blend mode.
    pub context_settings: ContextSettings,
}

impl Fill {
    /// An enabled solid fill.
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self {
            is_enabled: true,
            fill_type: FillType::Color,
            color,
            gradient: None,
            image: None,
            pattern_fit: PatternFit::Fill,
            tile_scale: 1.0,
            context_settings: ContextSettings::DEFAULT,
        }
    }

    /// An enabled gradient fill.
    #[must_use]
    pub fn gradient(gradient: Gradient) -> Self {
        Self {
            fill_type: FillType::Gradient,
            gradient: Some(gradient),
            ..Self::solid(Color::BLACK)
        }
    }

    /// An enabled image fill.
    #[must_use]
    pub fn pattern(image: ImageRef, fit: PatternFit) -> Self {
        Self {
            fill_type: FillType::Pattern,
            image: Some(image),
            pattern_fit: fit,
            ..Self::solid(Color::BLACK)
        }
    }
}

/// Where a border sits relative to the outline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderPosition {
    /// Straddles the outline.
    #[default]
    Center,
    /// Entirely inside.
    Inside,
    /// Entirely outside.
    Outside,
}

impl BorderPosition {
    /// Maps the numeric code used in document files.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Inside,
            2 => Self::Outside,
            _ => Self::Center,
        }
    }
}

/// One border entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Border {
    /// Whether the border is painted.
    pub is_enabled: bool,
    /// What the border paints with.
    pub fill_type: FillType,
    /// Color for [`FillType::Color`].
    pub color: Color,
    /// Gradient for [`FillType::Gradient`].
    pub gradient: Option<Gradient>,
    /// Placement relative to the outline.
    pub position: BorderPosition,
    /// Visible width.
    pub thickness: f64,
    /// Per-border opacity and blend mode.
    pub context_settings: ContextSettings,
}

impl Border {
    /// An enabled solid border.
    #[must_use]
    pub fn solid(position: BorderPosition, thickness: f64, color: Color) -> Self {
        Self {
            is_enabled: true,
            fill_type: FillType::Color,
            color,
            gradient: None,
            position,
            thickness,
            context_settings: ContextSettings::DEFAULT,
        }
    }

    /// Whether the border is enabled and has a visible width.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.is_enabled && self.thickness > 0.0
    }
}

/// Stroke end caps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
    /// Flat, ending at the endpoint.
    #[default]
    Butt,
    /// Semicircular.
    Round,
    /// Square, extending half the width.
    Square,
}

/// Stroke joins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineJoin {
    /// Sharp.
    #[default]
    Miter,
    /// Rounded.
    Round,
    /// Cut off.
    Bevel,
}

/// Stroke options shared by all borders of a style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BorderOptions {
    /// Whether the options apply.
    pub is_enabled: bool,
    /// Alternating dash and gap lengths.
    pub dash_pattern: Vec<f64>,
    /// End caps.
    pub line_cap: LineCap,
    /// Joins.
    pub line_join: LineJoin,
}

/// One shadow entry, outer or inner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Whether the shadow is painted.
    pub is_enabled: bool,
    /// Inner shadows paint inside the outline.
    pub is_inner: bool,
    /// Horizontal offset.
    pub offset_x: f64,
    /// Vertical offset.
    pub offset_y: f64,
    /// Blur radius.
    pub blur_radius: f64,
    /// Outline expansion before blurring.
    pub spread: f64,
    /// Shadow color.
    pub color: Color,
    /// Per-shadow opacity and blend mode.
    pub context_settings: ContextSettings,
}

impl Shadow {
    /// An enabled outer shadow.
    #[must_use]
    pub fn outer(offset_x: f64, offset_y: f64, blur_radius: f64, spread: f64, color: Color) -> Self {
        Self {
            is_enabled: true,
            is_inner: false,
            offset_x,
            offset_y,
            blur_radius,
            spread,
            color,
            context_settings: ContextSettings::DEFAULT,
        }
    }

    /// An enabled inner shadow.
    #[must_use]
    pub fn inner(offset_x: f64, offset_y: f64, blur_radius: f64, spread: f64, color: Color) -> Self {
        Self {
            is_inner: true,
            ..Self::outer(offset_x, offset_y, blur_radius, spread, color)
        }
    }

    /// Whether painting this shadow could not produce visible output.
    ///
    /// That is the case for a fully transparent color, or when the shadow
    /// would sit exactly under the shape (no blur, offset or spread).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color.alpha <= 0.0
            || (self.blur_radius == 0.0
                && self.offset_x == 0.0
                && self.offset_y == 0.0
                && self.spread == 0.0)
    }
}

/// Blur variants of the document model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlurKind {
    /// Gaussian blur of the layer content.
    #[default]
    Gaussian,
    /// Directional motion blur.
    Motion,
    /// Radial zoom blur.
    Zoom,
    /// Blur of whatever is behind the layer.
    Background,
}

impl BlurKind {
    /// Maps the numeric code used in document files.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Motion,
            2 => Self::Zoom,
            3 => Self::Background,
            _ => Self::Gaussian,
        }
    }
}

/// Layer blur.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blur {
    /// Whether the blur applies.
    pub is_enabled: bool,
    /// Variant.
    pub kind: BlurKind,
    /// Radius.
    pub radius: f64,
}

/// The complete style of a layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// Fills, bottom to top.
    pub fills: Vec<Fill>,
    /// Borders, bottom to top.
    pub borders: Vec<Border>,
    /// Outer shadows.
    pub shadows: Vec<Shadow>,
    /// Inner shadows.
    pub inner_shadows: Vec<Shadow>,
    /// Layer-level opacity and blend mode.
    pub context_settings: ContextSettings,
    /// Layer blur.
    pub blur: Option<Blur>,
    /// Stroke options for all borders.
    pub border_options: Option<BorderOptions>,
}

impl Style {
    /// Enabled fills in declaration order.
    pub fn enabled_fills(&self) -> impl Iterator<Item = &Fill> {
        self.fills.iter().filter(|f| f.is_enabled)
    }

    /// Enabled borders with a visible width, in declaration order.
    pub fn visible_borders(&self) -> impl Iterator<Item = &Border> {
        self.borders.iter().filter(|b| b.is_visible())
    }

    /// Enabled outer shadows in declaration order.
    pub fn enabled_shadows(&self) -> impl Iterator<Item = &Shadow> {
        self.shadows.iter().filter(|s| s.is_enabled)
    }

    /// Enabled inner shadows in declaration order.
    pub fn enabled_inner_shadows(&self) -> impl Iterator<Item = &Shadow> {
        self.inner_shadows.iter().filter(|s| s.is_enabled)
    }

    /// Whether any fill is enabled.
    #[must_use]
    pub fn has_enabled_fill(&self) -> bool {
        self.enabled_fills().next().is_some()
    }

    /// Whether any border is enabled and visible.
    #[must_use]
    pub fn has_visible_border(&self) -> bool {
        self.visible_borders().next().is_some()
    }

    /// Border options when enabled.
    #[must_use]
    pub fn active_border_options(&self) -> Option<&BorderOptions> {
        self.border_options.as_ref().filter(|o| o.is_enabled)
    }

    /// Layer blur when enabled.
    #[must_use]
    pub fn active_blur(&self) -> Option<Blur> {
        self.blur.filter(|b| b.is_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_shadows() {
        assert!(Shadow::outer(0.0, 0.0, 0.0, 0.0, Color::BLACK).is_empty());
        assert!(Shadow::outer(2.0, 2.0, 4.0, 0.0, Color::TRANSPARENT).is_empty());
        assert!(!Shadow::outer(0.0, 0.0, 4.0, 0.0, Color::BLACK).is_empty());
        assert!(!Shadow::inner(0.0, 1.0, 0.0, 0.0, Color::BLACK).is_empty());
    }

    #[test]
    fn zero_width_borders_are_invisible() {
        let mut style = Style::default();
        style
            .borders
            .push(Border::solid(BorderPosition::Inside, 0.0, Color::BLACK));
        assert!(!style.has_visible_border());
        style.borders[0].thickness = 1.0;
        assert!(style.has_visible_border());
        style.borders[0].is_enabled = false;
        assert!(!style.has_visible_border());
    }

    #[test]
    fn disabled_entries_are_filtered_in_order() {
        let mut style = Style::default();
        let mut hidden = Fill::solid(Color::WHITE);
        hidden.is_enabled = false;
        style.fills = vec![
            Fill::solid(Color::BLACK),
            hidden,
            Fill::solid(Color::from_rgb8(255, 0, 0)),
        ];
        let colors: Vec<_> = style.enabled_fills().map(|f| f.color).collect();
        assert_eq!(colors, vec![Color::BLACK, Color::new(1.0, 0.0, 0.0, 1.0)]);
    }

    #[test]
    fn default_context_settings() {
        assert!(ContextSettings::default().is_default());
        let half = ContextSettings {
            opacity: 0.5,
            ..ContextSettings::DEFAULT
        };
        assert!(!half.is_default());
    }

    #[test]
    fn document_codes() {
        assert_eq!(BorderPosition::from_code(1), BorderPosition::Inside);
        assert_eq!(BorderPosition::from_code(2), BorderPosition::Outside);
        assert_eq!(BorderPosition::from_code(0), BorderPosition::Center);
        assert_eq!(PatternFit::from_code(0), PatternFit::Tile);
        assert_eq!(PatternFit::from_code(3), PatternFit::Fit);
        assert_eq!(BlendMode::from_code(2), BlendMode::Multiply);
        assert_eq!(BlurKind::from_code(3), BlurKind::Background);
    }
}
