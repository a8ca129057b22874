//! Paints, colors and compositing modes shared by scene nodes and element records.
//!
//! Field names follow the host's JSON conventions (camelCase fields,
//! SCREAMING_SNAKE_CASE tags) so captured selections deserialize directly.

use serde::{Deserialize, Serialize};

use crate::geometry::AffineTransform;

/// An RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Format as `#RRGGBB`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// An RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    #[serde(default = "default_one")]
    pub a: f64,
}

const fn default_one() -> f64 {
    1.0
}

const fn default_true() -> bool {
    true
}

/// A single paint layer in a fill or stroke list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    /// Flat color.
    Solid(SolidPaint),
    /// Linear gradient.
    GradientLinear(GradientPaint),
    /// Radial gradient.
    GradientRadial(GradientPaint),
    /// Angular (conic) gradient.
    GradientAngular(GradientPaint),
    /// Diamond gradient.
    GradientDiamond(GradientPaint),
    /// Bitmap fill.
    Image(ImagePaint),
    /// A paint type this crate does not model. Never painted by the exporter.
    #[serde(other)]
    Unknown,
}

/// Flat color paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidPaint {
    /// Paint color.
    pub color: Rgb,
    /// Paint opacity.
    #[serde(default = "default_one")]
    pub opacity: f64,
    /// Whether the layer is painted.
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// One stop of a gradient ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Stop color.
    pub color: Rgba,
    /// Position along the ramp in `0.0..=1.0`.
    pub position: f64,
}

/// Gradient paint of any shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    /// Color ramp.
    #[serde(default)]
    pub gradient_stops: Vec<ColorStop>,
    /// Gradient placement in the node's unit square.
    #[serde(default)]
    pub gradient_transform: AffineTransform,
    /// Paint opacity.
    #[serde(default = "default_one")]
    pub opacity: f64,
    /// Whether the layer is painted.
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// Bitmap paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaint {
    /// Host identity of the underlying image, if it has one.
    #[serde(default)]
    pub image_hash: Option<String>,
    /// How the bitmap fits the node bounds.
    #[serde(default)]
    pub scale_mode: ScaleMode,
    /// Paint opacity.
    #[serde(default = "default_one")]
    pub opacity: f64,
    /// Whether the layer is painted.
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Paint {
    /// Whether the host paints this layer at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        match self {
            Self::Solid(p) => p.visible,
            Self::GradientLinear(p)
            | Self::GradientRadial(p)
            | Self::GradientAngular(p)
            | Self::GradientDiamond(p) => p.visible,
            Self::Image(p) => p.visible,
            Self::Unknown => false,
        }
    }

    /// Whether this is a paint type the exporter can carry into records.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The image layer, if this is one.
    #[must_use]
    pub fn as_image(&self) -> Option<&ImagePaint> {
        match self {
            Self::Image(p) => Some(p),
            _ => None,
        }
    }
}

/// Find the first visible image layer in a paint list.
#[must_use]
pub fn first_image_paint(paints: &[Paint]) -> Option<&ImagePaint> {
    paints
        .iter()
        .filter(|p| p.is_visible())
        .find_map(Paint::as_image)
}

/// The layers of a paint list that records can carry, in order.
#[must_use]
pub fn known_paints(paints: &[Paint]) -> Vec<Paint> {
    paints.iter().filter(|p| p.is_known()).cloned().collect()
}

/// Whether any layer in the list is painted.
#[must_use]
pub fn has_visible_paint(paints: &[Paint]) -> bool {
    paints.iter().any(Paint::is_visible)
}

/// How a bitmap is fitted to its bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    /// Cover the bounds, cropping overflow.
    #[default]
    Fill,
    /// Fit inside the bounds, letterboxing.
    Fit,
    /// Explicit crop rectangle.
    Crop,
    /// Repeat the bitmap.
    Tile,
}

/// Layer compositing mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum BlendMode {
    #[default]
    PassThrough,
    Normal,
    Darken,
    Multiply,
    LinearBurn,
    ColorBurn,
    Lighten,
    Screen,
    LinearDodge,
    ColorDodge,
    Overlay,
    SoftLight,
    HardLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

/// Decoration at the open ends of a stroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeCap {
    /// Flat end at the endpoint.
    #[default]
    None,
    /// Rounded end.
    Round,
    /// Square end extending past the endpoint.
    Square,
    /// Open arrowhead.
    ArrowLines,
    /// Filled triangular arrowhead.
    ArrowEquilateral,
}

/// Corner treatment where stroke segments meet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeJoin {
    /// Sharp corner.
    #[default]
    Miter,
    /// Cut-off corner.
    Bevel,
    /// Rounded corner.
    Round,
}
