//! Element records - the flat, serializable output of an export.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;
use crate::mixed::Spacing;
use crate::paint::{BlendMode, Paint, ScaleMode, StrokeCap, StrokeJoin};
use crate::typography::{
    FontName, TextAlignHorizontal, TextAlignVertical, TextAutoResize, TextCase, TextDecoration,
};

/// Namespace for content-derived image tokens.
const IMAGE_TOKEN_NAMESPACE: Uuid = Uuid::from_u128(0x5a0e_7c1d_4b2f_4e88_9d36_0f1c_a3b5_d7e9);

/// Attributes shared by every record kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseProps {
    /// Layer name.
    pub name: String,
    /// X relative to the export root's origin.
    pub x: f64,
    /// Y relative to the export root's origin.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Layer opacity.
    pub opacity: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Blend mode.
    pub blend_mode: BlendMode,
}

/// One flattened visual unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Shared attributes.
    #[serde(flatten)]
    pub base: BaseProps,
    /// Kind-specific attributes.
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl ElementRecord {
    /// Create a record.
    #[must_use]
    pub fn new(base: BaseProps, kind: ElementKind) -> Self {
        Self { base, kind }
    }

    /// Record kind name, e.g. `"text"`.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ElementKind::Text(_) => "text",
            ElementKind::Shape(_) => "shape",
            ElementKind::Image(_) => "image",
            ElementKind::Line(_) => "line",
        }
    }

    /// Position relative to the export root.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.base.x, self.base.y)
    }
}

/// The kind of content a record carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ElementKind {
    /// Text box.
    Text(TextElement),
    /// Vector shape.
    Shape(ShapeElement),
    /// Bitmap.
    Image(ImageElement),
    /// Straight line.
    Line(LineElement),
}

/// Text box content and typography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// Character content.
    pub characters: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family and style.
    pub font_name: FontName,
    /// Horizontal alignment.
    pub text_align_horizontal: TextAlignHorizontal,
    /// Vertical alignment.
    pub text_align_vertical: TextAlignVertical,
    /// Text color layers.
    pub fills: Vec<Paint>,
    /// Line height.
    pub line_height: Spacing,
    /// Letter spacing.
    pub letter_spacing: Spacing,
    /// Case transform.
    pub text_case: TextCase,
    /// Decoration.
    pub text_decoration: TextDecoration,
    /// First-line indent in pixels.
    pub paragraph_indent: f64,
    /// Space between paragraphs in pixels.
    pub paragraph_spacing: f64,
    /// Auto-resize behavior.
    pub text_auto_resize: TextAutoResize,
}

/// Geometric family of a shape record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum ShapeSubtype {
    Rectangle,
    Ellipse,
    Polygon,
    Star,
    Vector,
}

/// Corner rounding of a shape record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CornerRadius {
    /// Same radius on every corner.
    Uniform(f64),
    /// Individual radii.
    #[serde(rename_all = "camelCase")]
    PerCorner {
        /// Top-left radius.
        top_left: f64,
        /// Top-right radius.
        top_right: f64,
        /// Bottom-right radius.
        bottom_right: f64,
        /// Bottom-left radius.
        bottom_left: f64,
    },
}

/// Vector shape paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    /// Geometric family.
    pub subtype: ShapeSubtype,
    /// Fill layers.
    pub fills: Vec<Paint>,
    /// Stroke layers.
    pub strokes: Vec<Paint>,
    /// Stroke width.
    pub stroke_weight: f64,
    /// Corner rounding; absent when the source kind has none or it is unknown.
    /// Distinct from an explicit zero radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<CornerRadius>,
    /// Number of points for polygons and stars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_count: Option<u32>,
}

/// Encoded image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG vector image.
    Svg,
    /// WebP image.
    WebP,
}

impl ImageFormat {
    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        // SVG: markup, possibly after a UTF-8 BOM or leading whitespace
        let text = data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data);
        let start = text
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(text.len());
        let text = &text[start..];
        if text.starts_with(b"<svg") || text.starts_with(b"<?xml") {
            return Some(Self::Svg);
        }

        None
    }
}

/// Identity of an embedded image within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageToken(String);

impl ImageToken {
    /// Derive a token from the encoded bytes. Identical images share a token.
    #[must_use]
    pub fn from_content(bytes: &[u8]) -> Self {
        Self(Uuid::new_v5(&IMAGE_TOKEN_NAMESPACE, bytes).to_string())
    }

    /// Reuse the host's identity for an image fill.
    #[must_use]
    pub fn from_fill_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rasterized bitmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    /// Encoded image bytes, base64 on the wire.
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
    /// Image identity.
    pub token: ImageToken,
    /// Encoding of `bytes`.
    pub format: ImageFormat,
    /// How the bitmap fits the record bounds.
    pub scale_mode: ScaleMode,
}

/// Straight line with stroke styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    /// Stroke layers.
    pub strokes: Vec<Paint>,
    /// Stroke width.
    pub stroke_weight: f64,
    /// End decoration.
    pub stroke_cap: StrokeCap,
    /// Corner treatment.
    pub stroke_join: StrokeJoin,
    /// Dash lengths; absent for a solid line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_pattern: Option<Vec<f64>>,
    /// Start point relative to the export root.
    pub start: Point,
    /// End point relative to the export root.
    pub end: Point,
}

/// Binary payloads as standard base64 strings.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
