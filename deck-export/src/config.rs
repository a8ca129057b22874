//! Export configuration.

use std::time::Duration;

use deck_core::{FontName, ImageFormat};

/// Encoding requested from the host rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG document.
    Svg,
}

impl From<RasterFormat> for ImageFormat {
    fn from(format: RasterFormat) -> Self {
        match format {
            RasterFormat::Png => Self::Png,
            RasterFormat::Jpeg => Self::Jpeg,
            RasterFormat::Svg => Self::Svg,
        }
    }
}

/// Parameters passed to every rasterization call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterSettings {
    /// Output encoding.
    pub format: RasterFormat,
    /// Scale factor relative to the node's size (e.g. 2.0 for retina).
    pub scale: f64,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            format: RasterFormat::Png,
            scale: 2.0,
        }
    }
}

/// How image records are identified within a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageTokenPolicy {
    /// Derive every token from the encoded bytes.
    #[default]
    ContentHash,
    /// Reuse a leaf node's image fill hash when it has one; containers and
    /// fill-less leaves still use the content hash, since their bitmap is a
    /// composite rather than the fill image.
    PreferFillHash,
}

/// Substitutes for indeterminate text properties.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefaults {
    /// Used when the font varies across the text.
    pub font_name: FontName,
    /// Used when the font size varies across the text.
    pub font_size: f64,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            font_name: FontName::new("Arial", "Regular"),
            font_size: 12.0,
        }
    }
}

/// Configuration for selection export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Settings for host rasterization (default: PNG at 2x).
    pub raster: RasterSettings,
    /// Upper bound on a single rasterization call (default: 30s).
    pub raster_timeout: Duration,
    /// Image token policy (default: content hash).
    pub image_tokens: ImageTokenPolicy,
    /// Text fallbacks.
    pub text: TextDefaults,
    /// Stroke weight used when a node's stroke weight is mixed (default: 1.0).
    pub mixed_stroke_weight: f64,
    /// Emit the root's own paint as a leading background record (default: true).
    pub root_background: bool,
    /// Rasterize each root whole into its document's snapshot (default: true).
    pub root_snapshot: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            raster: RasterSettings::default(),
            raster_timeout: Duration::from_secs(30),
            image_tokens: ImageTokenPolicy::default(),
            text: TextDefaults::default(),
            mixed_stroke_weight: 1.0,
            root_background: true,
            root_snapshot: true,
        }
    }
}
