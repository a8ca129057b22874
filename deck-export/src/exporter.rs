//! Per-node extraction with rasterization fallbacks.
//!
//! [`NodeExporter::export_node`] classifies one node and turns it into at
//! most one record plus an instruction for the walker. A failed
//! rasterization is never an error here: the node takes its structural
//! fallback and the failure travels along in [`NodeOutcome::FellBack`].

use deck_core::paint::{first_image_paint, known_paints};
use deck_core::{
    classify, resolve_line_endpoints, resolve_position, resolve_rotation, BaseProps,
    Classification, CornerRadius, ElementKind, ElementRecord, Fallback, ImageElement,
    ImageFormat, ImageToken, LineElement, Mixed, NodeExportError, NodeKind, SceneNode,
    ScaleMode, ShapeElement, ShapeSubtype, Spacing, Style, TextElement, TextNode,
};

use crate::config::{ExportConfig, ImageTokenPolicy};
use crate::raster::Rasterizer;

/// What the walker should do after visiting one node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutcome {
    /// The node became a terminal record; its subtree is covered.
    Exported(ElementRecord),
    /// Rasterization failed and the structural fallback was taken.
    FellBack {
        /// Shape record for the node's own paint, if the fallback emits one.
        record: Option<ElementRecord>,
        /// Whether the children must now be visited individually.
        descend: bool,
        /// Why rasterization failed.
        error: NodeExportError,
    },
    /// A transparent container: visit the children in order.
    Descend {
        /// Shape record for the container's own paint, emitted before the children.
        background: Option<ElementRecord>,
    },
    /// Nothing to emit.
    Skipped,
}

impl NodeOutcome {
    /// Whether the node fell back from a failed rasterization.
    #[must_use]
    pub fn fell_back(&self) -> bool {
        matches!(self, Self::FellBack { .. })
    }
}

/// Extracts records for single nodes relative to an export root.
pub struct NodeExporter<'a> {
    rasterizer: &'a dyn Rasterizer,
    config: &'a ExportConfig,
}

impl<'a> NodeExporter<'a> {
    /// Create an exporter backed by `rasterizer`.
    #[must_use]
    pub fn new(rasterizer: &'a dyn Rasterizer, config: &'a ExportConfig) -> Self {
        Self { rasterizer, config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        self.config
    }

    /// Classify `node` and extract what it contributes.
    pub async fn export_node(&self, node: &SceneNode, root: &SceneNode) -> NodeOutcome {
        let classification = classify(node);
        tracing::debug!(
            id = %node.id,
            kind = node.kind.type_name(),
            ?classification,
            "Classified node"
        );

        match classification {
            Classification::Text | Classification::Line | Classification::Shape => self
                .structural_record(node, root)
                .map_or(NodeOutcome::Skipped, NodeOutcome::Exported),
            Classification::Rasterize { fallback } => match self.image_element(node).await {
                Ok(image) => NodeOutcome::Exported(ElementRecord::new(
                    base_props(node, root),
                    ElementKind::Image(image),
                )),
                Err(error) => match fallback {
                    Fallback::Shape => NodeOutcome::FellBack {
                        record: self.shape_record(node, root),
                        descend: false,
                        error,
                    },
                    Fallback::ShapeThenChildren => NodeOutcome::FellBack {
                        record: self.shape_record(node, root),
                        descend: true,
                        error,
                    },
                    Fallback::Children => NodeOutcome::FellBack {
                        record: None,
                        descend: true,
                        error,
                    },
                },
            },
            Classification::Container { background } => NodeOutcome::Descend {
                background: if background {
                    self.shape_record(node, root)
                } else {
                    None
                },
            },
            Classification::Unclassified => NodeOutcome::Skipped,
        }
    }

    /// Shape record for an export root's own paint, placed at the root origin.
    ///
    /// `None` when the root has no visible fills or strokes.
    #[must_use]
    pub fn root_background(&self, root: &SceneNode) -> Option<ElementRecord> {
        let style = root.kind.style()?;
        let painted = style.fills.iter().chain(&style.strokes).any(|p| p.is_visible());
        if painted {
            self.shape_record(root, root)
        } else {
            None
        }
    }

    /// Bitmap of the whole export root.
    ///
    /// Uses the same timeout and format handling as node rasterization. A
    /// failure leaves the document without a snapshot.
    pub async fn snapshot(&self, root: &SceneNode) -> Option<ImageElement> {
        match self.image_element(root).await {
            Ok(image) => Some(image),
            Err(error) => {
                tracing::warn!(id = %root.id, name = %root.name, %error, "Root snapshot failed");
                None
            }
        }
    }

    /// Record for text, line and shape kinds without rasterization.
    fn structural_record(&self, node: &SceneNode, root: &SceneNode) -> Option<ElementRecord> {
        match &node.kind {
            NodeKind::Text(text) => Some(ElementRecord::new(
                base_props(node, root),
                ElementKind::Text(self.text_element(text)),
            )),
            NodeKind::Line(line) => Some(ElementRecord::new(
                base_props(node, root),
                ElementKind::Line(self.line_element(node, root, &line.style)),
            )),
            _ => self.shape_record(node, root),
        }
    }

    fn text_element(&self, text: &TextNode) -> TextElement {
        let defaults = &self.config.text;
        let font_size = text.font_size.as_uniform().copied().unwrap_or(defaults.font_size);
        let font_name = text
            .font_name
            .as_uniform()
            .cloned()
            .unwrap_or_else(|| defaults.font_name.clone());

        TextElement {
            characters: text.characters.clone(),
            font_size,
            font_name,
            text_align_horizontal: text.text_align_horizontal,
            text_align_vertical: text.text_align_vertical,
            fills: text.fills.as_uniform().map(|f| known_paints(f.as_slice())).unwrap_or_default(),
            line_height: text.line_height.resolve(Spacing::pixels(font_size)),
            letter_spacing: text.letter_spacing.resolve(Spacing::pixels(0.0)),
            text_case: text.text_case.as_uniform().copied().unwrap_or_default(),
            text_decoration: text.text_decoration.as_uniform().copied().unwrap_or_default(),
            paragraph_indent: text.paragraph_indent,
            paragraph_spacing: text.paragraph_spacing,
            text_auto_resize: text.text_auto_resize,
        }
    }

    fn line_element(&self, node: &SceneNode, root: &SceneNode, style: &Style) -> LineElement {
        let (start, end) = resolve_line_endpoints(node, root);
        LineElement {
            strokes: known_paints(&style.strokes),
            stroke_weight: self.stroke_weight(style),
            stroke_cap: style.stroke_cap.as_uniform().copied().unwrap_or_default(),
            stroke_join: style.stroke_join.as_uniform().copied().unwrap_or_default(),
            dash_pattern: (!style.dash_pattern.is_empty()).then(|| style.dash_pattern.clone()),
            start,
            end,
        }
    }

    /// Shape record from the node's own fills and strokes.
    ///
    /// Text, line and unknown kinds have no shape form.
    fn shape_record(&self, node: &SceneNode, root: &SceneNode) -> Option<ElementRecord> {
        let (subtype, style, point_count) = match &node.kind {
            NodeKind::Frame(c) | NodeKind::Group(c) | NodeKind::Component(c) | NodeKind::Instance(c) => {
                (ShapeSubtype::Rectangle, &c.style, None)
            }
            NodeKind::Rectangle(s) => (ShapeSubtype::Rectangle, &s.style, None),
            NodeKind::Ellipse(s) => (ShapeSubtype::Ellipse, &s.style, None),
            NodeKind::Polygon(s) => (ShapeSubtype::Polygon, &s.style, s.point_count),
            NodeKind::Star(s) => (ShapeSubtype::Star, &s.style, s.point_count),
            NodeKind::Vector(s) | NodeKind::BooleanOperation(s) => {
                (ShapeSubtype::Vector, &s.style, None)
            }
            NodeKind::Text(_) | NodeKind::Line(_) | NodeKind::Other => return None,
        };

        let corner_radius = if node.kind.supports_corner_radius() {
            corner_radius(style)
        } else {
            None
        };

        Some(ElementRecord::new(
            base_props(node, root),
            ElementKind::Shape(ShapeElement {
                subtype,
                fills: known_paints(&style.fills),
                strokes: known_paints(&style.strokes),
                stroke_weight: self.stroke_weight(style),
                corner_radius,
                point_count,
            }),
        ))
    }

    fn stroke_weight(&self, style: &Style) -> f64 {
        style
            .stroke_weight
            .as_uniform()
            .copied()
            .unwrap_or(self.config.mixed_stroke_weight)
    }

    /// Rasterize `node`, bounded by the configured timeout.
    async fn image_element(&self, node: &SceneNode) -> Result<ImageElement, NodeExportError> {
        let settings = &self.config.raster;
        let timeout = self.config.raster_timeout;

        let bytes = tokio::time::timeout(timeout, self.rasterizer.rasterize(node, settings))
            .await
            .map_err(|_| NodeExportError::TimedOut(timeout))??;

        if bytes.is_empty() {
            return Err(NodeExportError::Raster("host returned an empty image".to_string()));
        }

        let format = ImageFormat::from_magic_bytes(&bytes).unwrap_or_else(|| settings.format.into());
        let image_fill = node.kind.style().and_then(|s| first_image_paint(&s.fills));
        let scale_mode = image_fill.map_or(ScaleMode::Fill, |p| p.scale_mode);

        let fill_hash = match self.config.image_tokens {
            ImageTokenPolicy::PreferFillHash if !node.is_container() => {
                image_fill.and_then(|p| p.image_hash.clone())
            }
            _ => None,
        };
        let token = fill_hash.map_or_else(|| ImageToken::from_content(&bytes), ImageToken::from_fill_hash);

        tracing::debug!(id = %node.id, %token, size = bytes.len(), "Rasterized node");

        Ok(ImageElement {
            bytes,
            token,
            format,
            scale_mode,
        })
    }
}

/// Attributes shared by every record kind, positioned relative to `root`.
#[must_use]
pub fn base_props(node: &SceneNode, root: &SceneNode) -> BaseProps {
    let position = resolve_position(node, root);
    BaseProps {
        name: node.name.clone(),
        x: position.x,
        y: position.y,
        width: node.geometry.width,
        height: node.geometry.height,
        opacity: node.appearance.opacity,
        rotation: resolve_rotation(node, root),
        blend_mode: node.appearance.blend_mode,
    }
}

/// Corner rounding for a kind that supports it.
///
/// A mixed radius falls back to the per-corner values, and is omitted when
/// any of those is unknown.
fn corner_radius(style: &Style) -> Option<CornerRadius> {
    match style.corner_radius {
        Some(Mixed::Uniform(radius)) => Some(CornerRadius::Uniform(radius)),
        Some(Mixed::Mixed) | None => {
            style
                .corner_radii
                .all()
                .map(|[top_left, top_right, bottom_right, bottom_left]| CornerRadius::PerCorner {
                    top_left,
                    top_right,
                    bottom_right,
                    bottom_left,
                })
        }
    }
}
