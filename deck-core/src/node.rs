//! The host's scene graph, as handed to an export.
//!
//! Every node kind the exporter cares about is a variant of [`NodeKind`], so
//! capability checks ("does this node have fills?") are exhaustive matches
//! instead of runtime property lookups. Kinds the exporter does not know
//! deserialize to [`NodeKind::Other`] and contribute nothing.

use serde::{Deserialize, Serialize};

use crate::geometry::AffineTransform;
use crate::mixed::{Measure, Mixed};
use crate::paint::{BlendMode, Paint, StrokeCap, StrokeJoin};
use crate::typography::{
    FontName, TextAlignHorizontal, TextAlignVertical, TextAutoResize, TextCase, TextDecoration,
};

/// Host identifier of a node (e.g. `"12:345"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create from the host's identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

const fn default_true() -> bool {
    true
}

const fn default_opacity() -> f64 {
    1.0
}

/// Position, size and orientation of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    /// X offset within the parent.
    #[serde(default)]
    pub x: f64,
    /// Y offset within the parent.
    #[serde(default)]
    pub y: f64,
    /// Width.
    #[serde(default)]
    pub width: f64,
    /// Height.
    #[serde(default)]
    pub height: f64,
    /// Rotation in degrees, counter-clockwise.
    #[serde(default)]
    pub rotation: f64,
    /// Transform from the node's local space to page space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_transform: Option<AffineTransform>,
}

/// Layer-level compositing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    /// Layer opacity in `0.0..=1.0`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Blend mode.
    #[serde(default)]
    pub blend_mode: BlendMode,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            blend_mode: BlendMode::default(),
        }
    }
}

/// Individual corner radii, present when the host reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CornerRadii {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_left_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_right_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_right_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_left_radius: Option<f64>,
}

impl CornerRadii {
    /// All four radii, if every one is known.
    #[must_use]
    pub fn all(&self) -> Option<[f64; 4]> {
        Some([
            self.top_left_radius?,
            self.top_right_radius?,
            self.bottom_right_radius?,
            self.bottom_left_radius?,
        ])
    }
}

/// Fill and stroke properties of fillable kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Fill layers, bottom first.
    #[serde(default)]
    pub fills: Vec<Paint>,
    /// Stroke layers, bottom first.
    #[serde(default)]
    pub strokes: Vec<Paint>,
    /// Stroke width.
    #[serde(default)]
    pub stroke_weight: Mixed<f64>,
    /// Stroke end decoration.
    #[serde(default)]
    pub stroke_cap: Mixed<StrokeCap>,
    /// Stroke corner treatment.
    #[serde(default)]
    pub stroke_join: Mixed<StrokeJoin>,
    /// Dash lengths; empty for a solid stroke.
    #[serde(default)]
    pub dash_pattern: Vec<f64>,
    /// Uniform corner radius, or mixed when the corners differ.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<Mixed<f64>>,
    /// Per-corner radii.
    #[serde(flatten)]
    pub corner_radii: CornerRadii,
}

/// Frames, groups, components and instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerNode {
    /// Children in paint order (first is painted first).
    #[serde(default)]
    pub children: Vec<SceneNode>,
    /// Whether children are clipped to the container bounds.
    #[serde(default)]
    pub clips_content: bool,
    /// The container's own fills and strokes.
    #[serde(flatten)]
    pub style: Style,
}

impl ContainerNode {
    /// A container holding `children` with no paint of its own.
    #[must_use]
    pub fn with_children(children: Vec<SceneNode>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }
}

/// Rectangles, ellipses, polygons, stars, vectors and lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeNode {
    /// Fill and stroke properties.
    #[serde(flatten)]
    pub style: Style,
    /// Number of points (polygons and stars).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_count: Option<u32>,
}

/// Text layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextNode {
    /// Raw character content.
    pub characters: String,
    /// Font size in pixels.
    pub font_size: Mixed<f64>,
    /// Font family and style.
    pub font_name: Mixed<FontName>,
    /// Horizontal alignment.
    pub text_align_horizontal: TextAlignHorizontal,
    /// Vertical alignment.
    pub text_align_vertical: TextAlignVertical,
    /// Text color layers.
    pub fills: Mixed<Vec<Paint>>,
    /// Line height.
    pub line_height: Measure,
    /// Letter spacing.
    pub letter_spacing: Measure,
    /// Case transform.
    pub text_case: Mixed<TextCase>,
    /// Decoration.
    pub text_decoration: Mixed<TextDecoration>,
    /// First-line indent in pixels.
    pub paragraph_indent: f64,
    /// Space between paragraphs in pixels.
    pub paragraph_spacing: f64,
    /// Auto-resize behavior.
    pub text_auto_resize: TextAutoResize,
}

impl Default for TextNode {
    fn default() -> Self {
        Self {
            characters: String::new(),
            font_size: Mixed::Uniform(12.0),
            font_name: Mixed::Uniform(FontName::new("Inter", "Regular")),
            text_align_horizontal: TextAlignHorizontal::default(),
            text_align_vertical: TextAlignVertical::default(),
            fills: Mixed::Uniform(Vec::new()),
            line_height: Measure::default(),
            letter_spacing: Measure::Uniform(0.0),
            text_case: Mixed::default(),
            text_decoration: Mixed::default(),
            paragraph_indent: 0.0,
            paragraph_spacing: 0.0,
            text_auto_resize: TextAutoResize::default(),
        }
    }
}

impl TextNode {
    /// A text layer with default styling.
    #[must_use]
    pub fn new(characters: impl Into<String>) -> Self {
        Self {
            characters: characters.into(),
            ..Self::default()
        }
    }
}

/// Node type with its type-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    /// Frame; establishes a visual box with its own paint.
    Frame(ContainerNode),
    /// Group; a pure grouping of children.
    Group(ContainerNode),
    /// Main component.
    Component(ContainerNode),
    /// Component instance.
    Instance(ContainerNode),
    /// Text layer.
    Text(TextNode),
    /// Rectangle.
    Rectangle(ShapeNode),
    /// Ellipse.
    Ellipse(ShapeNode),
    /// Regular polygon.
    Polygon(ShapeNode),
    /// Star.
    Star(ShapeNode),
    /// Free-form vector path.
    Vector(ShapeNode),
    /// Boolean combination of shapes.
    BooleanOperation(ShapeNode),
    /// Straight line.
    Line(ShapeNode),
    /// Any kind the exporter has no rule for.
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Host type tag, as it appears on the wire.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Frame(_) => "FRAME",
            Self::Group(_) => "GROUP",
            Self::Component(_) => "COMPONENT",
            Self::Instance(_) => "INSTANCE",
            Self::Text(_) => "TEXT",
            Self::Rectangle(_) => "RECTANGLE",
            Self::Ellipse(_) => "ELLIPSE",
            Self::Polygon(_) => "POLYGON",
            Self::Star(_) => "STAR",
            Self::Vector(_) => "VECTOR",
            Self::BooleanOperation(_) => "BOOLEAN_OPERATION",
            Self::Line(_) => "LINE",
            Self::Other => "OTHER",
        }
    }

    /// The container payload for container kinds.
    #[must_use]
    pub fn as_container(&self) -> Option<&ContainerNode> {
        match self {
            Self::Frame(c) | Self::Group(c) | Self::Component(c) | Self::Instance(c) => Some(c),
            _ => None,
        }
    }

    /// Fill and stroke properties, for kinds that have them.
    #[must_use]
    pub fn style(&self) -> Option<&Style> {
        match self {
            Self::Frame(c) | Self::Group(c) | Self::Component(c) | Self::Instance(c) => {
                Some(&c.style)
            }
            Self::Rectangle(s)
            | Self::Ellipse(s)
            | Self::Polygon(s)
            | Self::Star(s)
            | Self::Vector(s)
            | Self::BooleanOperation(s)
            | Self::Line(s) => Some(&s.style),
            Self::Text(_) | Self::Other => None,
        }
    }

    /// Whether this kind carries a meaningful corner radius.
    #[must_use]
    pub fn supports_corner_radius(&self) -> bool {
        matches!(
            self,
            Self::Frame(_)
                | Self::Component(_)
                | Self::Instance(_)
                | Self::Rectangle(_)
                | Self::Polygon(_)
                | Self::Star(_)
        )
    }
}

/// A node of the host document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Host identifier.
    pub id: NodeId,
    /// Layer name.
    #[serde(default)]
    pub name: String,
    /// Whether the host paints this node.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Placement.
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Compositing.
    #[serde(flatten)]
    pub appearance: Appearance,
    /// Type and type-specific payload.
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl SceneNode {
    /// Create a visible node at the origin with zero size.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: NodeId::new(id),
            name: name.into(),
            visible: true,
            geometry: Geometry::default(),
            appearance: Appearance::default(),
            kind,
        }
    }

    /// Set the local position.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.geometry.x = x;
        self.geometry.y = y;
        self
    }

    /// Set the size.
    #[must_use]
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.geometry.width = width;
        self.geometry.height = height;
        self
    }

    /// Whether this node is a frame, group, component or instance.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.kind.as_container().is_some()
    }

    /// Children in paint order; empty for leaf kinds.
    #[must_use]
    pub fn children(&self) -> &[SceneNode] {
        self.kind
            .as_container()
            .map_or(&[], |c| c.children.as_slice())
    }

    fn children_mut(&mut self) -> Option<&mut Vec<SceneNode>> {
        match &mut self.kind {
            NodeKind::Frame(c)
            | NodeKind::Group(c)
            | NodeKind::Component(c)
            | NodeKind::Instance(c) => Some(&mut c.children),
            _ => None,
        }
    }

    /// Fill in missing absolute transforms by composing local position and
    /// rotation down the tree, treating this node's parent space as page space.
    ///
    /// Transforms the host already supplied are kept and used as the parent
    /// frame for their descendants.
    pub fn resolve_absolute_transforms(&mut self) {
        tracing::trace!(id = %self.id, "Composing missing absolute transforms");
        self.resolve_under(&AffineTransform::IDENTITY);
    }

    fn resolve_under(&mut self, parent: &AffineTransform) {
        let g = &self.geometry;
        let local = AffineTransform::from_local(g.x, g.y, g.rotation);
        let absolute = *self
            .geometry
            .absolute_transform
            .get_or_insert_with(|| parent.then_apply(&local));

        if let Some(children) = self.children_mut() {
            for child in children {
                child.resolve_under(&absolute);
            }
        }
    }
}
