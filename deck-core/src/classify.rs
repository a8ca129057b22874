//! Element classification: which record kind a node becomes and whether a
//! rasterized image should be attempted first.

use crate::node::{NodeKind, SceneNode};
use crate::paint::{first_image_paint, has_visible_paint};

/// What to do when a preferred rasterization fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Emit a shape record from the node's own fills and strokes.
    Shape,
    /// Emit a shape record for the node's own paint, then visit its children.
    ShapeThenChildren,
    /// Emit nothing for the node itself and visit its children.
    Children,
}

/// The outcome of classifying one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Terminal text record.
    Text,
    /// Terminal line record.
    Line,
    /// Rasterize the node (and everything under it) into one image record.
    Rasterize {
        /// Structural path taken if rasterization fails.
        fallback: Fallback,
    },
    /// Transparent container: visit children in order.
    Container {
        /// Emit a shape record for the container's own paint before the children.
        background: bool,
    },
    /// Terminal shape record.
    Shape,
    /// No rule applies; the node contributes nothing.
    Unclassified,
}

/// Classify a node.
///
/// Rules, first match wins:
/// 1. text and line nodes map to their own kinds;
/// 2. containers with an image fill are rasterized whole, frames falling
///    back to their own shape plus children and other containers to their
///    children alone;
/// 3. other containers are transparent, frames additionally emitting their
///    own paint when they have any;
/// 4. stars, polygons, vectors and boolean operations are rasterized with a
///    shape fallback;
/// 5. rectangles and ellipses are rasterized when image-filled, otherwise
///    they are shapes.
#[must_use]
pub fn classify(node: &SceneNode) -> Classification {
    match &node.kind {
        NodeKind::Text(_) => Classification::Text,
        NodeKind::Line(_) => Classification::Line,
        NodeKind::Frame(c) => {
            if first_image_paint(&c.style.fills).is_some() {
                Classification::Rasterize {
                    fallback: Fallback::ShapeThenChildren,
                }
            } else {
                Classification::Container {
                    background: has_visible_paint(&c.style.fills)
                        || has_visible_paint(&c.style.strokes),
                }
            }
        }
        NodeKind::Group(c) | NodeKind::Component(c) | NodeKind::Instance(c) => {
            if first_image_paint(&c.style.fills).is_some() {
                Classification::Rasterize {
                    fallback: Fallback::Children,
                }
            } else {
                Classification::Container { background: false }
            }
        }
        NodeKind::Star(_)
        | NodeKind::Polygon(_)
        | NodeKind::Vector(_)
        | NodeKind::BooleanOperation(_) => Classification::Rasterize {
            fallback: Fallback::Shape,
        },
        NodeKind::Rectangle(s) | NodeKind::Ellipse(s) => {
            if first_image_paint(&s.style.fills).is_some() {
                Classification::Rasterize {
                    fallback: Fallback::Shape,
                }
            } else {
                Classification::Shape
            }
        }
        NodeKind::Other => Classification::Unclassified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ContainerNode, ShapeNode, Style, TextNode};
    use crate::paint::{ImagePaint, Paint, Rgb, ScaleMode, SolidPaint};

    fn image_fill() -> Paint {
        Paint::Image(ImagePaint {
            image_hash: Some("hash".into()),
            scale_mode: ScaleMode::Fill,
            opacity: 1.0,
            visible: true,
        })
    }

    fn solid_fill() -> Paint {
        Paint::Solid(SolidPaint {
            color: Rgb { r: 0.2, g: 0.4, b: 0.6 },
            opacity: 1.0,
            visible: true,
        })
    }

    fn styled(fills: Vec<Paint>) -> Style {
        Style {
            fills,
            ..Style::default()
        }
    }

    fn node(kind: NodeKind) -> SceneNode {
        SceneNode::new("0:1", "n", kind)
    }

    #[test]
    fn test_text_and_line_are_terminal() {
        assert_eq!(
            classify(&node(NodeKind::Text(TextNode::new("x")))),
            Classification::Text
        );
        assert_eq!(
            classify(&node(NodeKind::Line(ShapeNode::default()))),
            Classification::Line
        );
    }

    #[test]
    fn test_image_filled_frame_rasterizes_with_shape_then_children() {
        let frame = node(NodeKind::Frame(ContainerNode {
            style: styled(vec![image_fill()]),
            ..ContainerNode::default()
        }));
        assert_eq!(
            classify(&frame),
            Classification::Rasterize {
                fallback: Fallback::ShapeThenChildren
            }
        );
    }

    #[test]
    fn test_image_filled_group_falls_back_to_children() {
        let group = node(NodeKind::Instance(ContainerNode {
            style: styled(vec![image_fill()]),
            ..ContainerNode::default()
        }));
        assert_eq!(
            classify(&group),
            Classification::Rasterize {
                fallback: Fallback::Children
            }
        );
    }

    #[test]
    fn test_plain_containers_are_transparent() {
        let painted_frame = node(NodeKind::Frame(ContainerNode {
            style: styled(vec![solid_fill()]),
            ..ContainerNode::default()
        }));
        assert_eq!(
            classify(&painted_frame),
            Classification::Container { background: true }
        );

        let bare_frame = node(NodeKind::Frame(ContainerNode::default()));
        assert_eq!(
            classify(&bare_frame),
            Classification::Container { background: false }
        );

        let painted_group = node(NodeKind::Group(ContainerNode {
            style: styled(vec![solid_fill()]),
            ..ContainerNode::default()
        }));
        assert_eq!(
            classify(&painted_group),
            Classification::Container { background: false }
        );
    }

    #[test]
    fn test_complex_shapes_prefer_rasterization() {
        for kind in [
            NodeKind::Star(ShapeNode::default()),
            NodeKind::Polygon(ShapeNode::default()),
            NodeKind::Vector(ShapeNode::default()),
            NodeKind::BooleanOperation(ShapeNode::default()),
        ] {
            assert_eq!(
                classify(&node(kind)),
                Classification::Rasterize {
                    fallback: Fallback::Shape
                }
            );
        }
    }

    #[test]
    fn test_simple_shapes() {
        let rect = node(NodeKind::Rectangle(ShapeNode {
            style: styled(vec![solid_fill()]),
            point_count: None,
        }));
        assert_eq!(classify(&rect), Classification::Shape);

        let photo = node(NodeKind::Ellipse(ShapeNode {
            style: styled(vec![solid_fill(), image_fill()]),
            point_count: None,
        }));
        assert_eq!(
            classify(&photo),
            Classification::Rasterize {
                fallback: Fallback::Shape
            }
        );
    }

    #[test]
    fn test_hidden_image_fill_does_not_trigger_rasterization() {
        let mut hidden = image_fill();
        if let Paint::Image(p) = &mut hidden {
            p.visible = false;
        }
        let rect = node(NodeKind::Rectangle(ShapeNode {
            style: styled(vec![hidden]),
            point_count: None,
        }));
        assert_eq!(classify(&rect), Classification::Shape);
    }

    #[test]
    fn test_unknown_kinds_are_unclassified() {
        assert_eq!(classify(&node(NodeKind::Other)), Classification::Unclassified);
    }
}
