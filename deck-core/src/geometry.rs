//! Coordinate-frame resolution relative to an export root.
//!
//! Positions are always derived from each node's absolute transform and the
//! root's absolute transform. Summing local offsets down the tree is only
//! correct while no ancestor rotates or scales, so it is never used here.

use serde::{Deserialize, Serialize};

use crate::node::SceneNode;

/// A point in some 2D coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn offset_from(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// A 2×3 affine matrix in the host's row layout `[[m00, m01, tx], [m10, m11, ty]]`.
///
/// Maps `(x, y)` to `(m00·x + m01·y + tx, m10·x + m11·y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 3]; 2]", into = "[[f64; 3]; 2]")]
pub struct AffineTransform {
    /// Row-major matrix entries.
    pub rows: [[f64; 3]; 2],
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[[f64; 3]; 2]> for AffineTransform {
    fn from(rows: [[f64; 3]; 2]) -> Self {
        Self { rows }
    }
}

impl From<AffineTransform> for [[f64; 3]; 2] {
    fn from(transform: AffineTransform) -> Self {
        transform.rows
    }
}

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    };

    /// A pure translation.
    #[must_use]
    pub const fn translation(x: f64, y: f64) -> Self {
        Self {
            rows: [[1.0, 0.0, x], [0.0, 1.0, y]],
        }
    }

    /// Build a node's transform relative to its parent from its local
    /// position and rotation (degrees, counter-clockwise as displayed).
    #[must_use]
    pub fn from_local(x: f64, y: f64, rotation_degrees: f64) -> Self {
        let (sin, cos) = rotation_degrees.to_radians().sin_cos();
        Self {
            rows: [[cos, sin, x], [-sin, cos, y]],
        }
    }

    /// Compose so that `other` is applied first, then `self`.
    #[must_use]
    pub fn then_apply(&self, other: &Self) -> Self {
        let [[a0, a1, a2], [a3, a4, a5]] = self.rows;
        let [[b0, b1, b2], [b3, b4, b5]] = other.rows;
        Self {
            rows: [
                [
                    a0.mul_add(b0, a1 * b3),
                    a0.mul_add(b1, a1 * b4),
                    a0.mul_add(b2, a1.mul_add(b5, a2)),
                ],
                [
                    a3.mul_add(b0, a4 * b3),
                    a3.mul_add(b1, a4 * b4),
                    a3.mul_add(b2, a4.mul_add(b5, a5)),
                ],
            ],
        }
    }

    /// The translation component, i.e. where the local origin lands.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.rows[0][2], self.rows[1][2])
    }

    /// Rotation of the local x axis in degrees, counter-clockwise as displayed.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.rows[0][1].atan2(self.rows[0][0]).to_degrees()
    }

    /// Map a point.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        let [[m00, m01, tx], [m10, m11, ty]] = self.rows;
        Point::new(m00.mul_add(p.x, m01.mul_add(p.y, tx)), m10.mul_add(p.x, m11.mul_add(p.y, ty)))
    }

    /// Map a direction vector (translation ignored).
    #[must_use]
    pub fn apply_vector(&self, v: Point) -> Point {
        let [[m00, m01, _], [m10, m11, _]] = self.rows;
        Point::new(m00.mul_add(v.x, m01 * v.y), m10.mul_add(v.x, m11 * v.y))
    }
}

/// Absolute origin of a node, or the canvas origin when the host gave no transform.
fn absolute_origin(node: &SceneNode) -> Point {
    node.geometry
        .absolute_transform
        .map_or(Point::ORIGIN, |t| t.origin())
}

/// Position of `node` in the coordinate space whose origin is `root`'s own position.
#[must_use]
pub fn resolve_position(node: &SceneNode, root: &SceneNode) -> Point {
    absolute_origin(node).offset_from(absolute_origin(root))
}

/// Rotation of `node` relative to `root`, in degrees within `(-180, 180]`.
///
/// Falls back to the node's local rotation when either absolute transform
/// is missing.
#[must_use]
pub fn resolve_rotation(node: &SceneNode, root: &SceneNode) -> f64 {
    match (
        node.geometry.absolute_transform,
        root.geometry.absolute_transform,
    ) {
        (Some(node_t), Some(root_t)) => {
            let mut degrees = node_t.rotation_degrees() - root_t.rotation_degrees();
            if degrees <= -180.0 {
                degrees += 360.0;
            } else if degrees > 180.0 {
                degrees -= 360.0;
            }
            degrees
        }
        _ => node.geometry.rotation,
    }
}

/// Start and end points of a line node relative to `root`.
///
/// A line runs along its own local x axis for `width` units, so the end
/// point follows the node's absolute rotation and scale.
#[must_use]
pub fn resolve_line_endpoints(node: &SceneNode, root: &SceneNode) -> (Point, Point) {
    let start = resolve_position(node, root);
    let transform = node
        .geometry
        .absolute_transform
        .unwrap_or_else(|| AffineTransform::from_local(0.0, 0.0, node.geometry.rotation));
    let run = transform.apply_vector(Point::new(node.geometry.width, 0.0));
    (start, Point::new(start.x + run.x, start.y + run.y))
}
