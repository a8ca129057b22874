//! The host rasterization seam.

use std::collections::HashMap;

use async_trait::async_trait;
use deck_core::{NodeId, SceneNode};

use crate::config::RasterSettings;
use crate::error::{RasterError, RasterResult};

/// Turns a node, with everything under it, into encoded image bytes.
///
/// Implemented by whatever owns the host document: a live editor bridge, a
/// directory of pre-rendered snapshots, or a test fixture.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Rasterize `node` with the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot produce an image for the node.
    async fn rasterize(&self, node: &SceneNode, settings: &RasterSettings)
        -> RasterResult<Vec<u8>>;
}

/// A rasterizer that never produces images.
///
/// Every rasterized node takes its structural fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRasterizer;

#[async_trait]
impl Rasterizer for NoRasterizer {
    async fn rasterize(
        &self,
        node: &SceneNode,
        _settings: &RasterSettings,
    ) -> RasterResult<Vec<u8>> {
        Err(RasterError::Unsupported(node.kind.type_name().to_string()))
    }
}

/// Serves pre-encoded images keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct MemoryRasterizer {
    images: HashMap<NodeId, Vec<u8>>,
}

impl MemoryRasterizer {
    /// Create an empty rasterizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the image for a node.
    pub fn insert(&mut self, id: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(NodeId::new(id), bytes);
    }

    /// Builder form of [`MemoryRasterizer::insert`].
    #[must_use]
    pub fn with_image(mut self, id: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(id, bytes);
        self
    }

    /// Number of registered images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no images are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[async_trait]
impl Rasterizer for MemoryRasterizer {
    async fn rasterize(
        &self,
        node: &SceneNode,
        _settings: &RasterSettings,
    ) -> RasterResult<Vec<u8>> {
        self.images
            .get(&node.id)
            .cloned()
            .ok_or_else(|| RasterError::Missing(node.id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{NodeKind, ShapeNode};

    fn star(id: &str) -> SceneNode {
        SceneNode::new(id, "Star", NodeKind::Star(ShapeNode::default()))
    }

    #[tokio::test]
    async fn test_memory_rasterizer_serves_registered_images() {
        let rasterizer = MemoryRasterizer::new().with_image("1:2", vec![1, 2, 3]);
        assert_eq!(rasterizer.len(), 1);

        let bytes = rasterizer
            .rasterize(&star("1:2"), &RasterSettings::default())
            .await
            .expect("registered");
        assert_eq!(bytes, vec![1, 2, 3]);

        let missing = rasterizer
            .rasterize(&star("9:9"), &RasterSettings::default())
            .await;
        assert!(matches!(missing, Err(RasterError::Missing(id)) if id == "9:9"));
    }

    #[tokio::test]
    async fn test_no_rasterizer_reports_unsupported() {
        let result = NoRasterizer
            .rasterize(&star("1:1"), &RasterSettings::default())
            .await;
        assert!(matches!(result, Err(RasterError::Unsupported(kind)) if kind == "STAR"));
    }
}
