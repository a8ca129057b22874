//! Pre-rendered snapshots standing in for host rasterization.

use std::path::PathBuf;

use async_trait::async_trait;
use deck_core::{NodeId, SceneNode};
use deck_export::{RasterError, RasterResult, RasterSettings, Rasterizer};

/// File name of a node's snapshot: the id with `:` and `/` replaced by `-`.
#[must_use]
pub fn snapshot_file_name(id: &NodeId) -> String {
    format!("{}.png", id.as_str().replace([':', '/'], "-"))
}

/// Serves `<dir>/<node id>.png` for each rasterization request.
///
/// Without a directory every request fails, so every node takes its
/// structural fallback.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRasterizer {
    dir: Option<PathBuf>,
}

impl SnapshotRasterizer {
    /// Create a rasterizer reading from `dir`.
    #[must_use]
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }
}

#[async_trait]
impl Rasterizer for SnapshotRasterizer {
    async fn rasterize(
        &self,
        node: &SceneNode,
        settings: &RasterSettings,
    ) -> RasterResult<Vec<u8>> {
        let Some(dir) = &self.dir else {
            return Err(RasterError::Missing(node.id.to_string()));
        };

        let path = dir.join(snapshot_file_name(&node.id));
        tracing::debug!(id = %node.id, path = %path.display(), scale = settings.scale, "Reading snapshot");

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(RasterError::Missing(node.id.to_string()))
            }
            Err(err) => Err(RasterError::Io(err)),
        }
    }
}
