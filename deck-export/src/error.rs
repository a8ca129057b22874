//! Rasterizer error types.

use deck_core::NodeExportError;
use thiserror::Error;

/// Result type for rasterizer operations.
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors a host rasterizer can report.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The host tried and failed.
    #[error("Host rasterization failed: {0}")]
    Host(String),

    /// The host cannot rasterize this kind of node.
    #[error("Node cannot be rasterized: {0}")]
    Unsupported(String),

    /// No pre-rendered image is available for the node.
    #[error("No image available for node {0}")]
    Missing(String),

    /// Reading image data failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RasterError> for NodeExportError {
    fn from(err: RasterError) -> Self {
        match err {
            RasterError::Unsupported(reason) => Self::Unsupported(reason),
            other => Self::Raster(other.to_string()),
        }
    }
}
