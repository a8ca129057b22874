//! Error types for export operations.

use std::time::Duration;

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that abort a whole export call.
///
/// The display text of the selection variants is the instructional message
/// shown to the user.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing was selected.
    #[error("Select a frame to export first")]
    EmptySelection,

    /// The selection holds no frame, group, component or instance.
    #[error("Select at least one frame to export")]
    NoValidRoot,

    /// Batch serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExportError {
    /// Whether this error was caused by the selection rather than by the export itself.
    #[must_use]
    pub fn is_selection_error(&self) -> bool {
        matches!(self, Self::EmptySelection | Self::NoValidRoot)
    }
}

/// A single node's preferred extraction failed.
///
/// Always recovered locally by the structural fallback; never aborts a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeExportError {
    /// The host's rasterizer reported an error.
    #[error("rasterization failed: {0}")]
    Raster(String),

    /// The host did not answer in time.
    #[error("rasterization timed out after {0:?}")]
    TimedOut(Duration),

    /// The host cannot rasterize this node.
    #[error("node cannot be rasterized: {0}")]
    Unsupported(String),
}
