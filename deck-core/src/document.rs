//! Exported documents and the batch handed to the downstream renderer.

use serde::{Deserialize, Serialize};

use crate::element::{ElementRecord, ImageElement};
use crate::{ExportError, ExportResult};

/// One export root flattened into an ordered element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedDocument {
    /// Root name.
    pub name: String,
    /// Root width.
    pub width: f64,
    /// Root height.
    pub height: f64,
    /// Records in paint order (first is painted first).
    pub elements: Vec<ElementRecord>,
    /// Bitmap of the whole root, when one was requested and the host produced it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<ImageElement>,
}

/// Canvas size reference shared by every document in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    /// Reference width.
    pub width: f64,
    /// Reference height.
    pub height: f64,
}

impl AspectRatio {
    /// Width divided by height, or `None` for a degenerate height.
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        (self.height > 0.0).then(|| self.width / self.height)
    }
}

/// The full result of one export call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBatch {
    /// One document per export root, in selection order.
    pub documents: Vec<ExportedDocument>,
    /// Taken from the first export root.
    pub aspect_ratio: AspectRatio,
}

impl ExportBatch {
    /// Total number of records across all documents.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.documents.iter().map(|d| d.elements.len()).sum()
    }

    /// Serialize the batch to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ExportResult<String> {
        serde_json::to_string(self).map_err(ExportError::Serialization)
    }

    /// Deserialize a batch from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> ExportResult<Self> {
        serde_json::from_str(json).map_err(ExportError::Serialization)
    }
}
