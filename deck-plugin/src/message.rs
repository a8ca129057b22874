//! Messages exchanged with the UI.

use deck_core::{AspectRatio, ExportBatch, ExportedDocument};
use serde::{Deserialize, Serialize};

use crate::error::PluginResult;

/// A message from the UI to the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PluginMessage {
    /// Export the current selection.
    ExportToPpt,
    /// Close the plugin.
    Cancel,
    /// Any message type this plugin does not handle.
    #[serde(other)]
    Unknown,
}

impl PluginMessage {
    /// Decode a raw UI message.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a JSON object with a `type` field.
    pub fn from_json(raw: &str) -> PluginResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// A message from the plugin to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    /// The exported documents, ready for rendering.
    #[serde(rename_all = "camelCase")]
    ExportData {
        /// One document per export root, in selection order.
        data: Vec<ExportedDocument>,
        /// Canvas size reference for every document.
        aspect_ratio: AspectRatio,
    },
}

impl From<ExportBatch> for UiMessage {
    fn from(batch: ExportBatch) -> Self {
        Self::ExportData {
            data: batch.documents,
            aspect_ratio: batch.aspect_ratio,
        }
    }
}

impl UiMessage {
    /// Encode as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> PluginResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
