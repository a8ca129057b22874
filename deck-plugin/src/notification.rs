//! User-facing status toasts.

use std::fmt;

use deck_core::ExportError;

use crate::error::PluginError;

/// A short status message shown by the host after an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The export finished, possibly with per-node fallbacks.
    ExportSucceeded,
    /// Nothing was selected.
    SelectFrameFirst,
    /// The selection holds no exportable container.
    SelectAtLeastOneFrame,
    /// The export failed for another reason.
    ExportFailed(String),
}

impl Notification {
    /// Whether the host should present this as an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::ExportSucceeded)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExportSucceeded => f.write_str("Export succeeded"),
            Self::SelectFrameFirst => f.write_str("Select a frame to export first"),
            Self::SelectAtLeastOneFrame => f.write_str("Select at least one frame to export"),
            Self::ExportFailed(reason) => write!(f, "Export failed: {reason}"),
        }
    }
}

impl From<&ExportError> for Notification {
    fn from(err: &ExportError) -> Self {
        match err {
            ExportError::EmptySelection => Self::SelectFrameFirst,
            ExportError::NoValidRoot => Self::SelectAtLeastOneFrame,
            other => Self::ExportFailed(other.to_string()),
        }
    }
}

impl From<&PluginError> for Notification {
    fn from(err: &PluginError) -> Self {
        Self::ExportFailed(err.to_string())
    }
}
