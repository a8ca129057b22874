//! Plugin error types.

use thiserror::Error;

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

/// Errors raised while talking to the host or the UI.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A message could not be decoded or encoded.
    #[error("Invalid message: {0}")]
    Message(#[from] serde_json::Error),

    /// The host refused or failed a request.
    #[error("Host error: {0}")]
    Host(String),

    /// I/O error while delivering a message.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
