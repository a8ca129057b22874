//! Dispatch of UI messages to export runs.

use deck_export::{ExportConfig, SelectionExporter};

use crate::error::{PluginError, PluginResult};
use crate::host::PluginHost;
use crate::message::{PluginMessage, UiMessage};
use crate::notification::Notification;

/// Whether the plugin keeps running after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Wait for the next message.
    Continue,
    /// The plugin has been closed.
    Close,
}

/// The export plugin bound to a host.
pub struct Plugin<H> {
    host: H,
    exporter: SelectionExporter,
}

impl<H: PluginHost> Plugin<H> {
    /// Create a plugin for `host`.
    #[must_use]
    pub fn new(host: H, config: ExportConfig) -> Self {
        Self {
            host,
            exporter: SelectionExporter::new(config),
        }
    }

    /// The host this plugin talks to.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Decode and handle a raw UI message.
    ///
    /// # Errors
    ///
    /// Returns an error if the message is malformed or the host fails.
    pub async fn handle_raw(&self, raw: &str) -> PluginResult<Flow> {
        let message = PluginMessage::from_json(raw)?;
        self.handle_message(message).await
    }

    /// Handle a UI message.
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails to deliver a message or close.
    #[tracing::instrument(skip(self))]
    pub async fn handle_message(&self, message: PluginMessage) -> PluginResult<Flow> {
        match message {
            PluginMessage::ExportToPpt => {
                self.export().await?;
                Ok(Flow::Continue)
            }
            PluginMessage::Cancel => {
                self.host.close().await?;
                Ok(Flow::Close)
            }
            PluginMessage::Unknown => {
                tracing::debug!("Ignoring unhandled UI message");
                Ok(Flow::Continue)
            }
        }
    }

    /// Export the current selection, post the result to the UI and notify.
    ///
    /// Returns the notification that was shown. Selection problems and host
    /// failures while exporting are reported to the user, not to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error only if the notification itself cannot be shown.
    #[tracing::instrument(skip(self))]
    pub async fn export(&self) -> PluginResult<Notification> {
        let notification = match self.export_and_post().await {
            Ok(()) => Notification::ExportSucceeded,
            Err(notification) => notification,
        };

        self.host.notify(&notification).await?;
        Ok(notification)
    }

    async fn export_and_post(&self) -> Result<(), Notification> {
        let selection = self.host.selection().await.map_err(|err| host_failure(&err))?;

        let batch = self
            .exporter
            .export(&selection, &self.host)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "Export did not run");
                Notification::from(&err)
            })?;

        self.host
            .post_message(&UiMessage::from(batch))
            .await
            .map_err(|err| host_failure(&err))
    }
}

fn host_failure(err: &PluginError) -> Notification {
    tracing::error!(error = %err, "Export failed");
    Notification::from(err)
}
