//! A plugin host backed by files.

use std::path::PathBuf;

use async_trait::async_trait;
use deck_core::SceneNode;
use deck_export::{RasterResult, RasterSettings, Rasterizer};
use deck_plugin::{Notification, PluginHost, PluginResult, UiMessage};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::snapshot::SnapshotRasterizer;

/// Hosts the plugin outside the editor.
///
/// UI messages are written as JSON to the output file, or to stdout when
/// there is none. Notifications are logged and kept for inspection.
pub struct FileHost {
    selection: Vec<SceneNode>,
    rasterizer: SnapshotRasterizer,
    output: Option<PathBuf>,
    pretty: bool,
    notifications: Mutex<Vec<Notification>>,
}

impl FileHost {
    /// Create a host for a loaded selection.
    #[must_use]
    pub fn new(
        selection: Vec<SceneNode>,
        rasterizer: SnapshotRasterizer,
        output: Option<PathBuf>,
        pretty: bool,
    ) -> Self {
        Self {
            selection,
            rasterizer,
            output,
            pretty,
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// Notifications shown so far, oldest first.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().await.clone()
    }
}

#[async_trait]
impl Rasterizer for FileHost {
    async fn rasterize(
        &self,
        node: &SceneNode,
        settings: &RasterSettings,
    ) -> RasterResult<Vec<u8>> {
        self.rasterizer.rasterize(node, settings).await
    }
}

#[async_trait]
impl PluginHost for FileHost {
    async fn selection(&self) -> PluginResult<Vec<SceneNode>> {
        Ok(self.selection.clone())
    }

    async fn notify(&self, notification: &Notification) -> PluginResult<()> {
        if notification.is_error() {
            tracing::warn!("{notification}");
        } else {
            tracing::info!("{notification}");
        }
        self.notifications.lock().await.push(notification.clone());
        Ok(())
    }

    async fn post_message(&self, message: &UiMessage) -> PluginResult<()> {
        let mut json = if self.pretty {
            serde_json::to_string_pretty(message)?
        } else {
            message.to_json()?
        };
        json.push('\n');

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, json.as_bytes()).await?;
                tracing::info!(path = %path.display(), bytes = json.len(), "Wrote export message");
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(json.as_bytes()).await?;
                stdout.flush().await?;
            }
        }
        Ok(())
    }

    async fn close(&self) -> PluginResult<()> {
        tracing::debug!("Plugin closed");
        Ok(())
    }
}
