//! The editor side of the plugin.

use async_trait::async_trait;
use deck_core::SceneNode;
use deck_export::Rasterizer;

use crate::error::PluginResult;
use crate::message::UiMessage;
use crate::notification::Notification;

/// Everything the plugin needs from the host editor.
///
/// The host also rasterizes nodes, since only it can render them.
#[async_trait]
pub trait PluginHost: Rasterizer {
    /// The nodes currently selected on the active page, in selection order.
    async fn selection(&self) -> PluginResult<Vec<SceneNode>>;

    /// Show a status toast.
    async fn notify(&self, notification: &Notification) -> PluginResult<()>;

    /// Deliver a message to the UI.
    async fn post_message(&self, message: &UiMessage) -> PluginResult<()>;

    /// Close the plugin.
    async fn close(&self) -> PluginResult<()>;
}
