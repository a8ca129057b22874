//! # Saorsa Deck Plugin
//!
//! The message protocol between the host editor, the export plugin and the
//! UI that renders the slide deck.
//!
//! ## Messages
//!
//! - `export-to-ppt` (UI → plugin) - export the current selection
//! - `cancel` (UI → plugin) - close the plugin
//! - `export-data` (plugin → UI) - the exported documents and aspect ratio
//!
//! Status toasts go through [`PluginHost::notify`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod host;
pub mod message;
pub mod notification;
pub mod plugin;

pub use error::{PluginError, PluginResult};
pub use host::PluginHost;
pub use message::{PluginMessage, UiMessage};
pub use notification::Notification;
pub use plugin::{Flow, Plugin};
