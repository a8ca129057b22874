//! # Saorsa Deck CLI
//!
//! An offline host for the deck export plugin. It reads a selection captured
//! from the editor, serves pre-rendered PNG snapshots in place of live
//! rasterization and writes the UI message the plugin would post.
//!
//! ## Usage
//!
//! ```bash
//! saorsa-deck --input selection.json --snapshots renders/ --output deck.json --pretty
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Paths and export settings derived from the arguments
//! - `SnapshotRasterizer` - `<dir>/<node id>.png` lookup standing in for the host renderer
//! - `FileHost` - `PluginHost` that writes UI messages to a file or stdout

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod host;
mod selection;
mod snapshot;

pub use host::FileHost;
pub use selection::{load_selection, parse_selection};
pub use snapshot::{snapshot_file_name, SnapshotRasterizer};

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use deck_export::{ExportConfig, RasterSettings};
use deck_plugin::{Notification, Plugin};
use thiserror::Error;

/// Errors raised by the offline host.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading or writing a file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The selection file is not valid selection JSON.
    #[error("failed to parse selection: {0}")]
    Selection(#[from] serde_json::Error),
}

/// Command-line arguments for saorsa-deck.
#[derive(Debug, Clone, Parser)]
#[command(name = "saorsa-deck")]
#[command(about = "Export captured selections to slide-deck element lists")]
#[command(version)]
pub struct CliArgs {
    /// Selection JSON captured from the editor
    #[arg(long, env = "DECK_INPUT")]
    pub input: PathBuf,

    /// Directory of pre-rendered `<node id>.png` snapshots
    #[arg(long, env = "DECK_SNAPSHOTS")]
    pub snapshots: Option<PathBuf>,

    /// Output file for the export message (stdout when omitted)
    #[arg(long, env = "DECK_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Rasterization scale factor
    #[arg(long, default_value = "2")]
    pub scale: f64,

    /// Per-node rasterization timeout in milliseconds
    #[arg(long, default_value = "30000")]
    pub timeout_ms: u64,

    /// Pretty-print the output JSON
    #[arg(long)]
    pub pretty: bool,

    /// Leave out the whole-frame snapshot of each document
    #[arg(long)]
    pub no_root_snapshot: bool,
}

/// Offline host configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Selection JSON path.
    pub input: PathBuf,
    /// Snapshot directory, if any.
    pub snapshots: Option<PathBuf>,
    /// Output path; stdout when `None`.
    pub output: Option<PathBuf>,
    /// Pretty-print the output.
    pub pretty: bool,
    /// Export settings.
    pub export: ExportConfig,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        let defaults = ExportConfig::default();
        Self {
            input: args.input,
            snapshots: args.snapshots,
            output: args.output,
            pretty: args.pretty,
            export: ExportConfig {
                raster: RasterSettings {
                    scale: args.scale,
                    ..defaults.raster
                },
                raster_timeout: Duration::from_millis(args.timeout_ms),
                root_snapshot: !args.no_root_snapshot,
                ..defaults
            },
        }
    }
}

/// Load the selection, export it and deliver the result.
///
/// Returns the notification the plugin showed. A selection problem or a
/// failed write of the output is a notification, not an error.
///
/// # Errors
///
/// Returns an error if the selection cannot be read.
pub async fn run(config: CliConfig) -> anyhow::Result<Notification> {
    let selection = load_selection(&config.input).await?;
    tracing::info!(
        input = %config.input.display(),
        nodes = selection.len(),
        "Loaded selection"
    );

    let rasterizer = SnapshotRasterizer::new(config.snapshots.clone());
    let host = FileHost::new(selection, rasterizer, config.output.clone(), config.pretty);
    let plugin = Plugin::new(host, config.export);

    Ok(plugin.export().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_onto_export_config() {
        let args = CliArgs::parse_from([
            "saorsa-deck",
            "--input",
            "sel.json",
            "--scale",
            "3",
            "--timeout-ms",
            "250",
            "--pretty",
            "--no-root-snapshot",
        ]);
        let config = CliConfig::from(args);

        assert_eq!(config.input, PathBuf::from("sel.json"));
        assert!(config.output.is_none());
        assert!(config.pretty);
        assert!((config.export.raster.scale - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.export.raster_timeout, Duration::from_millis(250));
        assert!(config.export.root_background);
        assert!(!config.export.root_snapshot);
    }

    #[test]
    fn test_defaults_match_export_defaults() {
        let config = CliConfig::from(CliArgs::parse_from(["saorsa-deck", "--input", "a.json"]));
        let defaults = ExportConfig::default();
        assert!((config.export.raster.scale - defaults.raster.scale).abs() < f64::EPSILON);
        assert_eq!(config.export.raster_timeout, defaults.raster_timeout);
        assert_eq!(config.export.root_snapshot, defaults.root_snapshot);
    }
}
