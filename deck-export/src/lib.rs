//! # Saorsa Deck Export
//!
//! Flattens selected containers of a host scene graph into ordered element
//! lists, preferring host rasterization where it is the only faithful
//! representation and falling back to structural records when it fails.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        export_selection (orchestrator)      │
//! ├─────────────────────────────────────────────┤
//! │  TreeWalker per root (concurrent)           │
//! ├─────────────────────────────────────────────┤
//! │  NodeExporter: classify → record/fallback   │
//! ├─────────────────────────────────────────────┤
//! │  Rasterizer (host seam, bounded by timeout) │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod exporter;
pub mod orchestrator;
pub mod raster;
pub mod walker;

pub use config::{ExportConfig, ImageTokenPolicy, RasterFormat, RasterSettings, TextDefaults};
pub use error::{RasterError, RasterResult};
pub use exporter::{base_props, NodeExporter, NodeOutcome};
pub use orchestrator::{export_selection, SelectionExporter};
pub use raster::{MemoryRasterizer, NoRasterizer, Rasterizer};
pub use walker::TreeWalker;
