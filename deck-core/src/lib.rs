//! # Saorsa Deck Core
//!
//! Types and pure logic for flattening a host scene graph into slide-deck
//! element records.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 deck-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Scene Nodes     │  Element Records         │
//! │  - Node kinds    │  - Text / Shape          │
//! │  - Paints        │  - Image / Line          │
//! │  - Mixed values  │  - Documents, batches    │
//! ├─────────────────────────────────────────────┤
//! │  Geometry        │  Classifier              │
//! │  - Transforms    │  - Kind selection        │
//! │  - Root-relative │  - Raster fallbacks      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Nothing here performs I/O or suspends; the asynchronous export pipeline
//! lives in `deck-export`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classify;
pub mod document;
pub mod element;
pub mod error;
pub mod geometry;
pub mod mixed;
pub mod node;
pub mod paint;
pub mod typography;

pub use classify::{classify, Classification, Fallback};
pub use document::{AspectRatio, ExportBatch, ExportedDocument};
pub use element::{
    BaseProps, CornerRadius, ElementKind, ElementRecord, ImageElement, ImageFormat, ImageToken,
    LineElement, ShapeElement, ShapeSubtype, TextElement,
};
pub use error::{ExportError, ExportResult, NodeExportError};
pub use geometry::{
    resolve_line_endpoints, resolve_position, resolve_rotation, AffineTransform, Point,
};
pub use mixed::{Measure, MeasureUnit, Mixed, Spacing};
pub use node::{
    Appearance, ContainerNode, CornerRadii, Geometry, NodeId, NodeKind, SceneNode, ShapeNode,
    Style, TextNode,
};
pub use paint::{BlendMode, Paint, ScaleMode, StrokeCap, StrokeJoin};
pub use typography::FontName;

/// Deck core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
