//! Batch export of a host selection.

use deck_core::{AspectRatio, ExportBatch, ExportError, ExportResult, SceneNode};
use futures::future::join_all;

use crate::config::ExportConfig;
use crate::exporter::NodeExporter;
use crate::raster::Rasterizer;
use crate::walker::TreeWalker;

/// Export every container in `selection` as its own document.
///
/// Roots are walked concurrently, each into its own buffer, and the
/// documents come back in selection order. Per-node failures never reach
/// the caller. Absolute transforms missing from the selection are composed
/// from local position and rotation, treating each root's parent as the page.
///
/// # Errors
///
/// Returns [`ExportError::EmptySelection`] for an empty selection and
/// [`ExportError::NoValidRoot`] when no selected node is a frame, group,
/// component or instance.
#[tracing::instrument(skip_all, fields(selected = selection.len()))]
pub async fn export_selection(
    selection: &[SceneNode],
    rasterizer: &dyn Rasterizer,
    config: &ExportConfig,
) -> ExportResult<ExportBatch> {
    if selection.is_empty() {
        return Err(ExportError::EmptySelection);
    }

    // Hosts may hand over local geometry only; host-supplied transforms are kept.
    let roots: Vec<SceneNode> = selection
        .iter()
        .filter(|n| n.is_container())
        .cloned()
        .map(|mut root| {
            root.resolve_absolute_transforms();
            root
        })
        .collect();
    let Some(first) = roots.first() else {
        return Err(ExportError::NoValidRoot);
    };
    let aspect_ratio = AspectRatio {
        width: first.geometry.width,
        height: first.geometry.height,
    };

    let documents = join_all(roots.iter().map(|root| async move {
        TreeWalker::new(NodeExporter::new(rasterizer, config))
            .export_root(root)
            .await
    }))
    .await;

    let batch = ExportBatch {
        documents,
        aspect_ratio,
    };
    tracing::info!(
        documents = batch.documents.len(),
        elements = batch.element_count(),
        "Exported selection"
    );
    Ok(batch)
}

/// Owns an export configuration and exports selections with it.
#[derive(Debug, Clone, Default)]
pub struct SelectionExporter {
    config: ExportConfig,
}

impl SelectionExporter {
    /// Create an exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export `selection`, rasterizing through `rasterizer`.
    ///
    /// # Errors
    ///
    /// See [`export_selection`].
    pub async fn export(
        &self,
        selection: &[SceneNode],
        rasterizer: &dyn Rasterizer,
    ) -> ExportResult<ExportBatch> {
        export_selection(selection, rasterizer, &self.config).await
    }
}
