//! Depth-first traversal of one export root.

use futures::future::BoxFuture;
use futures::FutureExt;
use deck_core::{ElementRecord, ExportedDocument, SceneNode};

use crate::exporter::{NodeExporter, NodeOutcome};

/// Walks one export root into an ordered element list.
///
/// Emission is pre-order and children are visited in host order, so the
/// output sequence is the paint order. Every position is resolved against
/// the fixed root, never against the immediate parent.
pub struct TreeWalker<'a> {
    exporter: NodeExporter<'a>,
}

impl<'a> TreeWalker<'a> {
    /// Create a walker around a node exporter.
    #[must_use]
    pub fn new(exporter: NodeExporter<'a>) -> Self {
        Self { exporter }
    }

    /// Flatten `root` into a document.
    ///
    /// The root never becomes an element record. Its own paint becomes a
    /// leading background record, and a whole-root bitmap is attached as the
    /// document snapshot, each when the configuration asks for it.
    pub async fn export_root(&self, root: &SceneNode) -> ExportedDocument {
        let mut elements = Vec::new();

        if self.exporter.config().root_background {
            if let Some(background) = self.exporter.root_background(root) {
                elements.push(background);
            }
        }
        for child in root.children() {
            self.walk(child, root, &mut elements).await;
        }

        tracing::debug!(root = %root.id, count = elements.len(), "Walked export root");

        let snapshot = if self.exporter.config().root_snapshot {
            self.exporter.snapshot(root).await
        } else {
            None
        };

        ExportedDocument {
            name: root.name.clone(),
            width: root.geometry.width,
            height: root.geometry.height,
            elements,
            snapshot,
        }
    }

    /// Visit `node` and its descendants, appending records to `out`.
    pub fn walk<'s>(
        &'s self,
        node: &'s SceneNode,
        root: &'s SceneNode,
        out: &'s mut Vec<ElementRecord>,
    ) -> BoxFuture<'s, ()> {
        async move {
            if !node.visible {
                tracing::debug!(id = %node.id, "Skipping hidden node");
                return;
            }

            let descend = match self.exporter.export_node(node, root).await {
                NodeOutcome::Exported(record) => {
                    out.push(record);
                    false
                }
                NodeOutcome::FellBack {
                    record,
                    descend,
                    error,
                } => {
                    tracing::warn!(
                        id = %node.id,
                        name = %node.name,
                        %error,
                        "Rasterization failed, using structural fallback"
                    );
                    out.extend(record);
                    descend
                }
                NodeOutcome::Descend { background } => {
                    out.extend(background);
                    true
                }
                NodeOutcome::Skipped => false,
            };

            if descend {
                for child in node.children() {
                    self.walk(child, root, out).await;
                }
            }
        }
        .boxed()
    }
}
