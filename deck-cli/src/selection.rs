//! Captured selection files.

use std::path::Path;

use deck_core::SceneNode;
use serde::Deserialize;

use crate::CliError;

#[derive(Deserialize)]
#[serde(untagged)]
enum SelectionFile {
    Wrapped { selection: Vec<SceneNode> },
    Bare(Vec<SceneNode>),
}

/// Parse selection JSON, either `{ "selection": [...] }` or a bare array.
///
/// # Errors
///
/// Returns an error if the JSON does not describe a list of nodes.
pub fn parse_selection(json: &str) -> Result<Vec<SceneNode>, CliError> {
    Ok(match serde_json::from_str(json)? {
        SelectionFile::Wrapped { selection } => selection,
        SelectionFile::Bare(nodes) => nodes,
    })
}

/// Read and parse a selection file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_selection(path: &Path) -> Result<Vec<SceneNode>, CliError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_selection(&json)
}
