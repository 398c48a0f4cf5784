//! One-shot reference maps for scripts and debugging, without an editor.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use serde_json::Value;
use tracing::info;

use crate::{
    config::ServerSettings,
    document::DocumentStore,
    explorer::{ExplorerError, ExplorerSession},
    graph::{GraphMessages, render},
    ide::IdePosition,
    intel::WorkspaceIntelligence,
};

/// Inputs of `verse-explorer map`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRequest {
    pub file: PathBuf,
    /// Zero-based line of the caret.
    pub line: u32,
    /// Zero-based UTF-16 column of the caret.
    pub character: u32,
    /// Directories indexed before exploring. Defaults to the file's directory.
    pub roots: Vec<PathBuf>,
    /// JSON settings file, in the same shape as LSP initialization options.
    pub config: Option<PathBuf>,
}

/// Load settings from `path`, or the defaults when no file is given.
pub async fn load_settings(path: Option<&Path>) -> Result<ServerSettings, ExplorerError> {
    let Some(path) = path else {
        return Ok(ServerSettings::default());
    };
    let raw = tokio::fs::read_to_string(path).await?;
    let payload: Value = serde_json::from_str(&raw)?;
    Ok(ServerSettings::from_lsp_payload(Some(&payload)))
}

/// Index the request's roots, explore the caret and render the graph messages.
pub async fn run_map(request: &MapRequest) -> Result<GraphMessages, ExplorerError> {
    let settings = load_settings(request.config.as_deref()).await?;
    let file = std::path::absolute(&request.file)?;

    let roots = if request.roots.is_empty() {
        file.parent().map(Path::to_path_buf).into_iter().collect()
    } else {
        request.roots.iter().map(std::path::absolute).collect::<Result<Vec<_>, _>>()?
    };

    let intelligence = Arc::new(WorkspaceIntelligence::new(Arc::new(DocumentStore::new())));
    let indexed = intelligence.scan_roots(&roots, &settings.indexing).await;
    info!("Indexed {indexed} file(s) for {}", file.display());

    let session = ExplorerSession::new(intelligence, settings.explorer, settings.layout);
    let map = session.explore(&file, IdePosition::new(request.line, request.character)).await?;
    Ok(GraphMessages {
        messages: render(&map.plan),
    })
}
