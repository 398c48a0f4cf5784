use std::{path::PathBuf, sync::Arc};

use tokio::sync::RwLock;
use tower_lsp::{
    Client,
    lsp_types::{MessageType, WorkspaceFolder},
};
use tracing::info;

use crate::{config::ServerSettings, document::DocumentStore, intel::WorkspaceIntelligence};

/// The verse-explorer backend that implements the Language Server Protocol.
pub struct VerseExplorerServer {
    /// The LSP client handle, used for `window/showDocument` and log messages.
    pub(crate) client: Client,

    /// Editor buffers; they shadow files on disk for every lookup.
    pub(crate) document_store: Arc<DocumentStore>,

    /// Outline scanning, name index and definition lookups.
    pub(crate) intelligence: Arc<WorkspaceIntelligence>,

    /// Workspace root folders, populated during `initialize`.
    pub(crate) workspace_roots: RwLock<Vec<WorkspaceFolder>>,

    /// Runtime server settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,
}

impl VerseExplorerServer {
    pub fn new(client: Client) -> Self {
        let document_store = Arc::new(DocumentStore::new());
        let intelligence = Arc::new(WorkspaceIntelligence::new(Arc::clone(&document_store)));
        Self {
            client,
            document_store,
            intelligence,
            workspace_roots: RwLock::new(Vec::new()),
            settings: Arc::new(RwLock::new(ServerSettings::default())),
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        *self.settings.write().await = settings;
    }

    pub(crate) async fn workspace_root_paths(&self) -> Vec<PathBuf> {
        self.workspace_roots.read().await.iter().filter_map(|f| f.uri.to_file_path().ok()).collect()
    }

    /// Index every workspace root in the background.
    pub(crate) async fn spawn_workspace_scan(&self) {
        let roots = self.workspace_root_paths().await;
        if roots.is_empty() {
            return;
        }
        let settings = self.settings_snapshot().await;
        let intelligence = Arc::clone(&self.intelligence);
        let client = self.client.clone();
        tokio::spawn(async move {
            let indexed = intelligence.scan_roots(&roots, &settings.indexing).await;
            info!("Workspace scan finished: {indexed} file(s)");
            if settings.logging.level.allows_info() {
                client
                    .log_message(MessageType::INFO, format!("verse-explorer: indexed {indexed} Verse file(s)"))
                    .await;
            }
        });
    }
}
