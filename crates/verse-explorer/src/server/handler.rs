use tower_lsp::{LanguageServer, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info, warn};

use crate::{
    ide::lsp::{ide_location_to_lsp, lsp_position_to_ide, outline_to_document_symbols},
    intel::SymbolIntelligence,
    server::{
        commands::{NAVIGATE_TO_SYMBOL, SHOW_REFERENCE_MAP, command_names},
        state::VerseExplorerServer,
    },
};

const CLIENT_NOTIFICATION_PREFIX: &str = "verse-explorer:";

#[tower_lsp::async_trait]
impl LanguageServer for VerseExplorerServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing verse-explorer...");

        let initial_settings = crate::config::ServerSettings::from_lsp_payload(params.initialization_options.as_ref());
        self.apply_settings(initial_settings).await;

        if let Some(folders) = params.workspace_folders {
            *self.workspace_roots.write().await = folders;
        } else if let Some(root) = params.root_uri {
            *self.workspace_roots.write().await = vec![WorkspaceFolder {
                uri: root,
                name: "root".to_string(),
            }];
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
                definition_provider: Some(OneOf::Left(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: command_names(),
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "verse-explorer".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        info!("verse-explorer initialized");

        let settings = self.settings_snapshot().await;
        if !settings.indexing.enable {
            info!("Skipping workspace scan because verse-explorer.indexing.enable=false");
            return;
        }
        self.spawn_workspace_scan().await;
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }

        let should_rescan = merged.indexing.enable && merged.indexing != current.indexing;
        self.apply_settings(merged).await;
        info!("Applied updated verse-explorer settings");

        if should_rescan {
            self.spawn_workspace_scan().await;
        }
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down verse-explorer");
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        let version = params.text_document.version;
        let filename = short_name(&uri);

        info!("Opened {filename} (v{version}, {} bytes)", text.len());
        if self.settings_snapshot().await.logging.level.allows_info() {
            self.client.log_message(MessageType::INFO, prefixed_client_message(format!("Opened {filename}"))).await;
        }

        self.document_store.open(uri.clone(), text, version);
        if let Some(document) = self.document_store.get(&uri) {
            self.intelligence.index_document(&document);
        }
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // Full sync: the last change carries the whole buffer.
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        if change.range.is_some() {
            warn!("Ignoring ranged change for {}; full sync was negotiated", short_name(&uri));
            return;
        }
        self.document_store.update(uri.clone(), change.text, version);
        if let Some(document) = self.document_store.get(&uri) {
            self.intelligence.index_document(&document);
        }
        debug!("Changed {} (v{version})", short_name(&uri));
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        info!("Closed {}", short_name(&uri));
        self.document_store.close(&uri);
        if let Ok(path) = uri.to_file_path() {
            self.intelligence.reindex_from_disk(&path).await;
        }
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let Ok(path) = params.text_document.uri.to_file_path() else {
            return Ok(None);
        };
        let Some(document) = self.intelligence.open_document(&path).await else {
            return Ok(None);
        };
        let outline = self.intelligence.outline_of(&document).await;
        Ok(Some(DocumentSymbolResponse::Nested(outline_to_document_symbols(&outline))))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = lsp_position_to_ide(params.text_document_position_params.position);
        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };
        let Some(document) = self.intelligence.open_document(&path).await else {
            return Ok(None);
        };
        let location = self.intelligence.definition_of(&document, position).await;
        Ok(location.as_ref().and_then(ide_location_to_lsp).map(GotoDefinitionResponse::Scalar))
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        debug!("executeCommand {}", params.command);
        match params.command.as_str() {
            SHOW_REFERENCE_MAP => self.show_reference_map(&params.arguments).await,
            NAVIGATE_TO_SYMBOL => self.navigate_to_symbol(&params.arguments).await,
            other => {
                warn!("Unknown command {other}");
                Err(tower_lsp::jsonrpc::Error::method_not_found())
            },
        }
    }
}

fn short_name(uri: &Url) -> String {
    uri.path().rsplit('/').next().unwrap_or(uri.path()).to_owned()
}

fn prefixed_client_message(message: impl AsRef<str>) -> String {
    format!("{CLIENT_NOTIFICATION_PREFIX} {}", message.as_ref())
}

#[cfg(test)]
#[path = "../../tests/src/server/handler_tests.rs"]
mod tests;
