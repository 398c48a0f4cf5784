use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tower_lsp::{
    jsonrpc,
    lsp_types::{Position, Range, ShowDocumentParams, Url, request::ShowDocument},
};
use tracing::{debug, info, warn};

use super::state::VerseExplorerServer;
use crate::{
    explorer::{ExplorerError, ExplorerSession, SymbolLocation},
    graph::{GraphMessages, InboundMessage, render},
    ide::lsp::lsp_position_to_ide,
};

pub const SHOW_REFERENCE_MAP: &str = "verseExplorer.showReferenceMap";
pub const NAVIGATE_TO_SYMBOL: &str = "verseExplorer.navigateToSymbol";

pub(crate) fn command_names() -> Vec<String> {
    vec![SHOW_REFERENCE_MAP.to_string(), NAVIGATE_TO_SYMBOL.to_string()]
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct ReferenceMapArgs {
    pub(crate) uri: Url,
    pub(crate) position: Position,
}

pub(crate) fn parse_reference_map_args(arguments: &[Value]) -> Result<ReferenceMapArgs, ExplorerError> {
    let first = arguments
        .first()
        .ok_or_else(|| ExplorerError::InvalidArguments("expected [{ uri, position }]".to_string()))?;
    serde_json::from_value(first.clone()).map_err(|err| ExplorerError::InvalidArguments(err.to_string()))
}

/// Accepts the surface's own `navigateToSymbol` message or a bare location.
pub(crate) fn parse_navigate_args(arguments: &[Value]) -> Result<SymbolLocation, ExplorerError> {
    let first = arguments
        .first()
        .ok_or_else(|| ExplorerError::InvalidArguments("expected a navigateToSymbol message".to_string()))?;
    if let Ok(InboundMessage::NavigateToSymbol {
        location,
    }) = serde_json::from_value::<InboundMessage>(first.clone())
    {
        return Ok(location);
    }
    serde_json::from_value(first.clone()).map_err(|err| ExplorerError::InvalidArguments(err.to_string()))
}

pub(crate) fn to_jsonrpc_error(err: ExplorerError) -> jsonrpc::Error {
    match err {
        ExplorerError::InvalidArguments(_) | ExplorerError::DocumentUnavailable(_) => {
            jsonrpc::Error::invalid_params(err.to_string())
        },
        _ => {
            let mut error = jsonrpc::Error::internal_error();
            error.message = err.to_string().into();
            error
        },
    }
}

impl VerseExplorerServer {
    pub(crate) async fn show_reference_map(
        &self,
        arguments: &[Value],
    ) -> jsonrpc::Result<Option<Value>> {
        match self.reference_map(arguments).await {
            Ok(messages) => {
                let value = serde_json::to_value(messages).map_err(|err| to_jsonrpc_error(err.into()))?;
                Ok(Some(value))
            },
            Err(ExplorerError::NoSymbolAtCaret) => {
                debug!("Reference map requested with no symbol under the caret");
                Ok(None)
            },
            Err(err) => {
                warn!("Reference map failed: {err}");
                Err(to_jsonrpc_error(err))
            },
        }
    }

    async fn reference_map(
        &self,
        arguments: &[Value],
    ) -> Result<GraphMessages, ExplorerError> {
        let args = parse_reference_map_args(arguments)?;
        let path = args
            .uri
            .to_file_path()
            .map_err(|_| ExplorerError::InvalidArguments(format!("not a file URI: {}", args.uri)))?;
        let settings = self.settings_snapshot().await;

        let session = ExplorerSession::new(Arc::clone(&self.intelligence), settings.explorer, settings.layout);
        let map = session.explore(&path, lsp_position_to_ide(args.position)).await?;
        let messages = render(&map.plan);
        info!("Reference map for {}: {} message(s)", path.display(), messages.len());
        Ok(GraphMessages {
            messages,
        })
    }

    pub(crate) async fn navigate_to_symbol(
        &self,
        arguments: &[Value],
    ) -> jsonrpc::Result<Option<Value>> {
        let location = parse_navigate_args(arguments).map_err(to_jsonrpc_error)?;
        let uri = Url::from_file_path(&location.path).map_err(|_| {
            to_jsonrpc_error(ExplorerError::InvalidArguments(format!(
                "not an absolute path: {}",
                location.path.display()
            )))
        })?;
        let position = Position::new(location.line, location.character);
        let params = ShowDocumentParams {
            uri,
            external: Some(false),
            take_focus: Some(true),
            selection: Some(Range::new(position, position)),
        };

        let success = match self.client.send_request::<ShowDocument>(params).await {
            Ok(result) => result.success,
            Err(err) => {
                warn!("window/showDocument failed: {err}");
                false
            },
        };
        Ok(Some(json!({ "success": success })))
    }
}

#[cfg(test)]
#[path = "../../tests/src/server/commands_tests.rs"]
mod tests;
