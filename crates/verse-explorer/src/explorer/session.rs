use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use dashmap::DashMap;
use tracing::{debug, info};

use super::{
    error::ExplorerError,
    layout::{GraphPlan, plan_forest},
    resolver::ResolvedSymbol,
    symbol::{IdGenerator, RootSymbol, SequentialIds, UuidIds},
};
use crate::{
    config::{ExplorerSettings, IdStrategy, LayoutSettings},
    document::Document,
    ide::navigation::IdePosition,
    intel::SymbolIntelligence,
};

/// Everything one exploration produced.
#[derive(Debug, Clone)]
pub struct ExplorerMap {
    pub chain: Vec<ResolvedSymbol>,
    pub forest: Vec<RootSymbol>,
    pub plan: GraphPlan,
}

/// One exploration: owns its id namespace and the documents it has opened.
///
/// Sessions are cheap and not meant to be reused across carets; build a new
/// one per request so ids and cached buffers never leak between maps.
pub struct ExplorerSession<I> {
    intelligence: Arc<I>,
    settings: ExplorerSettings,
    layout: LayoutSettings,
    ids: Box<dyn IdGenerator>,
    documents: DashMap<PathBuf, Arc<Document>>,
}

impl<I: SymbolIntelligence> ExplorerSession<I> {
    pub fn new(
        intelligence: Arc<I>,
        settings: ExplorerSettings,
        layout: LayoutSettings,
    ) -> Self {
        let ids: Box<dyn IdGenerator> = match settings.id_strategy {
            IdStrategy::Uuid => Box::new(UuidIds),
            IdStrategy::Sequential => Box::new(SequentialIds::new()),
        };
        Self {
            intelligence,
            settings,
            layout,
            ids,
            documents: DashMap::new(),
        }
    }

    pub fn with_ids(
        mut self,
        ids: impl IdGenerator + 'static,
    ) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn intelligence(&self) -> &I {
        &self.intelligence
    }

    pub fn settings(&self) -> &ExplorerSettings {
        &self.settings
    }

    pub(crate) fn next_id(&self) -> String {
        self.ids.next_id()
    }

    /// Open `path` through the intelligence, memoized for this session.
    pub async fn open(
        &self,
        path: &Path,
    ) -> Option<Arc<Document>> {
        if let Some(document) = self.documents.get(path).map(|r| Arc::clone(r.value())) {
            return Some(document);
        }
        let document = self.intelligence.open_document(path).await;
        match &document {
            Some(document) => {
                self.documents.insert(path.to_path_buf(), Arc::clone(document));
            },
            None => debug!("Cannot open {}", path.display()),
        }
        document
    }

    /// Chain, forest and layout for the symbol under `caret` in `path`.
    pub async fn explore(
        &self,
        path: &Path,
        caret: IdePosition,
    ) -> Result<ExplorerMap, ExplorerError> {
        let document = self
            .open(path)
            .await
            .ok_or_else(|| ExplorerError::DocumentUnavailable(path.to_path_buf()))?;

        let chain = self.build_chain(&document, caret).await;
        if chain.is_empty() {
            return Err(ExplorerError::NoSymbolAtCaret);
        }

        let forest = self.build_forest(&chain).await;
        let plan = plan_forest(&forest, &self.layout, self.ids.as_ref());
        info!(
            "Explored `{}`: {} chain entr(ies), {} placed, {} node(s)",
            chain[0].name,
            chain.len(),
            forest.len(),
            plan.node_count()
        );
        Ok(ExplorerMap {
            chain,
            forest,
            plan,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src/explorer/session_tests.rs"]
mod tests;
