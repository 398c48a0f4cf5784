use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use super::Document;

/// Thread-safe store of the documents the editor currently has open.
///
/// Buffers in the store shadow the on-disk contents, so explorations see
/// unsaved edits. Snapshots are handed out as `Arc<Document>`.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<Document>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (register) a new document.
    pub fn open(
        &self,
        uri: Url,
        text: String,
        version: i32,
    ) {
        self.documents.insert(uri.clone(), Arc::new(Document::new(uri, text, version)));
    }

    /// Replace the full content of a document, registering it if unknown.
    pub fn update(
        &self,
        uri: Url,
        text: String,
        version: i32,
    ) {
        match self.documents.get_mut(&uri) {
            Some(mut entry) => Arc::make_mut(entry.value_mut()).set_content(text, version),
            None => self.open(uri, text, version),
        }
    }

    pub fn close(
        &self,
        uri: &Url,
    ) {
        self.documents.remove(uri);
    }

    pub fn get(
        &self,
        uri: &Url,
    ) -> Option<Arc<Document>> {
        self.documents.get(uri).map(|r| Arc::clone(r.value()))
    }

    pub fn contains(
        &self,
        uri: &Url,
    ) -> bool {
        self.documents.contains_key(uri)
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/document_store_tests.rs"]
mod tests;
