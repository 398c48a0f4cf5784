use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use super::{OutlineNode, SymbolIntelligence};
use crate::{
    document::Document,
    ide::navigation::{IdeLocation, IdePosition, IdeRange},
    text_pos::{utf16_column_of, utf16_len},
};

/// Fully scripted intelligence: documents, outlines, definitions and
/// references are registered up front and answered verbatim.
///
/// Useful wherever deterministic answers matter more than understanding the
/// source, most notably in tests.
#[derive(Debug, Default)]
pub struct MemoryIntelligence {
    documents: DashMap<PathBuf, Arc<Document>>,
    outlines: DashMap<PathBuf, Vec<OutlineNode>>,
    /// Per file: usage range → definition target.
    definitions: DashMap<PathBuf, Vec<(IdeRange, IdeLocation)>>,
    references: DashMap<String, Vec<IdeLocation>>,
}

impl MemoryIntelligence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document. Returns `None` when `path` is not absolute.
    pub fn add_document(
        &self,
        path: impl AsRef<Path>,
        text: &str,
    ) -> Option<Arc<Document>> {
        let path = path.as_ref();
        let uri = Url::from_file_path(path).ok()?;
        let document = Arc::new(Document::new(uri, text.to_string(), 0));
        self.documents.insert(path.to_path_buf(), Arc::clone(&document));
        Some(document)
    }

    pub fn set_outline(
        &self,
        path: impl Into<PathBuf>,
        outline: Vec<OutlineNode>,
    ) {
        self.outlines.insert(path.into(), outline);
    }

    /// Any position inside `usage` in `path` resolves to `target`.
    pub fn add_definition(
        &self,
        path: impl Into<PathBuf>,
        usage: IdeRange,
        target: IdeLocation,
    ) {
        self.definitions.entry(path.into()).or_default().push((usage, target));
    }

    pub fn add_reference(
        &self,
        name: impl Into<String>,
        location: IdeLocation,
    ) {
        self.references.entry(name.into()).or_default().push(location);
    }

    /// Range of the first occurrence of `word` on `line` of a registered document.
    pub fn word_range(
        &self,
        path: impl AsRef<Path>,
        line: u32,
        word: &str,
    ) -> Option<IdeRange> {
        let document = self.documents.get(path.as_ref())?;
        let text = document.line_text(line as usize)?;
        let start = utf16_column_of(text, word)?;
        let end = start + utf16_len(word);
        Some(IdeRange::new(IdePosition::new(line, start), IdePosition::new(line, end)))
    }

    /// Location of the first occurrence of `word` on `line`, as a definition
    /// provider would report it.
    pub fn word_location(
        &self,
        path: impl AsRef<Path>,
        line: u32,
        word: &str,
    ) -> Option<IdeLocation> {
        let range = self.word_range(path.as_ref(), line, word)?;
        Some(IdeLocation::new(path.as_ref(), range))
    }

    /// Make the first `word` on `line` of `path` resolve to the first `word`
    /// on `target_line` of `target_path`. Returns `None` when either
    /// occurrence is missing.
    pub fn link_word(
        &self,
        path: impl AsRef<Path>,
        line: u32,
        word: &str,
        target_path: impl AsRef<Path>,
        target_line: u32,
    ) -> Option<()> {
        let usage = self.word_range(path.as_ref(), line, word)?;
        let target = self.word_location(target_path, target_line, word)?;
        self.add_definition(path.as_ref(), usage, target);
        Some(())
    }
}

#[tower_lsp::async_trait]
impl SymbolIntelligence for MemoryIntelligence {
    async fn open_document(
        &self,
        path: &Path,
    ) -> Option<Arc<Document>> {
        self.documents.get(path).map(|r| Arc::clone(r.value()))
    }

    async fn definition_of(
        &self,
        document: &Document,
        position: IdePosition,
    ) -> Option<IdeLocation> {
        let entries = self.definitions.get(&document.path())?;
        entries.iter().find(|(usage, _)| usage.contains(position)).map(|(_, target)| target.clone())
    }

    async fn outline_of(
        &self,
        document: &Document,
    ) -> Vec<OutlineNode> {
        self.outlines.get(&document.path()).map(|r| r.value().clone()).unwrap_or_default()
    }

    async fn references_of(
        &self,
        document: &Document,
        position: IdePosition,
    ) -> Vec<IdeLocation> {
        let Some((word, _)) = document.word_at(position) else {
            return Vec::new();
        };
        self.references.get(&word).map(|r| r.value().clone()).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/src/intel/memory_tests.rs"]
mod tests;
