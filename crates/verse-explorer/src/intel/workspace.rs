use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use super::{OutlineNode, SymbolIndex, SymbolIntelligence, scan_outline};
use crate::{
    config::IndexingSettings,
    document::{Document, DocumentStore, is_word_char},
    ide::navigation::{IdeLocation, IdePosition, IdeRange},
    text_pos::utf16_from_char_index,
};

/// Intelligence backed by the open buffers, the files on disk and a
/// name-based declaration index built from Verse outlines.
///
/// Definitions are resolved by declaration name alone, so overloaded or
/// shadowed names pick the declaration in the same file first and otherwise
/// the first one in path order.
#[derive(Debug)]
pub struct WorkspaceIntelligence {
    store: Arc<DocumentStore>,
    index: SymbolIndex,
    /// Path → document version the index was last built from.
    indexed: DashMap<PathBuf, i32>,
}

impl WorkspaceIntelligence {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self {
            store,
            index: SymbolIndex::new(),
            indexed: DashMap::new(),
        }
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn indexed_file_count(&self) -> usize {
        self.indexed.len()
    }

    /// Re-index the declarations of `document`.
    pub fn index_document(
        &self,
        document: &Document,
    ) {
        let path = document.path();
        let outline = scan_outline(&document.text);
        self.index.index_outline(&path, &outline);
        self.indexed.insert(path, document.version);
    }

    /// Drop everything indexed for `path`.
    pub fn forget(
        &self,
        path: &Path,
    ) {
        self.index.remove_file(path);
        self.indexed.remove(path);
    }

    /// Re-read `path` from disk and index it. Used when an editor buffer is
    /// closed and the saved contents become authoritative again.
    pub async fn reindex_from_disk(
        &self,
        path: &Path,
    ) {
        match read_document(path).await {
            Some(document) => self.index_document(&document),
            None => self.forget(path),
        }
    }

    /// Walk `roots` and index every matching source file. Returns the number
    /// of files indexed.
    pub async fn scan_roots(
        &self,
        roots: &[PathBuf],
        settings: &IndexingSettings,
    ) -> usize {
        let mut files = Vec::new();
        for root in roots {
            for entry in WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_entry(|entry| should_descend(entry, settings))
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && settings.matches_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        }
        files.sort();
        files.dedup();

        let mut indexed = 0;
        for path in files {
            if let Some(document) = self.document_for(&path).await {
                self.index_document(&document);
                indexed += 1;
            } else {
                debug!("Skipping unreadable workspace file: {}", path.display());
            }
        }
        info!("Indexed {indexed} Verse file(s), {} distinct declaration name(s)", self.index.len());
        indexed
    }

    async fn document_for(
        &self,
        path: &Path,
    ) -> Option<Arc<Document>> {
        let uri = Url::from_file_path(path).ok()?;
        if let Some(document) = self.store.get(&uri) {
            return Some(document);
        }
        read_document(path).await.map(Arc::new)
    }

    fn ensure_indexed(
        &self,
        document: &Document,
    ) {
        let current = self.indexed.get(&document.path()).map(|v| *v);
        if current != Some(document.version) {
            self.index_document(document);
        }
    }
}

#[tower_lsp::async_trait]
impl SymbolIntelligence for WorkspaceIntelligence {
    async fn open_document(
        &self,
        path: &Path,
    ) -> Option<Arc<Document>> {
        let document = self.document_for(path).await?;
        self.ensure_indexed(&document);
        Some(document)
    }

    async fn definition_of(
        &self,
        document: &Document,
        position: IdePosition,
    ) -> Option<IdeLocation> {
        self.ensure_indexed(document);
        let (word, _) = document.word_at(position)?;
        let candidates = self.index.get(&word);
        let path = document.path();

        // The caret already sits on a declaration of this name.
        if let Some(own) = candidates.iter().find(|l| l.file_path == path && l.range.contains(position)) {
            return Some(own.clone());
        }
        candidates
            .iter()
            .find(|l| l.file_path == path)
            .or_else(|| candidates.first())
            .cloned()
    }

    async fn outline_of(
        &self,
        document: &Document,
    ) -> Vec<OutlineNode> {
        scan_outline(&document.text)
    }

    async fn references_of(
        &self,
        document: &Document,
        position: IdePosition,
    ) -> Vec<IdeLocation> {
        let Some((word, _)) = document.word_at(position) else {
            return Vec::new();
        };

        let mut paths: Vec<PathBuf> = self.indexed.iter().map(|e| e.key().clone()).collect();
        paths.sort();

        let mut locations = Vec::new();
        for path in paths {
            let Some(candidate) = self.document_for(&path).await else {
                continue;
            };
            for (line_idx, line) in candidate.lines().enumerate() {
                for range in whole_word_ranges(line, line_idx as u32, &word) {
                    locations.push(IdeLocation::new(path.clone(), range));
                }
            }
        }
        locations
    }
}

async fn read_document(path: &Path) -> Option<Document> {
    let uri = Url::from_file_path(path).ok()?;
    let text = tokio::fs::read_to_string(path).await.ok()?;
    Some(Document::new(uri, text, 0))
}

fn should_descend(
    entry: &DirEntry,
    settings: &IndexingSettings,
) -> bool {
    if settings.is_excluded(entry.path()) {
        return false;
    }
    // Hidden directories such as `.git` or `.urc` never hold project sources.
    !(entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with('.'))
}

fn whole_word_ranges(
    line: &str,
    line_idx: u32,
    word: &str,
) -> Vec<IdeRange> {
    let chars: Vec<char> = line.chars().collect();
    let needle: Vec<char> = word.chars().collect();
    let mut ranges = Vec::new();
    if needle.is_empty() || needle.len() > chars.len() {
        return ranges;
    }
    for start in 0..=chars.len() - needle.len() {
        let end = start + needle.len();
        if chars[start..end] != needle[..] {
            continue;
        }
        let bounded_left = start == 0 || !is_word_char(chars[start - 1]);
        let bounded_right = end == chars.len() || !is_word_char(chars[end]);
        if bounded_left && bounded_right {
            ranges.push(IdeRange::new(
                IdePosition::new(line_idx, utf16_from_char_index(line, start)),
                IdePosition::new(line_idx, utf16_from_char_index(line, end)),
            ));
        }
    }
    ranges
}

#[cfg(test)]
#[path = "../../tests/src/intel/workspace_tests.rs"]
mod tests;
