//! The language-intelligence capability the explorer consumes.
//!
//! The explorer never understands Verse itself. It asks an implementation of
//! [`SymbolIntelligence`] for word ranges, definition locations and document
//! outlines, and copes with approximate answers.

mod index;
mod memory;
mod verse_outline;
mod workspace;

use std::{fmt, path::Path, sync::Arc};

pub use index::SymbolIndex;
pub use memory::MemoryIntelligence;
pub use verse_outline::scan_outline;
pub use workspace::WorkspaceIntelligence;

use crate::{
    document::Document,
    ide::navigation::{IdeLocation, IdePosition, IdeRange},
};

/// Declaration kinds reported by an outline.
///
/// `Display` yields the editor's kind names (`"Class"`, `"Method"`, ...),
/// which is what classification and definition extraction match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineKind {
    Module,
    Class,
    Interface,
    Struct,
    Enum,
    EnumMember,
    Method,
    Function,
    Property,
    Variable,
    Constant,
}

impl OutlineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OutlineKind::Module => "Module",
            OutlineKind::Class => "Class",
            OutlineKind::Interface => "Interface",
            OutlineKind::Struct => "Struct",
            OutlineKind::Enum => "Enum",
            OutlineKind::EnumMember => "EnumMember",
            OutlineKind::Method => "Method",
            OutlineKind::Function => "Function",
            OutlineKind::Property => "Property",
            OutlineKind::Variable => "Variable",
            OutlineKind::Constant => "Constant",
        }
    }

    /// Kinds whose declaration line may carry an inheritance list.
    pub fn has_bases(self) -> bool {
        matches!(self, OutlineKind::Class | OutlineKind::Interface)
    }
}

impl fmt::Display for OutlineKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a document outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    pub name: String,
    pub kind: OutlineKind,
    /// Free-form type/signature text.
    pub detail: String,
    /// Start is the declaration's name; end is the end of its body.
    pub range: IdeRange,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(
        name: impl Into<String>,
        kind: OutlineKind,
        detail: impl Into<String>,
        range: IdeRange,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            detail: detail.into(),
            range,
            children: Vec::new(),
        }
    }

    pub fn with_children(
        mut self,
        children: Vec<OutlineNode>,
    ) -> Self {
        self.children = children;
        self
    }
}

/// Host-provided symbol lookups.
///
/// Every answer may be approximate or missing; callers treat `None` and
/// empty results as normal outcomes.
#[tower_lsp::async_trait]
pub trait SymbolIntelligence: Send + Sync {
    async fn open_document(
        &self,
        path: &Path,
    ) -> Option<Arc<Document>>;

    /// Single-line identifier span containing `position`.
    fn word_range_at(
        &self,
        document: &Document,
        position: IdePosition,
    ) -> Option<IdeRange> {
        document.word_at(position).map(|(_, range)| range)
    }

    /// Canonical defining location of the symbol at `position`.
    async fn definition_of(
        &self,
        document: &Document,
        position: IdePosition,
    ) -> Option<IdeLocation>;

    async fn outline_of(
        &self,
        document: &Document,
    ) -> Vec<OutlineNode>;

    fn line_text_at(
        &self,
        document: &Document,
        line: u32,
    ) -> Option<String> {
        document.line_text(line as usize).map(str::to_owned)
    }

    async fn references_of(
        &self,
        _document: &Document,
        _position: IdePosition,
    ) -> Vec<IdeLocation> {
        Vec::new()
    }
}
