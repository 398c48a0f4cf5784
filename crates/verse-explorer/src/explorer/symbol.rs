use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ide::navigation::IdeLocation;

/// A point in a source file, as sent to and received from the graph surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolLocation {
    pub path: PathBuf,
    pub line: u32,
    pub character: u32,
}

impl SymbolLocation {
    pub fn new(
        path: impl Into<PathBuf>,
        line: u32,
        character: u32,
    ) -> Self {
        Self {
            path: path.into(),
            line,
            character,
        }
    }

    /// File name shown in node descriptions.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl From<&IdeLocation> for SymbolLocation {
    fn from(location: &IdeLocation) -> Self {
        Self::new(location.file_path.clone(), location.range.start.line, location.range.start.character)
    }
}

/// One discovered declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleSymbol {
    pub id: String,
    pub name: String,
    /// Declaration line with leading indentation removed.
    pub line_text: String,
    /// Outline kind name, e.g. `"Class"` or `"Property"`.
    pub kind: String,
    /// Free-form type or signature text.
    pub signature: String,
    pub location: SymbolLocation,
    pub tags: Vec<String>,
}

/// A symbol with its nested declarations and, for classes and interfaces,
/// the trees of the bases listed on its declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandableSymbol {
    pub symbol: SimpleSymbol,
    pub children: Vec<ExpandableSymbol>,
    pub definitions: Vec<ExpandableSymbol>,
}

impl ExpandableSymbol {
    pub fn id(&self) -> &str {
        &self.symbol.id
    }

    pub fn has_branches(&self) -> bool {
        !self.children.is_empty() || !self.definitions.is_empty()
    }
}

/// The tree anchored at one chain entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSymbol {
    pub node: ExpandableSymbol,
    /// Outermost container first, immediate container last.
    pub parents: Vec<SimpleSymbol>,
    pub usages: Vec<SymbolLocation>,
    pub related: Vec<ExpandableSymbol>,
    pub devices: Vec<ExpandableSymbol>,
}

impl RootSymbol {
    pub fn new(
        node: ExpandableSymbol,
        parents: Vec<SimpleSymbol>,
    ) -> Self {
        Self {
            node,
            parents,
            usages: Vec::new(),
            related: Vec::new(),
            devices: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        self.node.id()
    }

    pub fn name(&self) -> &str {
        &self.node.symbol.name
    }
}

impl From<RootSymbol> for ExpandableSymbol {
    fn from(root: RootSymbol) -> Self {
        root.node
    }
}

/// Mints node ids for one exploration.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs, the format the graph surface expects by default.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `node-1`, `node-2`, ...; stable across runs.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("node-{n}")
    }
}

#[cfg(test)]
#[path = "../../tests/src/explorer/symbol_tests.rs"]
mod tests;
