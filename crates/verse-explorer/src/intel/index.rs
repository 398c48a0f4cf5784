use std::path::Path;

use dashmap::DashMap;

use super::OutlineNode;
use crate::ide::navigation::{IdeLocation, IdePosition, IdeRange};

/// Declaration name → every location declaring that name.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    map: DashMap<String, Vec<IdeLocation>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &self,
        name: String,
        loc: IdeLocation,
    ) {
        self.map.entry(name).or_default().push(loc);
    }

    /// Locations sorted by path, then position.
    pub fn get(
        &self,
        name: &str,
    ) -> Vec<IdeLocation> {
        let mut locations = self.map.get(name).map(|v| v.clone()).unwrap_or_default();
        locations.sort_by(|a, b| a.file_path.cmp(&b.file_path).then(a.range.start.cmp(&b.range.start)));
        locations
    }

    /// Replace everything indexed for `path` with the declarations in `outline`.
    pub fn index_outline(
        &self,
        path: &Path,
        outline: &[OutlineNode],
    ) {
        self.remove_file(path);
        for node in flatten(outline) {
            let start = node.range.start;
            let end = IdePosition::new(start.line, start.character + node.name.encode_utf16().count() as u32);
            self.insert(node.name.clone(), IdeLocation::new(path, IdeRange::new(start, end)));
        }
    }

    pub fn remove_file(
        &self,
        path: &Path,
    ) {
        for mut entry in self.map.iter_mut() {
            entry.value_mut().retain(|l| l.file_path.as_path() != path);
        }
        self.map.retain(|_, v| !v.is_empty());
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn flatten(nodes: &[OutlineNode]) -> Vec<&OutlineNode> {
    let mut result = Vec::new();
    for node in nodes {
        result.push(node);
        result.extend(flatten(&node.children));
    }
    result
}

#[cfg(test)]
#[path = "../../tests/src/intel/index_tests.rs"]
mod tests;
