use tracing::debug;

use super::session::ExplorerSession;
use crate::{
    document::Document,
    ide::navigation::{IdeLocation, IdePosition, IdeRange},
    intel::SymbolIntelligence,
    text_pos::{char_index_from_utf16, utf16_column_of},
};

/// Best-effort identity of the symbol at a point: a name and where it is
/// declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSymbol {
    pub name: String,
    /// Always empty here; kinds come from outlines.
    pub kind: String,
    pub detail: String,
    pub location: IdeLocation,
}

impl ResolvedSymbol {
    pub fn new(
        name: impl Into<String>,
        location: IdeLocation,
    ) -> Self {
        Self {
            name: name.into(),
            kind: String::new(),
            detail: String::new(),
            location,
        }
    }
}

impl<I: SymbolIntelligence> ExplorerSession<I> {
    /// Resolve the word at `position` to its declaration.
    ///
    /// Without a definition the word itself is the answer. When the
    /// definition lands on a different word (a container rather than the
    /// named token) the first occurrence of the original name on the
    /// definition's line is used instead.
    pub async fn resolve_at(
        &self,
        document: &Document,
        position: IdePosition,
    ) -> Option<ResolvedSymbol> {
        let intel = self.intelligence();
        let (name, range) = word_symbol(intel, document, position)?;

        let Some(definition) = intel.definition_of(document, position).await else {
            return Some(ResolvedSymbol::new(name, IdeLocation::new(document.path(), range)));
        };

        let target = self.open(&definition.file_path).await?;
        let start = definition.range.start;
        if let Some((candidate, range)) = word_symbol(intel, &target, start)
            && candidate == name
        {
            return Some(ResolvedSymbol::new(candidate, IdeLocation::new(definition.file_path, range)));
        }

        let line = intel.line_text_at(&target, start.line)?;
        let column = utf16_column_of(&line, &name)?;
        let (recovered, range) = word_symbol(intel, &target, IdePosition::new(start.line, column))?;
        debug!(
            "Definition of `{name}` landed elsewhere on {}:{}, recovered `{recovered}`",
            definition.file_path.display(),
            start.line + 1
        );
        Some(ResolvedSymbol::new(recovered, IdeLocation::new(definition.file_path, range)))
    }
}

/// Name and single-line range of the word at `position`.
fn word_symbol<I: SymbolIntelligence + ?Sized>(
    intel: &I,
    document: &Document,
    position: IdePosition,
) -> Option<(String, IdeRange)> {
    let range = intel.word_range_at(document, position)?;
    if !range.is_single_line() {
        return None;
    }
    let line = intel.line_text_at(document, range.start.line)?;
    let start = char_index_from_utf16(&line, range.start.character);
    let end = char_index_from_utf16(&line, range.end.character);
    let name: String = line.chars().skip(start).take(end.saturating_sub(start)).collect();
    if name.is_empty() {
        return None;
    }
    Some((name, range))
}

#[cfg(test)]
#[path = "../../tests/src/explorer/resolver_tests.rs"]
mod tests;
