use tracing::{debug, warn};

use super::{
    resolver::ResolvedSymbol,
    scanner::{find_next_annotation_tail, symbol_offsets},
    session::ExplorerSession,
};
use crate::{
    document::Document,
    ide::navigation::IdePosition,
    intel::SymbolIntelligence,
    text_pos::{char_index_from_utf16, utf16_from_char_index},
};

impl<I: SymbolIntelligence> ExplorerSession<I> {
    /// Follow type annotations forward from the symbol at `caret`.
    ///
    /// Empty when nothing resolves at the caret. The walk stops at the first
    /// step that yields nothing, or at the configured maximum length.
    pub async fn build_chain(
        &self,
        document: &Document,
        caret: IdePosition,
    ) -> Vec<ResolvedSymbol> {
        let Some(first) = self.resolve_at(document, caret).await else {
            debug!("No symbol at {}:{}", caret.line + 1, caret.character + 1);
            return Vec::new();
        };

        let limit = self.settings().max_chain_length;
        let mut chain = vec![first];
        while let Some(current) = chain.last() {
            let Some(next) = self.next_in_chain(current).await else {
                break;
            };
            if chain.len() >= limit {
                warn!("Chain from `{}` truncated at {limit} entries (next: `{}`)", chain[0].name, next.name);
                break;
            }
            debug!("Chain step: `{}` -> `{}`", current.name, next.name);
            chain.push(next);
        }
        chain
    }

    async fn next_in_chain(
        &self,
        current: &ResolvedSymbol,
    ) -> Option<ResolvedSymbol> {
        let document = self.open(&current.location.file_path).await?;
        self.follow_annotation(&document, current.location.range.start).await
    }

    /// Resolve the first symbol after the annotation that follows `from`.
    async fn follow_annotation(
        &self,
        document: &Document,
        from: IdePosition,
    ) -> Option<ResolvedSymbol> {
        let line = self.intelligence().line_text_at(document, from.line)?;
        let tail = find_next_annotation_tail(&line, char_index_from_utf16(&line, from.character))?;
        for offset in symbol_offsets(&line, tail) {
            let position = IdePosition::new(from.line, utf16_from_char_index(&line, offset));
            if let Some(symbol) = self.resolve_at(document, position).await {
                return Some(symbol);
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/src/explorer/chain_tests.rs"]
mod tests;
