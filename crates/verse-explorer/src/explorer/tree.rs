use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

use super::{
    resolver::ResolvedSymbol,
    session::ExplorerSession,
    symbol::{ExpandableSymbol, RootSymbol, SimpleSymbol, SymbolLocation},
};
use crate::{
    document::Document,
    ide::navigation::IdePosition,
    intel::{OutlineNode, SymbolIntelligence},
    text_pos::utf16_column_of,
};

impl<I: SymbolIntelligence> ExplorerSession<I> {
    /// One tree per chain entry. Entries missing from their document's
    /// outline are dropped.
    pub async fn build_forest(
        &self,
        chain: &[ResolvedSymbol],
    ) -> Vec<RootSymbol> {
        let mut forest = Vec::with_capacity(chain.len());
        for entry in chain {
            let Some(mut root) = self.build_tree(entry, 0).await else {
                debug!(
                    "`{}` not found in the outline of {}, dropping chain entry",
                    entry.name,
                    entry.location.file_path.display()
                );
                continue;
            };
            if self.settings().collect_usages {
                root.usages = self.collect_usages(entry).await;
            }
            forest.push(root);
        }
        forest
    }

    /// Locate `target` in its document's outline and mirror the matching
    /// declaration. `depth` counts how many definition branches deep the
    /// tree sits.
    pub fn build_tree<'a>(
        &'a self,
        target: &'a ResolvedSymbol,
        depth: usize,
    ) -> BoxFuture<'a, Option<RootSymbol>> {
        async move {
            let document = self.open(&target.location.file_path).await?;
            let outline = self.intelligence().outline_of(&document).await;
            let (node, parents) = self.find_in_outline(&document, &outline, target, &[])?;
            let expanded = self.expand(&document, node, depth).await;
            Some(RootSymbol::new(expanded, parents))
        }
        .boxed()
    }

    /// Mirror every node in `nodes`.
    pub async fn build_children(
        &self,
        document: &Document,
        nodes: &[OutlineNode],
        depth: usize,
    ) -> Vec<ExpandableSymbol> {
        let mut children = Vec::with_capacity(nodes.len());
        for node in nodes {
            children.push(self.expand(document, node, depth).await);
        }
        children
    }

    /// Depth-first search for the outline node declaring `target`, returning
    /// it with the containers passed on the way down.
    fn find_in_outline<'o>(
        &self,
        document: &Document,
        nodes: &'o [OutlineNode],
        target: &ResolvedSymbol,
        parents: &[SimpleSymbol],
    ) -> Option<(&'o OutlineNode, Vec<SimpleSymbol>)> {
        for node in nodes {
            // Start at column 0; resolved columns may sit before the outline's.
            if !node.range.from_line_start().contains(target.location.range.start) {
                continue;
            }
            if node.name == target.name {
                return Some((node, parents.to_vec()));
            }
            let mut ancestors = parents.to_vec();
            ancestors.push(self.simple_symbol(document, node));
            if let Some(found) = self.find_in_outline(document, &node.children, target, &ancestors) {
                return Some(found);
            }
        }
        None
    }

    fn expand<'a>(
        &'a self,
        document: &'a Document,
        node: &'a OutlineNode,
        depth: usize,
    ) -> BoxFuture<'a, ExpandableSymbol> {
        async move {
            let symbol = self.simple_symbol(document, node);
            let children = self.build_children(document, &node.children, depth).await;
            let definitions = if node.kind.has_bases() {
                self.extract_definitions(document, node, depth).await
            } else {
                Vec::new()
            };
            ExpandableSymbol {
                symbol,
                children,
                definitions,
            }
        }
        .boxed()
    }

    /// Trees for the bases named in the first parenthesis pair of the
    /// declaration line of `node`.
    async fn extract_definitions(
        &self,
        document: &Document,
        node: &OutlineNode,
        depth: usize,
    ) -> Vec<ExpandableSymbol> {
        if depth >= self.settings().max_definition_depth {
            debug!("Not expanding bases of `{}`: definition depth {depth} reached", node.name);
            return Vec::new();
        }
        let start = node.range.start;
        let Some(line) = self.intelligence().line_text_at(document, start.line) else {
            return Vec::new();
        };

        let mut definitions = Vec::new();
        for candidate in inheritance_candidates(&line) {
            let Some(column) = utf16_column_of(&line, candidate) else {
                continue;
            };
            let Some(resolved) = self.resolve_at(document, IdePosition::new(start.line, column)).await else {
                debug!("Base `{candidate}` of `{}` did not resolve", node.name);
                continue;
            };
            if resolved.location.file_path == document.path() && resolved.location.range.start == start {
                continue;
            }
            match self.build_tree(&resolved, depth + 1).await {
                Some(tree) => definitions.push(tree.into()),
                None => debug!("Base `{}` of `{}` has no outline entry", resolved.name, node.name),
            }
        }
        definitions
    }

    fn simple_symbol(
        &self,
        document: &Document,
        node: &OutlineNode,
    ) -> SimpleSymbol {
        let start = node.range.start;
        let line_text = self
            .intelligence()
            .line_text_at(document, start.line)
            .map(|line| line.trim_start().to_string())
            .unwrap_or_default();
        SimpleSymbol {
            id: self.next_id(),
            name: node.name.clone(),
            line_text,
            kind: node.kind.to_string(),
            signature: node.detail.clone(),
            location: SymbolLocation::new(document.path(), start.line, start.character),
            tags: Vec::new(),
        }
    }

    async fn collect_usages(
        &self,
        entry: &ResolvedSymbol,
    ) -> Vec<SymbolLocation> {
        let Some(document) = self.open(&entry.location.file_path).await else {
            return Vec::new();
        };
        self.intelligence()
            .references_of(&document, entry.location.range.start)
            .await
            .iter()
            .map(SymbolLocation::from)
            .collect()
    }
}

/// Names listed between the first `(` and the next `)` of a declaration
/// line, split on commas. Nested parentheses are not understood.
pub fn inheritance_candidates(line: &str) -> Vec<&str> {
    let Some(open) = line.find('(') else {
        return Vec::new();
    };
    let inner = &line[open + 1..];
    let Some(close) = inner.find(')') else {
        return Vec::new();
    };
    inner[..close].split(',').map(str::trim).filter(|candidate| !candidate.is_empty()).collect()
}

#[cfg(test)]
#[path = "../../tests/src/explorer/tree_tests.rs"]
mod tests;
