use std::collections::HashSet;

use super::messages::{EdgePayload, GraphMessage, GroupNode, NodePayload, SymbolNode};
use crate::explorer::{
    GraphPlan, PlanStep, PlannedNode, SimpleSymbol, classify,
    layout::{GROUP_CAPTION, GROUP_TAG},
};

/// Turn a plan into the message stream, classifying each symbol and making
/// titles unique.
pub fn render(plan: &GraphPlan) -> Vec<GraphMessage> {
    let mut titles = UniqueTitles::default();
    plan.steps
        .iter()
        .map(|step| match step {
            PlanStep::Node(PlannedNode::Symbol {
                symbol,
                position,
            }) => GraphMessage::AddNode {
                tiddler: NodePayload::Symbol(symbol_node(symbol, &mut titles)),
                position: *position,
            },
            PlanStep::Node(PlannedNode::Group {
                id,
                position,
            }) => GraphMessage::AddNode {
                tiddler: NodePayload::Group(GroupNode {
                    id: id.clone(),
                    title: titles.claim(id),
                    caption: GROUP_CAPTION.to_string(),
                    tags: vec![GROUP_TAG.to_string()],
                }),
                position: *position,
            },
            PlanStep::Edge(edge) => GraphMessage::AddEdge {
                edge: EdgePayload {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    style: edge.style,
                },
            },
        })
        .collect()
}

/// Description text shown when a node is opened.
pub fn describe(symbol: &SimpleSymbol) -> String {
    format!(
        "```ts\n{}\n```\n^^''Kind'': //{}//^^\n\n^^''Signature'': //{}//^^\n\n^^''Location'': //{} (ln: {})//^^",
        symbol.line_text,
        symbol.kind,
        symbol.signature,
        symbol.location.file_name(),
        symbol.location.line + 1
    )
}

fn symbol_node(
    symbol: &SimpleSymbol,
    titles: &mut UniqueTitles,
) -> SymbolNode {
    let classification = classify(symbol);
    let mut tags = vec![classification.tag];
    for tag in &symbol.tags {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    SymbolNode {
        id: symbol.id.clone(),
        title: titles.claim(&classification.title),
        caption: classification.title,
        tags,
        text: describe(symbol),
        location: symbol.location.clone(),
    }
}

/// The surface keys nodes by title, so repeats get ` (2)`, ` (3)`, ...
#[derive(Debug, Default)]
struct UniqueTitles {
    used: HashSet<String>,
}

impl UniqueTitles {
    fn claim(
        &mut self,
        title: &str,
    ) -> String {
        let mut candidate = title.to_string();
        let mut n = 1;
        while !self.used.insert(candidate.clone()) {
            n += 1;
            candidate = format!("{title} ({n})");
        }
        candidate
    }
}

#[cfg(test)]
#[path = "../../tests/src/graph/render_tests.rs"]
mod tests;
