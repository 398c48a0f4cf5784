//! Coordinates and edges for a forest of chain trees.
//!
//! Chain entries run left to right on row 0. Below an entry with branches
//! sits a grouping node, then its children stacked downwards in one column,
//! then its definition branches side by side on the children's first row.
//! Each definition branch repeats the pattern one row lower. Horizontal
//! steps are counted in columns and widened to each subtree's span so no two
//! nodes share a position.

use std::collections::HashMap;

use serde::Serialize;

use super::symbol::{ExpandableSymbol, IdGenerator, RootSymbol, SimpleSymbol};
use crate::config::LayoutSettings;

pub const GROUP_CAPTION: &str = "Children";
pub const GROUP_TAG: &str = "has_children";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Consecutive chain entries.
    Bold,
    /// Entry to grouping node, container to definition branch.
    Normal,
    /// Grouping node or definition to a child.
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedNode {
    Symbol {
        symbol: SimpleSymbol,
        position: Position,
    },
    /// Synthetic anchor for the branches of a chain entry.
    Group {
        id: String,
        position: Position,
    },
}

impl PlannedNode {
    pub fn id(&self) -> &str {
        match self {
            Self::Symbol {
                symbol,
                ..
            } => &symbol.id,
            Self::Group {
                id,
                ..
            } => id,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Self::Symbol {
                position,
                ..
            }
            | Self::Group {
                position,
                ..
            } => *position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdge {
    pub from: String,
    pub to: String,
    pub style: EdgeStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    Node(PlannedNode),
    Edge(PlannedEdge),
}

/// Nodes and edges in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphPlan {
    pub steps: Vec<PlanStep>,
}

impl GraphPlan {
    pub fn nodes(&self) -> impl Iterator<Item = &PlannedNode> {
        self.steps.iter().filter_map(|step| match step {
            PlanStep::Node(node) => Some(node),
            PlanStep::Edge(_) => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = &PlannedEdge> {
        self.steps.iter().filter_map(|step| match step {
            PlanStep::Edge(edge) => Some(edge),
            PlanStep::Node(_) => None,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    pub fn positions(&self) -> HashMap<String, Position> {
        self.nodes().map(|node| (node.id().to_string(), node.position())).collect()
    }
}

pub fn plan_forest(
    forest: &[RootSymbol],
    settings: &LayoutSettings,
    ids: &dyn IdGenerator,
) -> GraphPlan {
    let mut planner = Planner {
        settings: *settings,
        steps: Vec::new(),
    };

    let mut column = 0;
    let mut previous: Option<&RootSymbol> = None;
    for root in forest {
        planner.symbol(&root.node.symbol, column, 0);
        if root.node.has_branches() {
            let group = ids.next_id();
            let position = planner.position(column, settings.vertical_spacing);
            planner.steps.push(PlanStep::Node(PlannedNode::Group {
                id: group.clone(),
                position,
            }));
            planner.edge(root.id(), &group, EdgeStyle::Normal);
            planner.branches(&group, &root.node, column, settings.vertical_spacing * 2);
        }
        if let Some(previous) = previous {
            planner.edge(previous.id(), root.id(), EdgeStyle::Bold);
        }
        column += span(&root.node);
        previous = Some(root);
    }

    GraphPlan {
        steps: planner.steps,
    }
}

struct Planner {
    settings: LayoutSettings,
    steps: Vec<PlanStep>,
}

impl Planner {
    fn position(
        &self,
        column: i64,
        y: i64,
    ) -> Position {
        Position {
            x: column * self.settings.horizontal_spacing,
            y,
        }
    }

    fn symbol(
        &mut self,
        symbol: &SimpleSymbol,
        column: i64,
        y: i64,
    ) {
        let position = self.position(column, y);
        self.steps.push(PlanStep::Node(PlannedNode::Symbol {
            symbol: symbol.clone(),
            position,
        }));
    }

    fn edge(
        &mut self,
        from: &str,
        to: &str,
        style: EdgeStyle,
    ) {
        self.steps.push(PlanStep::Edge(PlannedEdge {
            from: from.to_string(),
            to: to.to_string(),
            style,
        }));
    }

    /// Children of `node` in `column` from row `y` down, then its definition
    /// branches on row `y` to the right.
    fn branches(
        &mut self,
        parent_id: &str,
        node: &ExpandableSymbol,
        mut column: i64,
        y: i64,
    ) {
        if !node.children.is_empty() {
            let mut child_y = y;
            for child in &node.children {
                self.symbol(&child.symbol, column, child_y);
                self.edge(parent_id, child.id(), EdgeStyle::Light);
                child_y += self.settings.children_vertical_spacing;
            }
            column += 1;
        }

        let mut previous: Option<&ExpandableSymbol> = None;
        for definition in &node.definitions {
            if let Some(previous) = previous {
                column += advance(previous);
            }
            self.symbol(&definition.symbol, column, y);
            self.edge(parent_id, definition.id(), EdgeStyle::Normal);
            self.branches(definition.id(), definition, column, y + self.settings.vertical_spacing);
            previous = Some(definition);
        }
    }
}

/// Columns occupied by `node` and everything rendered below it.
fn span(node: &ExpandableSymbol) -> i64 {
    if !node.has_branches() {
        return 1;
    }
    let children = i64::from(!node.children.is_empty());
    (children + branch_width(&node.definitions)).max(1)
}

fn branch_width(definitions: &[ExpandableSymbol]) -> i64 {
    match definitions.split_last() {
        Some((last, rest)) => rest.iter().map(advance).sum::<i64>() + span(last),
        None => 0,
    }
}

/// Columns between a definition branch and the next one.
fn advance(definition: &ExpandableSymbol) -> i64 {
    (definition.definitions.len() as i64 + 1).max(span(definition))
}

#[cfg(test)]
#[path = "../../tests/src/explorer/layout_tests.rs"]
mod tests;
