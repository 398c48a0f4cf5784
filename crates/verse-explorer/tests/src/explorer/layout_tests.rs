use std::collections::HashSet;

use super::*;
use crate::explorer::symbol::{SequentialIds, SymbolLocation};

fn leaf(id: &str) -> ExpandableSymbol {
    branch(id, Vec::new(), Vec::new())
}

fn branch(
    id: &str,
    children: Vec<ExpandableSymbol>,
    definitions: Vec<ExpandableSymbol>,
) -> ExpandableSymbol {
    ExpandableSymbol {
        symbol: SimpleSymbol {
            id: id.to_string(),
            name: id.to_string(),
            line_text: String::new(),
            kind: "Class".to_string(),
            signature: String::new(),
            location: SymbolLocation::new("/game/a.verse", 0, 0),
            tags: Vec::new(),
        },
        children,
        definitions,
    }
}

fn root(node: ExpandableSymbol) -> RootSymbol {
    RootSymbol::new(node, Vec::new())
}

fn plan(forest: &[RootSymbol]) -> GraphPlan {
    plan_forest(forest, &LayoutSettings::default(), &SequentialIds::new())
}

fn at(x: i64, y: i64) -> Position {
    Position {
        x,
        y,
    }
}

fn assert_unique_positions(plan: &GraphPlan) {
    let mut seen = HashSet::new();
    for node in plan.nodes() {
        assert!(seen.insert(node.position()), "two nodes at {:?}", node.position());
    }
}

#[test]
fn lone_symbol_has_no_edges() {
    let plan = plan(&[root(leaf("a"))]);
    assert_eq!(plan.node_count(), 1);
    assert_eq!(plan.edges().count(), 0);
    assert_eq!(plan.positions()["a"], at(0, 0));
}

#[test]
fn chain_runs_left_to_right_with_bold_edges() {
    let plan = plan(&[root(leaf("a")), root(leaf("b")), root(leaf("c"))]);
    let positions = plan.positions();
    assert_eq!(positions["a"], at(0, 0));
    assert_eq!(positions["b"], at(160, 0));
    assert_eq!(positions["c"], at(320, 0));

    let edges: Vec<(&str, &str, EdgeStyle)> =
        plan.edges().map(|e| (e.from.as_str(), e.to.as_str(), e.style)).collect();
    assert_eq!(edges, vec![("a", "b", EdgeStyle::Bold), ("b", "c", EdgeStyle::Bold)]);
}

#[test]
fn children_stack_below_grouping_node_and_definitions_follow() {
    let entry = branch("a", vec![leaf("c1"), leaf("c2")], vec![leaf("d1"), leaf("d2")]);
    let plan = plan(&[root(entry)]);
    let positions = plan.positions();

    assert_eq!(positions["a"], at(0, 0));
    assert_eq!(positions["node-1"], at(0, 120));
    assert_eq!(positions["c1"], at(0, 240));
    assert_eq!(positions["c2"], at(0, 320));
    assert_eq!(positions["d1"], at(160, 240));
    assert_eq!(positions["d2"], at(320, 240));

    let edges: Vec<(&str, &str, EdgeStyle)> =
        plan.edges().map(|e| (e.from.as_str(), e.to.as_str(), e.style)).collect();
    assert_eq!(
        edges,
        vec![
            ("a", "node-1", EdgeStyle::Normal),
            ("node-1", "c1", EdgeStyle::Light),
            ("node-1", "c2", EdgeStyle::Light),
            ("node-1", "d1", EdgeStyle::Normal),
            ("node-1", "d2", EdgeStyle::Normal),
        ]
    );
}

#[test]
fn emission_order_is_node_group_branches_then_bold_edge() {
    let plan = plan(&[root(leaf("a")), root(branch("b", vec![leaf("c")], Vec::new()))]);
    let order: Vec<String> = plan
        .steps
        .iter()
        .map(|step| match step {
            PlanStep::Node(node) => node.id().to_string(),
            PlanStep::Edge(edge) => format!("{}->{}", edge.from, edge.to),
        })
        .collect();
    assert_eq!(order, vec!["a", "b", "node-1", "b->node-1", "c", "node-1->c", "a->b"]);
}

#[test]
fn definition_branches_recurse_one_row_lower() {
    let d1 = branch("d1", vec![leaf("d1c")], vec![leaf("d1d")]);
    let plan = plan(&[root(branch("a", Vec::new(), vec![d1, leaf("d2")]))]);
    let positions = plan.positions();

    assert_eq!(positions["d1"], at(0, 240));
    assert_eq!(positions["d1c"], at(0, 360));
    assert_eq!(positions["d1d"], at(160, 360));
    // d1 spans two columns, so d2 moves past both.
    assert_eq!(positions["d2"], at(320, 240));
    assert!(plan.edges().any(|e| e.from == "d1" && e.to == "d1c" && e.style == EdgeStyle::Light));
    assert!(plan.edges().any(|e| e.from == "d1" && e.to == "d1d" && e.style == EdgeStyle::Normal));
}

#[test]
fn next_chain_entry_clears_previous_subtree() {
    let wide = branch("a", vec![leaf("c")], vec![leaf("d1"), leaf("d2"), leaf("d3")]);
    let plan = plan(&[root(wide), root(leaf("b"))]);
    let positions = plan.positions();
    assert_eq!(positions["d3"], at(480, 240));
    assert_eq!(positions["b"], at(640, 0));
    assert_unique_positions(&plan);
}

#[test]
fn children_are_not_expanded() {
    let child = branch("c", vec![leaf("cc")], vec![leaf("cd")]);
    let plan = plan(&[root(branch("a", vec![child], Vec::new()))]);
    let positions = plan.positions();
    assert!(positions.contains_key("c"));
    assert!(!positions.contains_key("cc"));
    assert!(!positions.contains_key("cd"));
}

#[test]
fn deep_nested_forest_never_overlaps() {
    fn tree(
        prefix: &str,
        depth: usize,
    ) -> ExpandableSymbol {
        let children = (0..depth).map(|i| leaf(&format!("{prefix}c{i}"))).collect();
        let definitions = if depth == 0 {
            Vec::new()
        } else {
            (0..depth).map(|i| tree(&format!("{prefix}d{i}"), depth - 1)).collect()
        };
        branch(prefix, children, definitions)
    }

    let forest = vec![root(tree("x", 3)), root(leaf("y")), root(tree("z", 2))];
    let plan = plan(&forest);
    let ids: HashSet<&str> = plan.nodes().map(PlannedNode::id).collect();
    assert_eq!(ids.len(), plan.node_count());
    assert_unique_positions(&plan);
}

#[test]
fn spacing_comes_from_settings() {
    let settings = LayoutSettings {
        horizontal_spacing: 10,
        vertical_spacing: 20,
        children_vertical_spacing: 5,
    };
    let forest = [root(branch("a", vec![leaf("c1"), leaf("c2")], Vec::new())), root(leaf("b"))];
    let plan = plan_forest(&forest, &settings, &SequentialIds::new());
    let positions = plan.positions();
    assert_eq!(positions["c2"], at(0, 45));
    assert_eq!(positions["b"], at(10, 0));
}
