#![allow(dead_code)]

use std::path::PathBuf;

use tower_lsp::lsp_types::{Position, Url};

pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

pub fn fixture_uri(relative_path: &str) -> Url {
    Url::from_file_path(fixture_path(relative_path)).expect("fixture path is valid file:// URI")
}

pub fn read_fixture(relative_path: &str) -> String {
    std::fs::read_to_string(fixture_path(relative_path)).expect("fixture must exist")
}

pub fn position_of(
    source: &str,
    needle: &str,
) -> Position {
    position_of_nth(source, needle, 0)
}

pub fn position_of_nth(
    source: &str,
    needle: &str,
    nth: usize,
) -> Position {
    let offset = source.match_indices(needle).nth(nth).map(|(offset, _)| offset).expect("needle must exist in source");
    let before = &source[..offset];
    let line = before.matches('\n').count() as u32;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    let character = source[line_start..offset].encode_utf16().count() as u32;
    Position::new(line, character)
}

/// Captions of every `addNode` message in a `{ "messages": [...] }` body.
pub fn node_captions(body: &serde_json::Value) -> Vec<String> {
    messages(body)
        .iter()
        .filter(|m| m["command"] == "addNode")
        .filter_map(|m| m["tiddler"]["caption"].as_str().map(str::to_owned))
        .collect()
}

/// Edge styles of every `addEdge` message.
pub fn edge_styles(body: &serde_json::Value) -> Vec<String> {
    messages(body)
        .iter()
        .filter(|m| m["command"] == "addEdge")
        .filter_map(|m| m["edge"]["type"].as_str().map(str::to_owned))
        .collect()
}

pub fn messages(body: &serde_json::Value) -> Vec<serde_json::Value> {
    body["messages"].as_array().cloned().unwrap_or_default()
}
