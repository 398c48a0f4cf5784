use std::path::PathBuf;

use super::*;
use crate::intel::OutlineKind;

fn node(name: &str, line: u32, character: u32) -> OutlineNode {
    OutlineNode::new(
        name,
        OutlineKind::Class,
        "",
        IdeRange::new(IdePosition::new(line, character), IdePosition::new(line + 2, 0)),
    )
}

#[test]
fn index_outline_records_name_ranges() {
    let index = SymbolIndex::new();
    let path = PathBuf::from("/game/a.verse");
    let outline = vec![node("outer", 0, 0).with_children(vec![node("inner", 1, 4)])];
    index.index_outline(&path, &outline);

    let inner = index.get("inner");
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].range, IdeRange::new(IdePosition::new(1, 4), IdePosition::new(1, 9)));
    assert_eq!(index.len(), 2);
}

#[test]
fn reindexing_replaces_previous_entries() {
    let index = SymbolIndex::new();
    let path = PathBuf::from("/game/a.verse");
    index.index_outline(&path, &[node("old_name", 0, 0)]);
    index.index_outline(&path, &[node("new_name", 0, 0)]);

    assert!(index.get("old_name").is_empty());
    assert_eq!(index.get("new_name").len(), 1);
}

#[test]
fn get_is_sorted_by_path() {
    let index = SymbolIndex::new();
    index.index_outline(&PathBuf::from("/game/z.verse"), &[node("shared", 3, 0)]);
    index.index_outline(&PathBuf::from("/game/a.verse"), &[node("shared", 7, 0)]);

    let paths: Vec<_> = index.get("shared").into_iter().map(|l| l.file_path).collect();
    assert_eq!(paths, vec![PathBuf::from("/game/a.verse"), PathBuf::from("/game/z.verse")]);
}
