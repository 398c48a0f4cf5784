use std::path::PathBuf;

use super::*;

fn unique_temp_dir(name: &str) -> PathBuf {
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("valid clock")
        .as_nanos();
    std::env::temp_dir().join(format!("verse-explorer-workspace-{name}-{}-{nonce}", std::process::id()))
}

const CHARACTER: &str = "\
fort_character<native><public> := interface<epic_internal>(positional, healable):
    GetTeam<public>()<transacts>:team

positional<native><public> := interface:
    GetTransform<public>()<transacts>:transform
";

const USAGE: &str = "\
hud_manager := class:
    Owner : fort_character = external{}
    Refresh():void =
        Owner.GetTeam()
";

fn workspace_with_files(name: &str) -> (PathBuf, WorkspaceIntelligence) {
    let root = unique_temp_dir(name);
    std::fs::create_dir_all(root.join("Content")).expect("temp dir");
    std::fs::create_dir_all(root.join(".git")).expect("hidden dir");
    std::fs::write(root.join("Content/character.verse"), CHARACTER).expect("write character");
    std::fs::write(root.join("Content/hud.verse"), USAGE).expect("write hud");
    std::fs::write(root.join("Content/notes.txt"), "fort_character := class:\n").expect("write notes");
    std::fs::write(root.join(".git/stale.verse"), "fort_character := class:\n").expect("write hidden");
    (root, WorkspaceIntelligence::new(Arc::new(DocumentStore::new())))
}

#[tokio::test]
async fn scan_roots_indexes_matching_files_only() {
    let (root, intel) = workspace_with_files("scan");
    let count = intel.scan_roots(std::slice::from_ref(&root), &IndexingSettings::default()).await;

    assert_eq!(count, 2);
    let declarations = intel.index().get("fort_character");
    assert_eq!(declarations.len(), 1);
    assert!(declarations[0].file_path.ends_with("Content/character.verse"));

    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn scan_roots_honors_exclude_paths() {
    let (root, intel) = workspace_with_files("exclude");
    let settings = IndexingSettings {
        exclude_paths: vec!["hud".to_string()],
        ..IndexingSettings::default()
    };
    let count = intel.scan_roots(std::slice::from_ref(&root), &settings).await;

    assert_eq!(count, 1);
    assert!(intel.index().get("hud_manager").is_empty());

    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn definition_jumps_across_files() {
    let (root, intel) = workspace_with_files("definition");
    intel.scan_roots(std::slice::from_ref(&root), &IndexingSettings::default()).await;

    let hud = intel.open_document(&root.join("Content/hud.verse")).await.expect("hud document");
    let target = intel
        .definition_of(&hud, IdePosition::new(1, 15))
        .await
        .expect("definition of fort_character");

    assert!(target.file_path.ends_with("Content/character.verse"));
    assert_eq!(target.range.start, IdePosition::new(0, 0));

    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn definition_on_declaration_returns_itself() {
    let (root, intel) = workspace_with_files("self");
    let character = intel.open_document(&root.join("Content/character.verse")).await.expect("document");

    let target = intel.definition_of(&character, IdePosition::new(3, 2)).await.expect("definition");
    assert_eq!(target.file_path, character.path());
    assert_eq!(target.range.start, IdePosition::new(3, 0));

    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn unknown_word_has_no_definition() {
    let (root, intel) = workspace_with_files("unknown");
    let hud = intel.open_document(&root.join("Content/hud.verse")).await.expect("document");

    // `external` is never declared.
    assert!(intel.definition_of(&hud, IdePosition::new(1, 30)).await.is_none());

    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn open_buffers_shadow_disk_contents() {
    let (root, intel) = workspace_with_files("shadow");
    let path = root.join("Content/hud.verse");
    let uri = Url::from_file_path(&path).expect("file uri");
    intel.store().open(uri, "score_board := class:\n".to_string(), 3);

    let document = intel.open_document(&path).await.expect("document");
    assert_eq!(document.version, 3);
    assert_eq!(intel.index().get("score_board").len(), 1);
    assert!(intel.index().get("hud_manager").is_empty());

    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn references_are_whole_word_matches() {
    let (root, intel) = workspace_with_files("references");
    intel.scan_roots(std::slice::from_ref(&root), &IndexingSettings::default()).await;
    let character = intel.open_document(&root.join("Content/character.verse")).await.expect("document");

    let references = intel.references_of(&character, IdePosition::new(1, 6)).await;
    let lines: Vec<u32> = references.iter().map(|l| l.range.start.line).collect();
    assert_eq!(references.len(), 2);
    assert!(lines.contains(&1));
    assert!(lines.contains(&3));

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn whole_word_ranges_ignore_partial_matches() {
    let ranges = whole_word_ranges("team, teams, my_team, team", 0, "team");
    let starts: Vec<u32> = ranges.iter().map(|r| r.start.character).collect();
    assert_eq!(starts, vec![0, 22]);
}
