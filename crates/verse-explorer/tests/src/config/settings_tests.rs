use serde_json::json;

use super::*;

#[test]
fn parses_namespaced_payload() {
    let payload = json!({
        "verse-explorer": {
            "explorer": {
                "maxChainLength": 8,
                "maxDefinitionDepth": 2,
                "collectUsages": true,
                "idStrategy": "sequential"
            },
            "layout": {
                "horizontalSpacing": 200,
                "verticalSpacing": 100,
                "childrenVerticalSpacing": 60
            },
            "indexing": {
                "fileExtensions": [".verse", "digest"],
                "excludePaths": [" /tmp/generated ", ""]
            },
            "logging": {
                "level": "debug"
            }
        }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.explorer.max_chain_length, 8);
    assert_eq!(settings.explorer.max_definition_depth, 2);
    assert!(settings.explorer.collect_usages);
    assert_eq!(settings.explorer.id_strategy, IdStrategy::Sequential);
    assert_eq!(settings.layout.horizontal_spacing, 200);
    assert_eq!(settings.layout.vertical_spacing, 100);
    assert_eq!(settings.layout.children_vertical_spacing, 60);
    assert_eq!(settings.indexing.file_extensions, vec!["verse".to_string(), "digest".to_string()]);
    assert_eq!(settings.indexing.exclude_paths, vec!["/tmp/generated".to_string()]);
    assert_eq!(settings.logging.level, LogLevel::Debug);
}

#[test]
fn parses_direct_payload() {
    let payload = json!({
        "indexing": { "enable": false },
        "explorer": { "idStrategy": "uuid" }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert!(!settings.indexing.enable);
    assert_eq!(settings.explorer.id_strategy, IdStrategy::Uuid);
}

#[test]
fn clamps_numeric_values() {
    let payload = json!({
        "explorer": { "maxChainLength": 0, "maxDefinitionDepth": 1000 },
        "layout": { "horizontalSpacing": -5, "verticalSpacing": 999999 }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.explorer.max_chain_length, MIN_MAX_CHAIN_LENGTH);
    assert_eq!(settings.explorer.max_definition_depth, MAX_MAX_DEFINITION_DEPTH);
    assert_eq!(settings.layout.horizontal_spacing, MIN_SPACING);
    assert_eq!(settings.layout.vertical_spacing, MAX_SPACING);
}

#[test]
fn empty_extension_list_falls_back_to_verse() {
    let payload = json!({ "indexing": { "fileExtensions": ["  ", "."] } });
    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.indexing.file_extensions, vec!["verse".to_string()]);
}

#[test]
fn invalid_section_keeps_previous_values() {
    let current = ServerSettings::from_lsp_payload(Some(&json!({ "explorer": { "maxChainLength": 5 } })));
    let merged = current.merged_with_payload(&json!({ "explorer": { "maxChainLength": "many" } }));
    assert_eq!(merged.explorer.max_chain_length, 5);
}

#[test]
fn missing_payload_uses_defaults() {
    let settings = ServerSettings::from_lsp_payload(None);
    assert_eq!(settings, ServerSettings::default());
    assert_eq!(settings.layout.horizontal_spacing, 160);
    assert_eq!(settings.explorer.max_chain_length, 32);
}
