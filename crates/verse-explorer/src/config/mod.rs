//! Declarative settings, split into one file per category.
//!
//! [`ServerSettings`] aggregates all categories and handles JSON
//! deserialization from LSP initialization options, `didChangeConfiguration`
//! payloads and the CLI's `--config` file. Every category follows the same
//! pattern: a public struct with defaults, a private `*Patch` struct with
//! optional fields, `apply_patch()` and `normalize()`.

pub(crate) mod explorer;
pub(crate) mod indexing;
pub(crate) mod layout;
pub(crate) mod logging;

use std::collections::HashMap;

use explorer::ExplorerSettingsPatch;
pub use explorer::{
    ExplorerSettings, IdStrategy, MAX_MAX_CHAIN_LENGTH, MAX_MAX_DEFINITION_DEPTH, MIN_MAX_CHAIN_LENGTH,
    MIN_MAX_DEFINITION_DEPTH,
};
pub use indexing::IndexingSettings;
use indexing::IndexingSettingsPatch;
pub use layout::{LayoutSettings, MAX_SPACING, MIN_SPACING};
use layout::LayoutSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use logging::LoggingSettingsPatch;
use serde::Deserialize;
use serde_json::Value;

pub const SETTINGS_SECTION_KEY: &str = "verse-explorer";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerSettings {
    pub explorer: ExplorerSettings,
    pub layout: LayoutSettings,
    pub indexing: IndexingSettings,
    pub logging: LoggingSettings,
}

impl ServerSettings {
    pub fn from_lsp_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<ServerSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        if let Some(p) = patch.explorer {
            self.explorer.apply_patch(p);
        }
        if let Some(p) = patch.layout {
            self.layout.apply_patch(p);
        }
        if let Some(p) = patch.indexing {
            self.indexing.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.explorer.normalize();
        self.layout.normalize();
        self.indexing.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ServerSettingsPatch {
    explorer: Option<ExplorerSettingsPatch>,
    layout: Option<LayoutSettingsPatch>,
    indexing: Option<IndexingSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());
    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }
    candidates
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
