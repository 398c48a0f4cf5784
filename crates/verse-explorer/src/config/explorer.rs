use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

pub const MIN_MAX_CHAIN_LENGTH: usize = 1;
pub const MAX_MAX_CHAIN_LENGTH: usize = 256;
pub const MIN_MAX_DEFINITION_DEPTH: usize = 0;
pub const MAX_MAX_DEFINITION_DEPTH: usize = 16;

/// How graph node ids are minted within one exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerSettings {
    /// Upper bound on chain entries, including the caret symbol.
    pub max_chain_length: usize,
    /// How many inheritance levels definition branches are expanded.
    pub max_definition_depth: usize,
    pub collect_usages: bool,
    pub id_strategy: IdStrategy,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            max_chain_length: 32,
            max_definition_depth: 4,
            collect_usages: false,
            id_strategy: IdStrategy::Uuid,
        }
    }
}

impl ExplorerSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: ExplorerSettingsPatch,
    ) {
        if let Some(v) = patch.max_chain_length {
            self.max_chain_length = v;
        }
        if let Some(v) = patch.max_definition_depth {
            self.max_definition_depth = v;
        }
        if let Some(v) = patch.collect_usages {
            self.collect_usages = v;
        }
        if let Some(v) = patch.id_strategy {
            self.id_strategy = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.max_chain_length = self.max_chain_length.clamp(MIN_MAX_CHAIN_LENGTH, MAX_MAX_CHAIN_LENGTH);
        self.max_definition_depth = self.max_definition_depth.clamp(MIN_MAX_DEFINITION_DEPTH, MAX_MAX_DEFINITION_DEPTH);
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ExplorerSettingsPatch {
    pub(crate) max_chain_length: Option<usize>,
    pub(crate) max_definition_depth: Option<usize>,
    pub(crate) collect_usages: Option<bool>,
    pub(crate) id_strategy: Option<IdStrategy>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
