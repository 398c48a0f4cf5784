use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct IndexingSettings {
    pub enable: bool,
    /// Extensions without the leading dot.
    pub file_extensions: Vec<String>,
    pub exclude_paths: Vec<String>,
}

impl Default for IndexingSettings {
    fn default() -> Self {
        Self {
            enable: true,
            file_extensions: vec!["verse".to_string()],
            exclude_paths: Vec::new(),
        }
    }
}

impl IndexingSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: IndexingSettingsPatch,
    ) {
        if let Some(v) = patch.enable {
            self.enable = v;
        }
        if let Some(v) = patch.file_extensions {
            self.file_extensions = v;
        }
        if let Some(v) = patch.exclude_paths {
            self.exclude_paths = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        let mut seen = HashSet::new();
        self.file_extensions = self
            .file_extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .filter(|e| seen.insert(e.clone()))
            .collect();
        if self.file_extensions.is_empty() {
            self.file_extensions = IndexingSettings::default().file_extensions;
        }

        let mut seen = HashSet::new();
        self.exclude_paths = self
            .exclude_paths
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(p.clone()))
            .collect();
    }

    pub fn matches_extension(
        &self,
        path: &Path,
    ) -> bool {
        path.extension().and_then(|e| e.to_str()).is_some_and(|ext| self.file_extensions.iter().any(|e| e == ext))
    }

    pub fn is_excluded(
        &self,
        path: &Path,
    ) -> bool {
        let display = path.to_string_lossy();
        self.exclude_paths.iter().any(|excluded| display.contains(excluded.as_str()))
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct IndexingSettingsPatch {
    pub(crate) enable: Option<bool>,
    pub(crate) file_extensions: Option<Vec<String>>,
    pub(crate) exclude_paths: Option<Vec<String>>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
