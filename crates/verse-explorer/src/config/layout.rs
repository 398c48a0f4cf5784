use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

pub const MIN_SPACING: i64 = 1;
pub const MAX_SPACING: i64 = 10_000;

/// Grid spacing, in renderer units, used when placing graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    /// Distance between columns.
    pub horizontal_spacing: i64,
    /// Distance between a node and the row it anchors below it.
    pub vertical_spacing: i64,
    /// Distance between stacked children.
    pub children_vertical_spacing: i64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            horizontal_spacing: 160,
            vertical_spacing: 120,
            children_vertical_spacing: 80,
        }
    }
}

impl LayoutSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: LayoutSettingsPatch,
    ) {
        if let Some(v) = patch.horizontal_spacing {
            self.horizontal_spacing = v;
        }
        if let Some(v) = patch.vertical_spacing {
            self.vertical_spacing = v;
        }
        if let Some(v) = patch.children_vertical_spacing {
            self.children_vertical_spacing = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.horizontal_spacing = self.horizontal_spacing.clamp(MIN_SPACING, MAX_SPACING);
        self.vertical_spacing = self.vertical_spacing.clamp(MIN_SPACING, MAX_SPACING);
        self.children_vertical_spacing = self.children_vertical_spacing.clamp(MIN_SPACING, MAX_SPACING);
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct LayoutSettingsPatch {
    pub(crate) horizontal_spacing: Option<i64>,
    pub(crate) vertical_spacing: Option<i64>,
    pub(crate) children_vertical_spacing: Option<i64>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
