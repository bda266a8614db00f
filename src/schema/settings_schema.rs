use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Setting;

/// Group name marking the theme-author metadata entry of `settings_schema.json`.
pub const THEME_INFO_GROUP: &str = "theme_info";

/// A named group of global theme settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub settings: Vec<Setting>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettingsGroup {
    /// The theme-info group holds author metadata (`theme_name`,
    /// `theme_author`, ...) and is excluded from localization entirely.
    pub fn is_theme_info(&self) -> bool {
        self.name == THEME_INFO_GROUP
    }
}

/// Global theme settings, either grouped (the usual shape) or a flat list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingsSchema {
    Groups(Vec<SettingsGroup>),
    Flat(Vec<Setting>),
}
