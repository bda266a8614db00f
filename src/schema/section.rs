use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Setting;

/// Block type reserved for app blocks. Such blocks are owned by the app
/// that renders them and are never localized.
pub const APP_BLOCK_TYPE: &str = "@app";

/// Block type that accepts any theme block. Carries no text of its own.
pub const THEME_BLOCK_TYPE: &str = "@theme";

/// Section (or app-extension block) definitions keyed by identifier.
///
/// Ordered by key so every pass walks them in the same order.
pub type Definitions = BTreeMap<String, Section>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub settings: Vec<Setting>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Block {
    /// `@app` and `@theme` entries are references to blocks defined
    /// elsewhere; they pass through unlocalized.
    pub fn is_opaque(&self) -> bool {
        self.kind == APP_BLOCK_TYPE || self.kind == THEME_BLOCK_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A themeable component definition.
///
/// `disabled_block_files` and `generate_block_files` only steer snippet
/// scaffolding and are never written into a generated schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub settings: Vec<Setting>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<Preset>,
    #[serde(default, skip_serializing)]
    pub disabled_block_files: Vec<String>,
    #[serde(default, skip_serializing)]
    pub generate_block_files: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Section {
    /// Block types that get a scaffolded snippet file.
    pub fn block_file_types(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .filter(move |block| self.generate_block_files && !block.is_opaque())
            .map(|block| block.kind.as_str())
            .filter(move |kind| !self.disabled_block_files.iter().any(|d| d == kind))
    }
}
