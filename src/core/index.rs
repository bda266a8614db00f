//! Frequency index: which localizable strings recur across definitions.
//!
//! The index is rebuilt from the complete definition set on every pass and
//! never touched afterwards. A normalized key with more than one recorded
//! occurrence is shared; its first recorded string is the canonical value.

use std::collections::HashMap;

use super::normalize::normalize_key;
use crate::schema::{Definitions, Setting, SettingsSchema};

/// Longest `header`/`paragraph` content or `info` text (in words) that may
/// be deduplicated into the shared namespace. Longer text always stays local.
pub const MAX_SHARED_WORDS: usize = 4;

/// Number of words, counted by splitting on single spaces.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Whether gated text (content, info) is short enough to be shared.
pub fn is_shareable_text(text: &str) -> bool {
    word_count(text) <= MAX_SHARED_WORDS
}

/// Normalized key -> original strings that produced it, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyIndex {
    entries: HashMap<String, Vec<String>>,
}

impl FrequencyIndex {
    /// Index every localizable setting field of the given definitions.
    ///
    /// Traversal: definitions in key order, then each definition's settings,
    /// then its non-`@app` blocks and their settings.
    pub fn build(definitions: &Definitions) -> Self {
        let mut index = Self::default();
        for section in definitions.values() {
            index.record_settings(&section.settings);
            for block in section.blocks.iter().filter(|block| !block.is_opaque()) {
                index.record_settings(&block.settings);
            }
        }
        index
    }

    /// Index the global theme settings, skipping the theme-info group.
    pub fn from_settings_schema(schema: &SettingsSchema) -> Self {
        let mut index = Self::default();
        match schema {
            SettingsSchema::Groups(groups) => {
                for group in groups.iter().filter(|group| !group.is_theme_info()) {
                    index.record_settings(&group.settings);
                }
            }
            SettingsSchema::Flat(settings) => index.record_settings(settings),
        }
        index
    }

    fn record_settings(&mut self, settings: &[Setting]) {
        for setting in settings {
            self.record_setting(setting);
        }
    }

    fn record_setting(&mut self, setting: &Setting) {
        if setting.kind.is_text_block() {
            if let Some(content) = &setting.content {
                if is_shareable_text(content) {
                    self.record(content);
                }
            }
        }
        if setting.kind.has_options() {
            for option in &setting.options {
                self.record(&option.label);
            }
        }
        if let Some(label) = &setting.label {
            self.record(label);
        }
        if let Some(info) = &setting.info {
            if is_shareable_text(info) {
                self.record(info);
            }
        }
        if let Some(placeholder) = setting.placeholder_text() {
            self.record(placeholder);
        }
    }

    fn record(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        self.entries
            .entry(normalize_key(value))
            .or_default()
            .push(value.to_string());
    }

    /// All recorded strings for a normalized key, duplicates included.
    pub fn occurrences(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Canonical (first-seen) value when the key is shared.
    pub fn shared_value(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .filter(|values| values.len() > 1)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn has_shared(&self) -> bool {
        self.entries.values().any(|values| values.len() > 1)
    }

    /// Shared keys in sorted order.
    pub fn shared_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, values)| values.len() > 1)
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn definitions(value: serde_json::Value) -> Definitions {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_word_count_gate() {
        assert_eq!(word_count("Welcome to our store"), 4);
        assert!(is_shareable_text("Welcome to our store"));
        assert!(!is_shareable_text("Welcome to our lovely store"));
        // Splitting on single spaces counts empty words too
        assert_eq!(word_count("Two  spaces"), 3);
    }

    #[test]
    fn test_records_original_strings_per_key() {
        let defs = definitions(json!({
            "footer": { "name": "Footer", "settings": [
                { "type": "text", "id": "heading", "label": "Heading" }
            ]},
            "hero": { "name": "Hero", "settings": [
                { "type": "text", "id": "heading", "label": "heading" },
                { "type": "text", "id": "title", "label": "Title" }
            ]}
        }));

        let index = FrequencyIndex::build(&defs);
        assert_eq!(index.occurrences("heading"), ["Heading", "heading"]);
        assert_eq!(index.shared_value("heading"), Some("Heading"));
        assert_eq!(index.occurrences("title"), ["Title"]);
        assert_eq!(index.shared_value("title"), None);
        assert_eq!(index.shared_keys(), vec!["heading"]);
    }

    #[test]
    fn test_identical_strings_in_one_section_are_shared() {
        let defs = definitions(json!({
            "hero": { "name": "Hero", "settings": [
                { "type": "image_picker", "id": "desktop", "label": "Image" },
                { "type": "image_picker", "id": "mobile", "label": "Image" }
            ]}
        }));

        let index = FrequencyIndex::build(&defs);
        assert_eq!(index.occurrences("image").len(), 2);
        assert!(index.has_shared());
    }

    #[test]
    fn test_long_content_is_not_indexed() {
        let long = "This text has five words";
        let defs = definitions(json!({
            "a": { "name": "A", "settings": [
                { "type": "paragraph", "content": long },
                { "type": "header", "content": "Four words right here" }
            ]},
            "b": { "name": "B", "settings": [
                { "type": "paragraph", "content": long },
                { "type": "text", "id": "x", "label": "X", "info": long }
            ]}
        }));

        let index = FrequencyIndex::build(&defs);
        assert!(index.occurrences(&normalize_key(long)).is_empty());
        assert_eq!(index.occurrences("four_words_right_here").len(), 1);
    }

    #[test]
    fn test_options_and_placeholders() {
        let defs = definitions(json!({
            "a": { "name": "A", "settings": [
                { "type": "select", "id": "align", "label": "Alignment", "options": [
                    { "value": "left", "label": "Left" },
                    { "value": "right", "label": "Right" }
                ]},
                { "type": "text", "id": "t", "label": "Text", "placeholder": "Left" },
                { "type": "number", "id": "n", "label": "Count", "placeholder": 3 }
            ]}
        }));

        let index = FrequencyIndex::build(&defs);
        assert_eq!(index.occurrences("left"), ["Left", "Left"]);
        assert_eq!(index.occurrences("right"), ["Right"]);
        assert!(index.occurrences("3").is_empty());
    }

    #[test]
    fn test_app_blocks_are_skipped() {
        let defs = definitions(json!({
            "a": { "name": "A", "blocks": [
                { "type": "@app", "settings": [{ "type": "text", "id": "x", "label": "Hidden" }] },
                { "type": "row", "name": "Row", "settings": [{ "type": "text", "id": "x", "label": "Shown" }] }
            ]}
        }));

        let index = FrequencyIndex::build(&defs);
        assert!(index.occurrences("hidden").is_empty());
        assert_eq!(index.occurrences("shown"), ["Shown"]);
    }

    #[test]
    fn test_settings_schema_index_skips_theme_info() {
        let schema: SettingsSchema = serde_json::from_value(json!([
            { "name": "theme_info", "settings": [{ "type": "text", "id": "a", "label": "Colors" }] },
            { "name": "Colors", "settings": [
                { "type": "color", "id": "bg", "label": "Background" },
                { "type": "color", "id": "fg", "label": "Background" }
            ]}
        ]))
        .unwrap();

        let index = FrequencyIndex::from_settings_schema(&schema);
        assert!(index.occurrences("colors").is_empty());
        assert_eq!(index.shared_value("background"), Some("Background"));
    }

    #[test]
    fn test_empty_strings_are_not_recorded() {
        let defs = definitions(json!({
            "a": { "name": "A", "settings": [{ "type": "text", "id": "x", "label": "" }] },
            "b": { "name": "B", "settings": [{ "type": "text", "id": "x", "label": "" }] }
        }));

        assert!(FrequencyIndex::build(&defs).is_empty());
    }
}
