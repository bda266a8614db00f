//! Locale bundle builder: the `<locale>.default.schema.json` tree holding the
//! real strings behind every `t:` reference the localizer emits.

use serde_json::{Map, Value};

use super::{
    error::SchemaError,
    index::FrequencyIndex,
    resolve::{KeyResolver, ResolvedField, SHARED_NAMESPACE, ScopeKind, TranslationKey},
};
use crate::schema::{Definitions, SettingsSchema};

/// Nested, insertion-ordered translation tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleTree {
    root: Map<String, Value>,
}

impl LocaleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value at the key's path, creating intermediate objects.
    pub fn insert(&mut self, key: &TranslationKey, value: &str) {
        insert_nested(&mut self.root, &key.segments(), Value::String(value.to_string()));
    }

    /// String stored at the key's path, if any.
    pub fn lookup(&self, key: &TranslationKey) -> Option<&str> {
        let segments = key.segments();
        let (last, parents) = segments.split_last()?;
        let mut current = &self.root;
        for segment in parents {
            current = current.get(*segment)?.as_object()?;
        }
        current.get(*last)?.as_str()
    }

    /// Dotted paths of every string leaf, in tree order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_leaves(&self.root, String::new(), &mut paths);
        paths
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Make sure an (empty) object exists at the path so later inserts land
    /// behind it in key order.
    fn reserve(&mut self, segments: &[&str]) {
        let mut current = &mut self.root;
        for segment in segments {
            let next = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !next.is_object() {
                *next = Value::Object(Map::new());
            }
            let Value::Object(inner) = next else {
                return;
            };
            current = inner;
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Pretty JSON with 2-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.root)
    }
}

fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        root.insert(first.to_string(), value);
        return;
    }

    let next_level = root
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    // If the existing value is not an object, replace it with an object
    if !next_level.is_object() {
        *next_level = Value::Object(Map::new());
    }

    if let Value::Object(inner) = next_level {
        insert_nested(inner, rest, value);
    }
}

fn collect_leaves(map: &Map<String, Value>, prefix: String, paths: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => collect_leaves(inner, path, paths),
            _ => paths.push(path),
        }
    }
}

/// Builds one locale bundle from any number of definition sets.
///
/// ```
/// use schemasync::core::{FrequencyIndex, LocaleBundleBuilder, ScopeKind};
/// use schemasync::schema::Definitions;
///
/// let sections: Definitions = serde_json::from_str(
///     r#"{ "hero": { "name": "Hero", "settings": [{ "type": "text", "id": "title", "label": "Title" }] } }"#,
/// )
/// .unwrap();
/// let index = FrequencyIndex::build(&sections);
///
/// let bundle = LocaleBundleBuilder::new()
///     .sections(ScopeKind::Sections, &sections, &index)
///     .unwrap()
///     .finish();
///
/// assert_eq!(
///     bundle.leaf_paths(),
///     vec!["sections.hero.name", "sections.hero.settings.title.label"]
/// );
/// ```
#[derive(Debug, Default)]
pub struct LocaleBundleBuilder {
    tree: LocaleTree,
}

impl LocaleBundleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every definition of one namespace (`sections` or `blocks`).
    pub fn sections(
        mut self,
        kind: ScopeKind,
        definitions: &Definitions,
        index: &FrequencyIndex,
    ) -> Result<Self, SchemaError> {
        let resolver = KeyResolver::new(kind, index);
        if index.has_shared() {
            self.tree.reserve(&[kind.root(), SHARED_NAMESPACE]);
        }
        for (key, section) in definitions {
            let plan = resolver.plan_section(key, section)?;
            self.insert_fields(plan.fields());
        }
        Ok(self)
    }

    /// Add the global settings under `settings_schema`. The theme-info group
    /// is skipped.
    pub fn settings_schema(
        mut self,
        schema: &SettingsSchema,
        index: &FrequencyIndex,
    ) -> Result<Self, SchemaError> {
        let resolver = KeyResolver::new(ScopeKind::SettingsSchema, index);
        if index.has_shared() {
            self.tree
                .reserve(&[ScopeKind::SettingsSchema.root(), SHARED_NAMESPACE]);
        }
        let plan = resolver.plan_settings_schema(schema)?;
        self.insert_fields(plan.fields());
        Ok(self)
    }

    fn insert_fields<'a>(&mut self, fields: impl IntoIterator<Item = &'a ResolvedField>) {
        for field in fields {
            self.tree.insert(&field.key, &field.value);
        }
    }

    pub fn finish(self) -> LocaleTree {
        self.tree
    }
}

/// Bundle for theme sections plus, optionally, the global settings schema.
///
/// The settings schema gets its own frequency index, so its shared strings
/// live under `settings_schema.all` and never mix with section strings.
pub fn build_bundle(
    sections: &Definitions,
    settings_schema: Option<&SettingsSchema>,
    index: &FrequencyIndex,
) -> Result<LocaleTree, SchemaError> {
    let builder = LocaleBundleBuilder::new().sections(ScopeKind::Sections, sections, index)?;
    let builder = match settings_schema {
        Some(schema) => {
            let settings_index = FrequencyIndex::from_settings_schema(schema);
            builder.settings_schema(schema, &settings_index)?
        }
        None => builder,
    };
    Ok(builder.finish())
}
