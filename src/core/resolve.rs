//! Translation key resolution.
//!
//! [`KeyResolver`] decides, for every localizable field of a definition,
//! whether it points into the shared `all` namespace or to a key scoped to
//! its section/block. It produces a [`SectionPlan`] (or
//! [`SettingsSchemaPlan`]) holding each field's key together with the value
//! the locale bundle must contain for it. The schema localizer and the
//! bundle builder both consume these plans, so they cannot disagree about
//! which strings were deduplicated.

use std::{collections::HashSet, fmt};

use super::{
    error::SchemaError,
    index::{FrequencyIndex, is_shareable_text},
    normalize::normalize_key,
};
use crate::schema::{Section, Setting, SettingType, SettingsSchema};

/// Name of the shared namespace under each root.
pub const SHARED_NAMESPACE: &str = "all";

/// Which top-level namespace a set of definitions is localized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Theme sections, under `sections`.
    Sections,
    /// Theme app-extension blocks, under `blocks`.
    Blocks,
    /// Global theme settings, under `settings_schema`.
    SettingsSchema,
}

impl ScopeKind {
    pub fn root(self) -> &'static str {
        match self {
            ScopeKind::Sections => "sections",
            ScopeKind::Blocks => "blocks",
            ScopeKind::SettingsSchema => "settings_schema",
        }
    }
}

/// Localizable field of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Label,
    Info,
    Placeholder,
    Content,
    OptionLabel,
}

impl FieldKind {
    /// Gated fields are only deduplicated when short enough.
    fn is_gated(self) -> bool {
        matches!(self, FieldKind::Info | FieldKind::Content)
    }
}

/// Path into the locale bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TranslationKey {
    /// `<root>.all.<normalized key>`
    Shared { root: &'static str, key: String },
    /// Full path of a key owned by one section/block/group.
    Local { path: Vec<String> },
}

impl TranslationKey {
    pub fn segments(&self) -> Vec<&str> {
        match self {
            TranslationKey::Shared { root, key } => vec![*root, SHARED_NAMESPACE, key.as_str()],
            TranslationKey::Local { path } => path.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, TranslationKey::Shared { .. })
    }

    /// Reference string embedded in a Liquid schema, e.g. `t:sections.all.title`.
    pub fn reference(&self) -> String {
        format!("t:{self}")
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join("."))
    }
}

/// A localizable field with its key and the value the bundle holds for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub key: TranslationKey,
    pub value: String,
}

impl ResolvedField {
    fn local(key: TranslationKey, value: &str) -> Self {
        Self {
            key,
            value: value.to_string(),
        }
    }
}

/// Dotted path prefix that local keys are built under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    path: Vec<String>,
}

impl Scope {
    /// Scope of a whole namespace, e.g. a flat `settings_schema`.
    pub fn root(kind: ScopeKind) -> Self {
        Self {
            path: vec![kind.root().to_string()],
        }
    }

    /// Scope of one section, app block or settings group.
    pub fn new(kind: ScopeKind, key: &str) -> Self {
        Self::root(kind).child(&[key])
    }

    /// Scope of a block nested in this section.
    pub fn block(&self, block_type: &str) -> Self {
        self.child(&["blocks", block_type])
    }

    fn child(&self, segments: &[&str]) -> Self {
        let mut path = self.path.clone();
        path.extend(segments.iter().map(|s| s.to_string()));
        Self { path }
    }

    pub fn key(&self, tail: &[&str]) -> TranslationKey {
        TranslationKey::Local {
            path: self.child(tail).path,
        }
    }

    fn setting_key(&self, owner: &str, tail: &[&str]) -> TranslationKey {
        let mut segments = vec!["settings", owner];
        segments.extend_from_slice(tail);
        self.key(&segments)
    }

    fn settings_path(&self) -> String {
        format!("{}.settings", self)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path.join("."))
    }
}

/// Positional counters of one settings list.
///
/// A fresh counter is used for every scope, so `header__1` restarts in each
/// section, block and settings group.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScopeCounter {
    header: usize,
    paragraph: usize,
}

impl ScopeCounter {
    /// Positional key (`header__N`, `paragraph__N`) for header and paragraph
    /// settings, `None` for every other type.
    pub fn next_positional(&mut self, kind: &SettingType) -> Option<String> {
        let counter = match kind {
            SettingType::Header => &mut self.header,
            SettingType::Paragraph => &mut self.paragraph,
            _ => return None,
        };
        *counter += 1;
        Some(format!("{}__{}", kind, counter))
    }
}

/// Resolved keys of one setting, field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingKeys {
    pub label: Option<ResolvedField>,
    pub info: Option<ResolvedField>,
    pub placeholder: Option<ResolvedField>,
    pub content: Option<ResolvedField>,
    /// One entry per option, in option order. Empty unless `select`/`radio`.
    pub options: Vec<ResolvedField>,
}

impl SettingKeys {
    pub fn fields(&self) -> impl Iterator<Item = &ResolvedField> {
        self.label
            .iter()
            .chain(&self.info)
            .chain(&self.placeholder)
            .chain(&self.content)
            .chain(&self.options)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPlan {
    pub name: ResolvedField,
    pub settings: Vec<SettingKeys>,
}

/// Every translation key of one section, aligned with its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPlan {
    pub name: ResolvedField,
    pub settings: Vec<SettingKeys>,
    /// `None` for `@app` and `@theme` entries, which are not localized.
    pub blocks: Vec<Option<BlockPlan>>,
    pub presets: Vec<ResolvedField>,
}

impl SectionPlan {
    /// All fields in traversal order.
    pub fn fields(&self) -> Vec<&ResolvedField> {
        let mut fields = vec![&self.name];
        fields.extend(self.settings.iter().flat_map(SettingKeys::fields));
        for block in self.blocks.iter().flatten() {
            fields.push(&block.name);
            fields.extend(block.settings.iter().flat_map(SettingKeys::fields));
        }
        fields.extend(&self.presets);
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    pub name: ResolvedField,
    pub settings: Vec<SettingKeys>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSchemaPlan {
    /// `None` for the theme-info group.
    Groups(Vec<Option<GroupPlan>>),
    Flat(Vec<SettingKeys>),
}

impl SettingsSchemaPlan {
    pub fn fields(&self) -> Vec<&ResolvedField> {
        match self {
            SettingsSchemaPlan::Groups(groups) => groups
                .iter()
                .flatten()
                .flat_map(|group| {
                    std::iter::once(&group.name)
                        .chain(group.settings.iter().flat_map(SettingKeys::fields))
                })
                .collect(),
            SettingsSchemaPlan::Flat(settings) => {
                settings.iter().flat_map(SettingKeys::fields).collect()
            }
        }
    }
}

/// Resolves translation keys against one frequency index.
#[derive(Debug, Clone, Copy)]
pub struct KeyResolver<'a> {
    kind: ScopeKind,
    index: &'a FrequencyIndex,
}

impl<'a> KeyResolver<'a> {
    pub fn new(kind: ScopeKind, index: &'a FrequencyIndex) -> Self {
        Self { kind, index }
    }

    /// Resolve one field occurrence.
    ///
    /// Returns the shared key with the first-seen value when the index holds
    /// more than one occurrence of the normalized value, `local` with the
    /// field's own value otherwise. Gated fields over the word limit never
    /// look at the index.
    pub fn resolve(&self, field: FieldKind, value: &str, local: TranslationKey) -> ResolvedField {
        if !field.is_gated() || is_shareable_text(value) {
            let key = normalize_key(value);
            if let Some(canonical) = self.index.shared_value(&key) {
                return ResolvedField {
                    value: canonical.to_string(),
                    key: TranslationKey::Shared {
                        root: self.kind.root(),
                        key,
                    },
                };
            }
        }
        ResolvedField::local(local, value)
    }

    /// Plan the keys of one section (or app-extension block).
    pub fn plan_section(&self, key: &str, section: &Section) -> Result<SectionPlan, SchemaError> {
        check_root_segment(self.kind.root(), key)?;
        let scope = Scope::new(self.kind, key);

        let name = ResolvedField::local(scope.key(&["name"]), &section.name);
        let settings = self.plan_settings(&scope, &section.settings)?;

        let mut block_types = HashSet::new();
        let mut blocks = Vec::with_capacity(section.blocks.len());
        for block in &section.blocks {
            if block.is_opaque() {
                blocks.push(None);
                continue;
            }
            check_segment(&scope.to_string(), &block.kind)?;
            if !block_types.insert(block.kind.as_str()) {
                return Err(SchemaError::DuplicateBlockType {
                    scope: scope.to_string(),
                    block_type: block.kind.clone(),
                });
            }
            let block_scope = scope.block(&block.kind);
            let block_name = block.name.as_deref().ok_or_else(|| SchemaError::MissingBlockName {
                scope: scope.to_string(),
                block_type: block.kind.clone(),
            })?;
            blocks.push(Some(BlockPlan {
                name: ResolvedField::local(block_scope.key(&["name"]), block_name),
                settings: self.plan_settings(&block_scope, &block.settings)?,
            }));
        }

        let mut preset_keys = HashSet::new();
        let mut presets = Vec::with_capacity(section.presets.len());
        for preset in &section.presets {
            let preset_key = normalize_key(&preset.name);
            check_segment(&format!("{}.presets", scope), &preset_key)?;
            if !preset_keys.insert(preset_key.clone()) {
                return Err(SchemaError::DuplicatePreset {
                    scope: scope.to_string(),
                    name: preset.name.clone(),
                });
            }
            presets.push(ResolvedField::local(
                scope.key(&["presets", preset_key.as_str(), "name"]),
                &preset.name,
            ));
        }

        Ok(SectionPlan {
            name,
            settings,
            blocks,
            presets,
        })
    }

    /// Plan the keys of the global settings schema.
    pub fn plan_settings_schema(
        &self,
        schema: &SettingsSchema,
    ) -> Result<SettingsSchemaPlan, SchemaError> {
        match schema {
            SettingsSchema::Groups(groups) => {
                let mut group_keys = HashSet::new();
                let mut plans = Vec::with_capacity(groups.len());
                for group in groups {
                    if group.is_theme_info() {
                        plans.push(None);
                        continue;
                    }
                    let group_key = normalize_key(&group.name);
                    check_root_segment(self.kind.root(), &group_key)?;
                    if !group_keys.insert(group_key.clone()) {
                        return Err(SchemaError::DuplicateGroup {
                            name: group.name.clone(),
                        });
                    }
                    let scope = Scope::new(self.kind, &group_key);
                    plans.push(Some(GroupPlan {
                        name: ResolvedField::local(scope.key(&["name"]), &group.name),
                        settings: self.plan_settings(&scope, &group.settings)?,
                    }));
                }
                Ok(SettingsSchemaPlan::Groups(plans))
            }
            SettingsSchema::Flat(settings) => Ok(SettingsSchemaPlan::Flat(
                self.plan_settings(&Scope::root(self.kind), settings)?,
            )),
        }
    }

    /// Plan a settings list with a fresh positional counter.
    pub fn plan_settings(
        &self,
        scope: &Scope,
        settings: &[Setting],
    ) -> Result<Vec<SettingKeys>, SchemaError> {
        let mut counter = ScopeCounter::default();
        let mut owners = HashSet::new();
        settings
            .iter()
            .enumerate()
            .map(|(position, setting)| {
                let owner = setting_owner(scope, position + 1, setting, &mut counter)?;
                if !owners.insert(owner.clone()) {
                    return Err(SchemaError::DuplicateSettingId {
                        scope: scope.settings_path(),
                        id: owner,
                    });
                }
                Ok(self.plan_setting(scope, &owner, setting))
            })
            .collect()
    }

    fn plan_setting(&self, scope: &Scope, owner: &str, setting: &Setting) -> SettingKeys {
        let mut keys = SettingKeys::default();

        if setting.kind.is_text_block() {
            keys.content = setting.content.as_deref().map(|content| {
                self.resolve(
                    FieldKind::Content,
                    content,
                    scope.setting_key(owner, &["content"]),
                )
            });
        }
        if setting.kind.has_options() {
            keys.options = setting
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let option_key = format!("options__{}", i + 1);
                    self.resolve(
                        FieldKind::OptionLabel,
                        &option.label,
                        scope.setting_key(owner, &[option_key.as_str(), "label"]),
                    )
                })
                .collect();
        }
        keys.label = setting.label.as_deref().map(|label| {
            self.resolve(
                FieldKind::Label,
                label,
                scope.setting_key(owner, &["label"]),
            )
        });
        keys.info = setting.info.as_deref().map(|info| {
            self.resolve(FieldKind::Info, info, scope.setting_key(owner, &["info"]))
        });
        keys.placeholder = setting.placeholder_text().map(|placeholder| {
            self.resolve(
                FieldKind::Placeholder,
                placeholder,
                scope.setting_key(owner, &["placeholder"]),
            )
        });

        keys
    }
}

/// Key segment that owns a setting's local keys: the positional key for
/// header/paragraph settings, the `id` for everything else.
fn setting_owner(
    scope: &Scope,
    position: usize,
    setting: &Setting,
    counter: &mut ScopeCounter,
) -> Result<String, SchemaError> {
    if let Some(positional) = counter.next_positional(&setting.kind) {
        return Ok(positional);
    }
    let id = setting
        .id
        .as_deref()
        .ok_or_else(|| SchemaError::MissingSettingId {
            scope: scope.settings_path(),
            position,
            kind: setting.kind.to_string(),
        })?;
    check_segment(&scope.settings_path(), id)?;
    Ok(id.to_string())
}

/// Any path segment: non-empty and free of `.`.
fn check_segment(scope: &str, segment: &str) -> Result<(), SchemaError> {
    let reason = if segment.is_empty() {
        "must not be empty"
    } else if segment.contains('.') {
        "must not contain `.`"
    } else {
        return Ok(());
    };
    Err(invalid_segment(scope, segment, reason))
}

/// A segment directly under a root, where `all` would collide with the
/// shared namespace.
fn check_root_segment(root: &str, segment: &str) -> Result<(), SchemaError> {
    check_segment(root, segment)?;
    if segment == SHARED_NAMESPACE {
        return Err(invalid_segment(
            root,
            segment,
            "`all` is reserved for shared translations",
        ));
    }
    Ok(())
}

fn invalid_segment(scope: &str, segment: &str, reason: &'static str) -> SchemaError {
    SchemaError::InvalidKeySegment {
        scope: scope.to_string(),
        segment: segment.to_string(),
        reason,
    }
}
