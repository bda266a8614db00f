//! Schema localizer: replaces every localizable string of a definition with
//! its `t:` reference, ready to be embedded in a Liquid `{% schema %}` block.

use serde_json::Value;

use super::{
    error::SchemaError,
    resolve::{KeyResolver, SectionPlan, SettingKeys, SettingsSchemaPlan},
};
use crate::schema::{Section, Setting, SettingsSchema};

/// Localize one section (or app-extension block).
///
/// The result has the same shape as the input. `@app` and `@theme` entries
/// are copied unchanged; preset names get their own per-section keys.
pub fn localize_section(
    resolver: &KeyResolver<'_>,
    key: &str,
    section: &Section,
) -> Result<Section, SchemaError> {
    let plan = resolver.plan_section(key, section)?;
    Ok(apply_section_plan(section, &plan))
}

/// Localize the global settings schema. The theme-info group is dropped.
pub fn localize_settings_schema(
    resolver: &KeyResolver<'_>,
    schema: &SettingsSchema,
) -> Result<SettingsSchema, SchemaError> {
    let plan = resolver.plan_settings_schema(schema)?;
    Ok(apply_settings_schema_plan(schema, &plan))
}

pub fn apply_section_plan(section: &Section, plan: &SectionPlan) -> Section {
    let mut localized = section.clone();
    localized.name = plan.name.key.reference();
    localized.settings = localize_settings(&section.settings, &plan.settings);

    for (block, block_plan) in localized.blocks.iter_mut().zip(&plan.blocks) {
        let Some(block_plan) = block_plan else {
            continue;
        };
        block.name = Some(block_plan.name.key.reference());
        block.settings = localize_settings(&block.settings, &block_plan.settings);
    }

    for (preset, resolved) in localized.presets.iter_mut().zip(&plan.presets) {
        preset.name = resolved.key.reference();
    }

    localized
}

pub fn apply_settings_schema_plan(
    schema: &SettingsSchema,
    plan: &SettingsSchemaPlan,
) -> SettingsSchema {
    match (schema, plan) {
        (SettingsSchema::Groups(groups), SettingsSchemaPlan::Groups(plans)) => {
            let localized = groups
                .iter()
                .zip(plans)
                .filter_map(|(group, group_plan)| {
                    let group_plan = group_plan.as_ref()?;
                    let mut group = group.clone();
                    group.name = group_plan.name.key.reference();
                    group.settings = localize_settings(&group.settings, &group_plan.settings);
                    Some(group)
                })
                .collect();
            SettingsSchema::Groups(localized)
        }
        (SettingsSchema::Flat(settings), SettingsSchemaPlan::Flat(keys)) => {
            SettingsSchema::Flat(localize_settings(settings, keys))
        }
        // A plan is always built from the schema it is applied to
        (schema, _) => schema.clone(),
    }
}

fn localize_settings(settings: &[Setting], keys: &[SettingKeys]) -> Vec<Setting> {
    settings
        .iter()
        .zip(keys)
        .map(|(setting, keys)| localize_setting(setting, keys))
        .collect()
}

fn localize_setting(setting: &Setting, keys: &SettingKeys) -> Setting {
    let mut localized = setting.clone();
    if let Some(label) = &keys.label {
        localized.label = Some(label.key.reference());
    }
    if let Some(info) = &keys.info {
        localized.info = Some(info.key.reference());
    }
    if let Some(placeholder) = &keys.placeholder {
        localized.placeholder = Some(Value::String(placeholder.key.reference()));
    }
    if let Some(content) = &keys.content {
        localized.content = Some(content.key.reference());
    }
    for (option, resolved) in localized.options.iter_mut().zip(&keys.options) {
        option.label = resolved.key.reference();
    }
    localized
}
