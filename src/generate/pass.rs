use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use super::{
    artifact::{Artifact, JsonFile, Render, SectionFile, SnippetStub, write_artifact},
    liquid::snippet_stub,
    loader::{Project, load_project},
};
use crate::{
    core::{
        FrequencyIndex, KeyResolver, LocaleBundleBuilder, LocaleTree, ScopeKind, build_bundle,
        localize_section, localize_settings_schema,
    },
    schema::{Definitions, SettingsSchema},
    writer::WriteOutcome,
};

/// Everything a pass needs to know, with paths already resolved.
#[derive(Debug, Clone)]
pub struct PassOptions {
    pub source_root: PathBuf,
    pub theme_root: PathBuf,
    pub extension_root: Option<PathBuf>,
    pub locale: String,
    pub ignores: Vec<String>,
    /// Write changes. Off for `check`.
    pub apply: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactChange {
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

#[derive(Debug, Default)]
pub struct PassSummary {
    pub definition_count: usize,
    pub changes: Vec<ArtifactChange>,
    /// App-extension blocks found while no extension root is configured.
    pub skipped_blocks: usize,
}

impl PassSummary {
    pub fn changed(&self) -> impl Iterator<Item = &ArtifactChange> {
        self.changes.iter().filter(|c| c.outcome.is_change())
    }

    pub fn changed_count(&self) -> usize {
        self.changed().count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.changes.len() - self.changed_count()
    }

    pub fn is_up_to_date(&self) -> bool {
        self.changed_count() == 0
    }
}

/// One full regeneration: load, validate, index, localize, bundle, write.
///
/// Always works from the complete definition set, so a pass triggered by a
/// single file change produces exactly what a fresh run would.
pub fn run_pass(options: &PassOptions) -> Result<PassSummary> {
    let project = load_project(&options.source_root, &options.ignores, options.verbose)?;
    project.validate()?;

    let artifacts = plan_artifacts(&project, options)?;
    let changes = artifacts
        .iter()
        .map(|artifact| {
            Ok(ArtifactChange {
                path: artifact.path().to_path_buf(),
                outcome: write_artifact(artifact, options.apply)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let skipped_blocks = if options.extension_root.is_none() {
        project.app_blocks.len()
    } else {
        0
    };

    Ok(PassSummary {
        definition_count: project.definition_count(),
        changes,
        skipped_blocks,
    })
}

/// Every output file of a project, in a stable order.
pub fn plan_artifacts(project: &Project, options: &PassOptions) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    let bundle_name = format!("{}.default.schema.json", options.locale);
    let theme_root = &options.theme_root;

    let index = FrequencyIndex::build(&project.sections);
    artifacts.extend(liquid_files(
        ScopeKind::Sections,
        &project.sections,
        &index,
        &theme_root.join("sections"),
    )?);

    for (key, section) in &project.sections {
        for block_type in section.block_file_types() {
            artifacts.push(Artifact::from(SnippetStub {
                path: theme_root
                    .join("snippets")
                    .join(format!("{}.{}.liquid", key, block_type)),
                content: snippet_stub(key, block_type),
            }));
        }
    }

    if let Some(schema) = &project.settings_schema {
        let settings_index = FrequencyIndex::from_settings_schema(schema);
        let resolver = KeyResolver::new(ScopeKind::SettingsSchema, &settings_index);
        let localized = localize_settings_schema(&resolver, schema)?;
        let document = settings_schema_document(schema, localized);
        artifacts.push(Artifact::from(JsonFile {
            path: theme_root.join("config").join("settings_schema.json"),
            json: to_json(&document)?,
        }));
    }

    if !project.sections.is_empty() || project.settings_schema.is_some() {
        let bundle = build_bundle(&project.sections, project.settings_schema.as_ref(), &index)?;
        artifacts.push(bundle_file(theme_root.join("locales").join(&bundle_name), &bundle)?);
    }

    if let Some(extension_root) = &options.extension_root {
        if !project.app_blocks.is_empty() {
            let index = FrequencyIndex::build(&project.app_blocks);
            artifacts.extend(liquid_files(
                ScopeKind::Blocks,
                &project.app_blocks,
                &index,
                &extension_root.join("blocks"),
            )?);
            let bundle = LocaleBundleBuilder::new()
                .sections(ScopeKind::Blocks, &project.app_blocks, &index)?
                .finish();
            artifacts.push(bundle_file(
                extension_root.join("locales").join(&bundle_name),
                &bundle,
            )?);
        }
    }

    Ok(artifacts)
}

fn liquid_files(
    kind: ScopeKind,
    definitions: &Definitions,
    index: &FrequencyIndex,
    dir: &std::path::Path,
) -> Result<Vec<Artifact>> {
    let resolver = KeyResolver::new(kind, index);
    definitions
        .par_iter()
        .map(|(key, section)| {
            let localized = localize_section(&resolver, key, section)?;
            Ok(Artifact::from(SectionFile {
                path: dir.join(format!("{}.liquid", key)),
                schema_json: to_json(&localized)?,
            }))
        })
        .collect()
}

fn bundle_file(path: PathBuf, bundle: &LocaleTree) -> Result<Artifact> {
    let json = bundle
        .to_json_pretty()
        .context("Failed to serialize locale bundle")?;
    Ok(Artifact::from(JsonFile { path, json }))
}

/// The settings schema as written to disk: the localized groups with the
/// theme-info group put back, verbatim, where it was.
pub fn settings_schema_document(
    original: &SettingsSchema,
    localized: SettingsSchema,
) -> SettingsSchema {
    match (original, localized) {
        (SettingsSchema::Groups(groups), SettingsSchema::Groups(localized)) => {
            let mut localized = localized.into_iter();
            let merged = groups
                .iter()
                .filter_map(|group| {
                    if group.is_theme_info() {
                        Some(group.clone())
                    } else {
                        localized.next()
                    }
                })
                .collect();
            SettingsSchema::Groups(merged)
        }
        (_, localized) => localized,
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON")
}
