use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;
use glob::Pattern;
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::{
    core::{FrequencyIndex, KeyResolver, SchemaError, ScopeKind},
    schema::{Definitions, Section, SettingsSchema},
};

pub const SECTIONS_DIR: &str = "sections";
pub const BLOCKS_DIR: &str = "blocks";
pub const SETTINGS_SCHEMA_FILE: &str = "settings_schema.json";

/// Every definition of one source tree.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Project {
    pub sections: Definitions,
    pub app_blocks: Definitions,
    pub settings_schema: Option<SettingsSchema>,
}

impl Project {
    /// Structural checks over every definition, before any key is allocated.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let index = FrequencyIndex::default();

        let resolver = KeyResolver::new(ScopeKind::Sections, &index);
        for (key, section) in &self.sections {
            resolver.plan_section(key, section)?;
        }

        let resolver = KeyResolver::new(ScopeKind::Blocks, &index);
        for (key, block) in &self.app_blocks {
            resolver.plan_section(key, block)?;
        }

        if let Some(schema) = &self.settings_schema {
            KeyResolver::new(ScopeKind::SettingsSchema, &index).plan_settings_schema(schema)?;
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.app_blocks.is_empty() && self.settings_schema.is_none()
    }

    pub fn definition_count(&self) -> usize {
        self.sections.len() + self.app_blocks.len() + usize::from(self.settings_schema.is_some())
    }
}

/// Load all definitions under `source_root`.
///
/// `ignores` are glob patterns matched against paths relative to the source
/// root (e.g. `sections/draft_*.json`).
pub fn load_project(source_root: &Path, ignores: &[String], verbose: bool) -> Result<Project> {
    if !source_root.is_dir() {
        anyhow::bail!("Source root does not exist: {}", source_root.display());
    }

    let patterns = compile_ignores(ignores, verbose);
    let is_ignored = |path: &Path| {
        let relative = path.strip_prefix(source_root).unwrap_or(path);
        patterns.iter().any(|p| p.matches_path(relative))
    };

    let sections = load_definitions(&source_root.join(SECTIONS_DIR), &is_ignored)?;
    let app_blocks = load_definitions(&source_root.join(BLOCKS_DIR), &is_ignored)?;

    let settings_path = source_root.join(SETTINGS_SCHEMA_FILE);
    let settings_schema = if settings_path.is_file() && !is_ignored(&settings_path) {
        Some(read_json::<SettingsSchema>(&settings_path)?)
    } else {
        None
    };

    Ok(Project {
        sections,
        app_blocks,
        settings_schema,
    })
}

fn compile_ignores(ignores: &[String], verbose: bool) -> Vec<Pattern> {
    ignores
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
                None
            }
        })
        .collect()
}

/// `*.json` files directly inside `dir`, sorted by name.
fn definition_files(dir: &Path, is_ignored: &impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("Cannot access path under: {}", dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || is_ignored(path) {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn load_definitions(dir: &Path, is_ignored: &impl Fn(&Path) -> bool) -> Result<Definitions> {
    let files = definition_files(dir, is_ignored)?;

    // Parse in parallel, report the first failure in path order
    let parsed: Vec<Result<(String, Section)>> = files
        .par_iter()
        .map(|path| {
            let key = definition_key(path)?;
            Ok((key, read_json::<Section>(path)?))
        })
        .collect();

    parsed.into_iter().collect()
}

fn definition_key(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(String::from)
        .with_context(|| format!("Invalid definition file name: {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse definition: {}", path.display()))
}
