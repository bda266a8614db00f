//! Output files of a pass.
//!
//! Every artifact knows where it lives and how to turn the file's current
//! content (if any) into the content it should have.

use std::path::{Path, PathBuf};

use anyhow::Result;
use enum_dispatch::enum_dispatch;

use super::liquid::{render_schema_block, upsert_schema};
use crate::writer::{WriteOutcome, read_existing, write_over};

#[enum_dispatch]
pub trait Render {
    fn path(&self) -> &Path;

    /// Desired content given the current content. `None` leaves the file
    /// untouched.
    fn render(&self, existing: Option<&str>) -> Option<String>;
}

/// A Liquid file whose `{% schema %}` block is owned by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFile {
    pub path: PathBuf,
    pub schema_json: String,
}

impl Render for SectionFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn render(&self, existing: Option<&str>) -> Option<String> {
        Some(upsert_schema(existing, &render_schema_block(&self.schema_json)))
    }
}

/// A JSON document owned entirely by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    pub path: PathBuf,
    pub json: String,
}

impl Render for JsonFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn render(&self, _existing: Option<&str>) -> Option<String> {
        Some(format!("{}\n", self.json))
    }
}

/// Scaffolding that is created once and then belongs to the theme author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetStub {
    pub path: PathBuf,
    pub content: String,
}

impl Render for SnippetStub {
    fn path(&self) -> &Path {
        &self.path
    }

    fn render(&self, existing: Option<&str>) -> Option<String> {
        match existing {
            Some(_) => None,
            None => Some(self.content.clone()),
        }
    }
}

#[enum_dispatch(Render)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    SectionFile(SectionFile),
    JsonFile(JsonFile),
    SnippetStub(SnippetStub),
}

/// Bring one artifact up to date (or, with `apply == false`, report what
/// would change).
pub fn write_artifact(artifact: &Artifact, apply: bool) -> Result<WriteOutcome> {
    let path = artifact.path();
    let existing = read_existing(path)?;
    match artifact.render(existing.as_deref()) {
        Some(content) => write_over(path, existing.as_deref(), &content, apply),
        None => Ok(WriteOutcome::Unchanged),
    }
}
