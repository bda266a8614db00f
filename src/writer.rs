use std::{fs, io, path::Path};

use anyhow::{Context, Result};

/// What happened (or would happen, in dry-run) to an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Unchanged,
}

impl WriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteOutcome::Created => "created",
            WriteOutcome::Updated => "updated",
            WriteOutcome::Unchanged => "unchanged",
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, WriteOutcome::Unchanged)
    }
}

/// Current content of a file, `None` if it does not exist.
pub fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("Failed to read file: {}", path.display())),
    }
}

/// Write `content` to `path` unless `existing` already holds exactly that.
///
/// `existing` is what [`read_existing`] returned for `path`. With
/// `apply == false` nothing is written; the returned outcome says what a
/// real run would do.
pub fn write_over(
    path: &Path,
    existing: Option<&str>,
    content: &str,
    apply: bool,
) -> Result<WriteOutcome> {
    let outcome = match existing {
        None => WriteOutcome::Created,
        Some(existing) if existing == content => return Ok(WriteOutcome::Unchanged),
        Some(_) => WriteOutcome::Updated,
    };

    if apply {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
    }

    Ok(outcome)
}
