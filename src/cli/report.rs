//! Terminal output for passes.
//!
//! Kept apart from `generate` so the library never prints on its own.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::{
    generate::{ArtifactChange, PassSummary},
    writer::WriteOutcome,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Whether the pass wrote its changes or only looked for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    Write,
    Check,
}

pub fn print_pass(summary: &PassSummary, mode: PassMode, root: &Path, verbose: bool) {
    print_pass_to(summary, mode, root, verbose, &mut io::stdout().lock());
    print_skipped_blocks_to(summary.skipped_blocks, &mut io::stderr().lock());
}

/// Print one line per changed file plus a summary line.
pub fn print_pass_to<W: Write>(
    summary: &PassSummary,
    mode: PassMode,
    root: &Path,
    verbose: bool,
    writer: &mut W,
) {
    for change in &summary.changes {
        print_change(change, mode, root, verbose, writer);
    }

    let changed = summary.changed_count();
    let total = summary.changes.len();
    let line = match mode {
        PassMode::Write if changed == 0 => format!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{} up to date ({})",
                pluralize(total, "file"),
                pluralize(summary.definition_count, "definition")
            )
            .green()
        ),
        PassMode::Write => format!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Wrote {}, {} unchanged ({})",
                pluralize(changed, "file"),
                summary.unchanged_count(),
                pluralize(summary.definition_count, "definition")
            )
            .green()
        ),
        PassMode::Check if changed == 0 => format!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{} up to date", pluralize(total, "file")).green()
        ),
        PassMode::Check => format!(
            "{} {} (run {} to update)",
            FAILURE_MARK.red(),
            format!("{} of {} out of date", changed, pluralize(total, "file")).red(),
            "schemasync generate".cyan()
        ),
    };
    let _ = writeln!(writer, "{}", line);
}

fn print_change<W: Write>(
    change: &ArtifactChange,
    mode: PassMode,
    root: &Path,
    verbose: bool,
    writer: &mut W,
) {
    let path = display_path(&change.path, root);
    let _ = match (change.outcome, mode) {
        (WriteOutcome::Unchanged, _) if verbose => writeln!(
            writer,
            "  {}",
            format!("unchanged {}", path.display()).dimmed()
        ),
        (WriteOutcome::Unchanged, _) => Ok(()),
        (outcome, PassMode::Write) => writeln!(
            writer,
            "{} {} {}",
            SUCCESS_MARK.green(),
            outcome.as_str(),
            path.display()
        ),
        (outcome, PassMode::Check) => writeln!(
            writer,
            "{} {} {}",
            FAILURE_MARK.red(),
            path.display(),
            format!("(would be {})", outcome.as_str()).dimmed()
        ),
    };
}

/// Warn about app-extension blocks that had nowhere to go.
pub fn print_skipped_blocks_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} skipped: no {} configured",
            "warning:".bold().yellow(),
            pluralize(count, "app block definition"),
            "extensionRoot".cyan()
        );
    }
}

/// `path` relative to `root` when it lives below it.
pub fn display_path<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
