//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Regenerate schemas and locale bundles
//! - `check`: Report outdated generated files without writing
//! - `watch`: Regenerate whenever a definition changes
//! - `init`: Initialize schemasync configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Generate(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Watch(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory (where the config file search starts)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Definition directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Theme output directory (overrides config file)
    #[arg(long)]
    pub theme_root: Option<PathBuf>,

    /// App-extension output directory (overrides config file)
    #[arg(long)]
    pub extension_root: Option<PathBuf>,

    /// Default locale of the generated bundles (overrides config file)
    #[arg(long)]
    pub locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct WatchCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Quiet period before a batch of changes triggers a pass (overrides config file)
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate Liquid schemas and default locale bundles from the definitions
    Generate(GenerateCommand),
    /// Fail if any generated file is out of date (writes nothing)
    Check(CheckCommand),
    /// Regenerate on every definition change
    Watch(WatchCommand),
    /// Initialize a new .schemasyncrc.json configuration file
    Init,
}
