use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{check::check, generate::generate, init::init, watch::watch},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Watch(cmd)) => watch(cmd),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
