use anyhow::Result;

use super::context::ProjectContext;
use crate::cli::{
    args::GenerateCommand,
    exit_status::ExitStatus,
    report::{PassMode, print_pass},
};
use crate::generate::run_pass;

pub fn generate(cmd: GenerateCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common, true)?;
    let summary = run_pass(&ctx.options)?;
    print_pass(&summary, PassMode::Write, &ctx.root_dir, cmd.common.verbose);
    Ok(ExitStatus::Success)
}
