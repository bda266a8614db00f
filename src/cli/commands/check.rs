use anyhow::Result;

use super::context::ProjectContext;
use crate::cli::{
    args::CheckCommand,
    exit_status::ExitStatus,
    report::{PassMode, print_pass},
};
use crate::generate::run_pass;

/// Dry-run pass. Fails when any generated file differs from what
/// `generate` would write.
pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common, false)?;
    let summary = run_pass(&ctx.options)?;
    print_pass(&summary, PassMode::Check, &ctx.root_dir, cmd.common.verbose);

    if summary.is_up_to_date() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}
