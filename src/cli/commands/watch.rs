use std::{
    sync::mpsc::{self, Receiver},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use super::context::ProjectContext;
use crate::cli::{
    args::WatchCommand,
    exit_status::ExitStatus,
    report::{FAILURE_MARK, PassMode, print_pass},
};
use crate::generate::run_pass;

type WatchEvent = std::result::Result<Event, notify::Error>;

/// Initial pass, then one full pass per batch of definition changes.
///
/// A failing pass is reported and the watcher keeps going. Runs until the
/// process is interrupted.
pub fn watch(cmd: WatchCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common, true)?;
    let debounce = Duration::from_millis(cmd.debounce_ms.unwrap_or(ctx.config.debounce_ms));
    let verbose = cmd.common.verbose;

    regenerate(&ctx, verbose);

    let (tx, rx) = mpsc::channel::<WatchEvent>();
    let mut watcher = RecommendedWatcher::new(
        move |res: WatchEvent| {
            let _ = tx.send(res);
        },
        notify::Config::default(),
    )
    .context("Failed to start file watcher")?;
    watcher
        .watch(&ctx.options.source_root, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", ctx.options.source_root.display()))?;

    println!(
        "Watching {} for changes (press {} to stop)",
        ctx.options.source_root.display(),
        "Ctrl+C".cyan()
    );

    while let Some(batch) = next_batch(&rx, debounce) {
        let relevant = batch.iter().filter(|res| is_relevant(res)).count();
        if relevant == 0 {
            continue;
        }
        if verbose {
            eprintln!("Note: {} change event(s), regenerating", relevant);
        }
        regenerate(&ctx, verbose);
    }

    Ok(ExitStatus::Success)
}

fn regenerate(ctx: &ProjectContext, verbose: bool) {
    match run_pass(&ctx.options) {
        Ok(summary) => print_pass(&summary, PassMode::Write, &ctx.root_dir, verbose),
        Err(err) => eprintln!("{} {:#}", FAILURE_MARK.red(), err),
    }
}

/// Block for the first event, wait out the debounce window, then drain
/// everything that arrived meanwhile. `None` once the watcher is gone.
fn next_batch(rx: &Receiver<WatchEvent>, debounce: Duration) -> Option<Vec<WatchEvent>> {
    let first = rx.recv().ok()?;
    thread::sleep(debounce);
    let mut batch = vec![first];
    batch.extend(rx.try_iter());
    Some(batch)
}

fn is_relevant(res: &WatchEvent) -> bool {
    match res {
        Ok(event) => !event.kind.is_access(),
        Err(err) => {
            eprintln!("{} {}", "warning:".bold().yellow(), err);
            false
        }
    }
}
