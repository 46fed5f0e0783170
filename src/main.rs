use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use half_split::{Config, ProgressTracker, RunOutcome, SplitRunner};

fn main() -> Result<ExitCode> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let runner = SplitRunner::new().with_collect_options(config.collect_options());
    let quiet = config.quiet;
    let tracker = ProgressTracker::new(quiet);

    let outcome = runner
        .start(config.inputs, config.direction, tracker)?
        .join()
        .context("Split run failed")?;

    if !outcome.success {
        if let Some(message) = failure_message(&outcome, quiet) {
            eprintln!("{message}");
        }
        return Ok(ExitCode::FAILURE);
    }

    if let Some(output_dir) = &outcome.output_dir {
        println!(
            "Split {} of {} images into {}",
            outcome.succeeded,
            outcome.total,
            output_dir.display()
        );
    }
    if outcome.failed > 0 {
        eprintln!("Warning: {} images failed", outcome.failed);
    }

    Ok(ExitCode::SUCCESS)
}

/// Extra line for a failed run. The progress bar already leaves the last status
/// on screen, so this is only needed when the bar is hidden.
fn failure_message(outcome: &RunOutcome, quiet: bool) -> Option<&'static str> {
    if !quiet {
        return None;
    }
    if outcome.total == 0 {
        Some(half_split::engine::STATUS_NO_IMAGES)
    } else if outcome.cancelled {
        Some(half_split::engine::STATUS_CANCELLED)
    } else {
        None
    }
}
