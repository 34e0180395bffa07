//! Sweep command - evaluate and merge bot PRs across repositories

use crate::cli::CliProgress;
use crate::cli::context::SweepContext;
use crate::cli::style::{Stylize, rule};
use anstream::println;
use anyhow::Context;
use bot_sweep::sweep::{SweepOptions, SweepReport, sweep_repositories};
use std::path::PathBuf;
use std::time::Duration;

/// Options for the sweep command
#[derive(Debug, Clone)]
pub struct SweepCommand {
    /// Path to the repository config file
    pub config_path: PathBuf,
    /// GitHub Enterprise host
    pub host: Option<String>,
    /// Owner for bare repository names
    pub username: Option<String>,
    /// Pause between repositories
    pub delay: Duration,
    /// Evaluate without merging
    pub dry_run: bool,
    /// Prompt before merging each repository's eligible PRs
    pub confirm: bool,
}

/// Run the sweep command
pub async fn run_sweep(command: SweepCommand) -> anyhow::Result<()> {
    let ctx = SweepContext::new(&command.config_path, command.host.as_deref())
        .await
        .context("cannot start sweep")?;

    let options = SweepOptions {
        username: command.username,
        repo_delay: command.delay,
        dry_run: command.dry_run,
    };

    let progress = CliProgress::new(command.confirm);
    let report = sweep_repositories(
        ctx.platform.as_ref(),
        &ctx.repositories,
        &ctx.bots,
        &options,
        &progress,
    )
    .await;

    print_summary(&report, command.dry_run);
    Ok(())
}

/// Print the end-of-run summary
fn print_summary(report: &SweepReport, dry_run: bool) {
    println!();
    println!("{}", rule());
    println!("{}", "Summary:".emphasis());

    if dry_run {
        println!("Would merge: {}", report.would_merge.len().accent());
        println!("{}", "Dry run: no PRs were merged.".muted());
        return;
    }

    println!("Total merged: {}", report.merged_count().success());
    println!("Total failed: {}", report.failed_count().warn());

    if report.failed_count() > 0 {
        println!();
        println!("{}", "Failed merges:".warn());
        for failure in report.failures() {
            println!(
                "  - {} PR #{}: {}",
                failure.repo, failure.pr_number, failure.message
            );
        }
    }

    if !report.errors.is_empty() {
        println!();
        println!("{}", "Errors:".warn());
        for error in &report.errors {
            println!("  - {}: {}", error.target, error.message.muted());
        }
    }
}
