//! CLI layer for the `bot-sweep` binary

pub mod context;
pub mod style;
pub mod sweep;

use crate::cli::style::{Stylize, rule};
use anstream::println;
use async_trait::async_trait;
use bot_sweep::error::Error;
use bot_sweep::sweep::{MergeOutcome, OutcomeStatus, RepoPlan, SweepProgress, SweepStep};
use dialoguer::Confirm;
use tracing::warn;

/// Progress printer for interactive runs
pub struct CliProgress {
    /// Prompt before merging each repository's eligible PRs
    confirm: bool,
}

impl CliProgress {
    /// Progress printer; `confirm` enables the per-repository prompt
    pub const fn new(confirm: bool) -> Self {
        Self { confirm }
    }
}

#[async_trait]
impl SweepProgress for CliProgress {
    async fn on_start(&self, count: usize) {
        println!("Checking {} repositories...", count.emphasis());
        println!("{}", rule());
    }

    async fn on_repo_start(&self, repo: &str) {
        println!();
        println!("Checking {}...", repo.accent());
    }

    async fn on_archived(&self, repo: &str) {
        println!();
        println!("{}", format!("Skipping archived repository: {repo}.").muted());
    }

    async fn on_skip(&self, repo: &str, pr_number: u64, reason: &str) {
        println!(
            "{} {repo} PR #{pr_number}: {}",
            "Skipped".muted(),
            reason.muted()
        );
    }

    async fn on_would_merge(&self, repo: &str, pr_number: u64, pr_title: &str) {
        println!(
            "{} {repo} PR #{pr_number}: {pr_title}.",
            "Would merge".success()
        );
    }

    async fn on_merge_outcome(&self, outcome: &MergeOutcome) {
        match outcome.status {
            OutcomeStatus::Merged => println!(
                "{} {} PR #{}: {}.",
                "Merged".success(),
                outcome.repo,
                outcome.pr_number,
                outcome.pr_title
            ),
            OutcomeStatus::Failed => println!(
                "{} {} PR #{}: {}",
                "Failed".warn(),
                outcome.repo,
                outcome.pr_number,
                outcome.message
            ),
        }
    }

    async fn on_error(&self, target: &str, error: &Error) {
        println!("{} {target}: {error}.", "Error accessing".warn());
    }

    async fn confirm_plan(&self, plan: &RepoPlan) -> bool {
        if !self.confirm {
            return true;
        }

        println!("{}:", "Merge plan".emphasis());
        for step in &plan.steps {
            if let SweepStep::Merge {
                pr_number,
                pr_title,
                ..
            } = step
            {
                println!("  {} PR #{pr_number}: {pr_title}", "✓ Would merge".success());
            }
        }

        match Confirm::new()
            .with_prompt(format!(
                "Merge {} PR(s) in {}?",
                plan.merge_count(),
                plan.full_name
            ))
            .default(true)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "failed to read confirmation, skipping merges");
                false
            }
        }
    }
}
