//! Sweep execution - effectful operations
//!
//! Walks the configured repositories one at a time, gathers a snapshot per
//! open PR, plans with the pure evaluator and performs the merges through
//! the platform API. Failures are isolated to the repository or PR they
//! happened in and recorded in the [`SweepReport`].

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::sweep::evaluate::BotAllowList;
use crate::sweep::plan::{RepoPlan, SweepStep, plan_repository};
use crate::sweep::progress::SweepProgress;
use crate::types::{PullRequestSnapshot, RepoId};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Delay inserted between repositories by default
pub const DEFAULT_REPO_DELAY: Duration = Duration::from_secs(1);

/// Options controlling a sweep
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Username used to resolve bare repository names
    pub username: Option<String>,
    /// Pause between repositories (rate limit courtesy)
    pub repo_delay: Duration,
    /// Evaluate only; never call merge
    pub dry_run: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            username: None,
            repo_delay: DEFAULT_REPO_DELAY,
            dry_run: false,
        }
    }
}

/// Final state of a merge attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// PR was merged
    Merged,
    /// Merge call failed or was refused
    Failed,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merged => write!(f, "merged"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Result of one merge attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Repository full name
    pub repo: String,
    /// PR number
    pub pr_number: u64,
    /// PR title
    pub pr_title: String,
    /// Merged or failed
    pub status: OutcomeStatus,
    /// Human-readable message
    pub message: String,
}

/// A PR decision that did not lead to a merge attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrDecision {
    /// Repository full name
    pub repo: String,
    /// PR number
    pub pr_number: u64,
    /// Evaluation reason
    pub reason: String,
}

/// An error isolated to one repository or PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepFailure {
    /// `owner/repo` or `owner/repo#N`
    pub target: String,
    /// Error text
    pub message: String,
}

/// Aggregated result of a sweep
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Merge attempts in the order they happened
    pub outcomes: Vec<MergeOutcome>,
    /// PRs evaluated as ineligible (or declined at confirmation)
    pub skipped: Vec<PrDecision>,
    /// PRs that would be merged (dry run only)
    pub would_merge: Vec<PrDecision>,
    /// Archived repositories that were not swept
    pub archived: Vec<String>,
    /// Repository and PR level errors
    pub errors: Vec<SweepFailure>,
}

impl SweepReport {
    /// Number of PRs merged
    #[must_use]
    pub fn merged_count(&self) -> usize {
        self.count(OutcomeStatus::Merged)
    }

    /// Number of failed merge attempts
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(OutcomeStatus::Failed)
    }

    /// Failed merge attempts
    pub fn failures(&self) -> impl Iterator<Item = &MergeOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Failed)
    }

    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    fn record_error(&mut self, target: String, error: &Error) {
        self.errors.push(SweepFailure {
            target,
            message: error.to_string(),
        });
    }
}

/// Sweep every configured repository (EFFECTFUL)
///
/// Repositories are processed sequentially in the given order. Errors never
/// abort the sweep; they are reported through `progress` and collected in
/// the returned report.
pub async fn sweep_repositories(
    platform: &dyn PlatformService,
    repositories: &[String],
    bots: &BotAllowList,
    options: &SweepOptions,
    progress: &dyn SweepProgress,
) -> SweepReport {
    let mut report = SweepReport::default();
    progress.on_start(repositories.len()).await;

    for (idx, entry) in repositories.iter().enumerate() {
        match RepoId::resolve(entry, options.username.as_deref()) {
            Ok(repo) => {
                let swept =
                    sweep_repository(platform, &repo, bots, options, progress, &mut report).await;
                if let Err(e) = swept {
                    warn!(%repo, error = %e, "error accessing repository");
                    progress.on_error(&repo.full_name(), &e).await;
                    report.record_error(repo.full_name(), &e);
                }
            }
            Err(e) => {
                warn!(entry = %entry, error = %e, "cannot resolve repository");
                progress.on_error(entry, &e).await;
                report.record_error(entry.clone(), &e);
            }
        }

        if idx + 1 < repositories.len() && !options.repo_delay.is_zero() {
            tokio::time::sleep(options.repo_delay).await;
        }
    }

    info!(
        merged = report.merged_count(),
        failed = report.failed_count(),
        skipped = report.skipped.len(),
        errors = report.errors.len(),
        "sweep complete"
    );
    report
}

/// Sweep one repository: gather, plan, execute
async fn sweep_repository(
    platform: &dyn PlatformService,
    repo: &RepoId,
    bots: &BotAllowList,
    options: &SweepOptions,
    progress: &dyn SweepProgress,
    report: &mut SweepReport,
) -> Result<()> {
    let info = platform.get_repository(repo).await?;
    if info.archived {
        debug!(%repo, "skipping archived repository");
        progress.on_archived(&info.full_name).await;
        report.archived.push(info.full_name);
        return Ok(());
    }

    progress.on_repo_start(&info.full_name).await;

    // Phase 1: GATHER
    // Non-bot PRs are decided from the listing; no further API calls.
    let prs = platform.list_open_prs(repo).await?;
    let mut snapshots = HashMap::new();
    for pr in prs.iter().filter(|pr| bots.contains(&pr.author)) {
        match gather_snapshot(platform, repo, pr.number).await {
            Ok(snapshot) => {
                snapshots.insert(pr.number, snapshot);
            }
            Err(e) => {
                let target = format!("{}#{}", info.full_name, pr.number);
                warn!(target = %target, error = %e, "failed to gather PR state");
                progress.on_error(&target, &e).await;
                report.record_error(target, &e);
            }
        }
    }

    // Phase 2: PLAN
    let plan = plan_repository(repo, &info.full_name, &prs, &snapshots, bots);
    debug!(%repo, steps = plan.steps.len(), merges = plan.merge_count(), "planned repository");

    // Phase 3: EXECUTE
    execute_plan(&plan, platform, options, progress, report).await;
    Ok(())
}

/// Fetch details, combined status and check runs for one PR
async fn gather_snapshot(
    platform: &dyn PlatformService,
    repo: &RepoId,
    pr_number: u64,
) -> Result<PullRequestSnapshot> {
    let details = platform.get_pr_details(repo, pr_number).await?;
    let combined_status = platform.get_combined_status(repo, &details.head_sha).await?;
    let check_runs = platform.list_check_runs(repo, &details.head_sha).await?;

    Ok(PullRequestSnapshot {
        details,
        combined_status,
        check_runs,
    })
}

/// Execute a repository plan (EFFECTFUL)
///
/// Each merge is attempted once; a failure is recorded and the remaining
/// steps still run.
pub async fn execute_plan(
    plan: &RepoPlan,
    platform: &dyn PlatformService,
    options: &SweepOptions,
    progress: &dyn SweepProgress,
    report: &mut SweepReport,
) {
    let approved = options.dry_run || plan.is_empty() || progress.confirm_plan(plan).await;

    for step in &plan.steps {
        match step {
            SweepStep::Skip {
                pr_number, reason, ..
            } => {
                debug!(repo = %plan.full_name, pr_number, reason = %reason, "skipped PR");
                progress.on_skip(&plan.full_name, *pr_number, reason).await;
                report.skipped.push(PrDecision {
                    repo: plan.full_name.clone(),
                    pr_number: *pr_number,
                    reason: reason.clone(),
                });
            }
            SweepStep::Merge {
                pr_number,
                pr_title,
                reason,
                ..
            } if options.dry_run => {
                progress
                    .on_would_merge(&plan.full_name, *pr_number, pr_title)
                    .await;
                report.would_merge.push(PrDecision {
                    repo: plan.full_name.clone(),
                    pr_number: *pr_number,
                    reason: reason.clone(),
                });
            }
            SweepStep::Merge { pr_number, .. } if !approved => {
                let reason = "Merge declined at confirmation.".to_string();
                progress.on_skip(&plan.full_name, *pr_number, &reason).await;
                report.skipped.push(PrDecision {
                    repo: plan.full_name.clone(),
                    pr_number: *pr_number,
                    reason,
                });
            }
            SweepStep::Merge {
                pr_number,
                pr_title,
                request,
                ..
            } => {
                let (status, message) =
                    match platform.merge_pr(&plan.repo, *pr_number, request).await {
                        Ok(result) if result.merged => (
                            OutcomeStatus::Merged,
                            format!("Successfully merged PR #{pr_number}: {pr_title}."),
                        ),
                        Ok(result) => (
                            OutcomeStatus::Failed,
                            format!(
                                "Failed to merge: {}.",
                                result
                                    .message
                                    .as_deref()
                                    .unwrap_or("merge was not performed")
                                    .trim_end_matches('.')
                            ),
                        ),
                        Err(e) => (
                            OutcomeStatus::Failed,
                            format!("Failed to merge: {e}."),
                        ),
                    };

                match status {
                    OutcomeStatus::Merged => {
                        info!(repo = %plan.full_name, pr_number, "merged PR");
                    }
                    OutcomeStatus::Failed => {
                        warn!(repo = %plan.full_name, pr_number, message = %message, "merge failed");
                    }
                }

                let outcome = MergeOutcome {
                    repo: plan.full_name.clone(),
                    pr_number: *pr_number,
                    pr_title: pr_title.clone(),
                    status,
                    message,
                };
                progress.on_merge_outcome(&outcome).await;
                report.outcomes.push(outcome);
            }
        }
    }
}
