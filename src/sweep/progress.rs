//! Progress reporting for sweeps

use crate::error::Error;
use crate::sweep::execute::MergeOutcome;
use crate::sweep::plan::RepoPlan;
use async_trait::async_trait;

/// Receives sweep events as they happen
///
/// Every method has a no-op default so implementors only override what
/// they display.
#[async_trait]
pub trait SweepProgress: Send + Sync {
    /// Sweep is about to check `count` repositories
    async fn on_start(&self, _count: usize) {}

    /// Started checking a repository
    async fn on_repo_start(&self, _repo: &str) {}

    /// Repository is archived and will not be touched
    async fn on_archived(&self, _repo: &str) {}

    /// A PR was evaluated as not eligible
    async fn on_skip(&self, _repo: &str, _pr_number: u64, _reason: &str) {}

    /// Dry run: a PR would have been merged
    async fn on_would_merge(&self, _repo: &str, _pr_number: u64, _pr_title: &str) {}

    /// A merge attempt finished (merged or failed)
    async fn on_merge_outcome(&self, _outcome: &MergeOutcome) {}

    /// An API error was isolated to `target` (a repository or a PR)
    async fn on_error(&self, _target: &str, _error: &Error) {}

    /// Approve a repository plan before its merges run
    ///
    /// Returning `false` skips every merge in the plan.
    async fn confirm_plan(&self, _plan: &RepoPlan) -> bool {
        true
    }
}

/// Progress sink that ignores everything and approves every plan
pub struct NoopProgress;

#[async_trait]
impl SweepProgress for NoopProgress {}
