//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{MergePrCall, MockPlatformService, head_sha};

use async_trait::async_trait;
use bot_sweep::error::Error;
use bot_sweep::sweep::{MergeOutcome, RepoPlan, SweepOptions, SweepProgress};
use bot_sweep::types::{
    CheckConclusion, CheckRun, CheckRunStatus, CombinedStatus, CommitState, PullRequestDetails,
    PullRequestSnapshot,
};
use std::sync::Mutex;
use std::time::Duration;

/// Sweep options with no inter-repository delay
pub fn fast_options() -> SweepOptions {
    SweepOptions {
        username: Some("me".to_string()),
        repo_delay: Duration::ZERO,
        dry_run: false,
    }
}

/// A mergeable PR snapshot by `author` with no CI configured
pub fn make_snapshot(pr_number: u64, author: &str) -> PullRequestSnapshot {
    PullRequestSnapshot {
        details: PullRequestDetails {
            number: pr_number,
            title: format!("Bump thing #{pr_number}"),
            body: Some("Bumps thing from 1.0 to 1.1.".to_string()),
            author: author.to_string(),
            mergeable: Some(true),
            head_sha: format!("sha{pr_number}"),
        },
        combined_status: CombinedStatus::none(),
        check_runs: vec![],
    }
}

/// A check run fixture
pub fn check_run(
    name: &str,
    status: CheckRunStatus,
    conclusion: Option<CheckConclusion>,
) -> CheckRun {
    CheckRun {
        name: name.to_string(),
        status,
        conclusion,
    }
}

/// A completed check run with the given conclusion
pub fn completed(name: &str, conclusion: CheckConclusion) -> CheckRun {
    check_run(name, CheckRunStatus::Completed, Some(conclusion))
}

/// A combined status with `count` contexts in `state`
pub fn combined(state: CommitState, count: u64) -> CombinedStatus {
    CombinedStatus {
        state,
        total_count: count,
    }
}

/// Progress sink that records every event as a line of text
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
    /// Answer returned from `confirm_plan`
    pub approve: bool,
}

impl RecordingProgress {
    pub fn approving() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            approve: true,
        }
    }

    pub fn declining() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            approve: false,
        }
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl SweepProgress for RecordingProgress {
    async fn on_start(&self, count: usize) {
        self.push(format!("start {count}"));
    }

    async fn on_repo_start(&self, repo: &str) {
        self.push(format!("repo {repo}"));
    }

    async fn on_archived(&self, repo: &str) {
        self.push(format!("archived {repo}"));
    }

    async fn on_skip(&self, repo: &str, pr_number: u64, reason: &str) {
        self.push(format!("skip {repo}#{pr_number}: {reason}"));
    }

    async fn on_would_merge(&self, repo: &str, pr_number: u64, _pr_title: &str) {
        self.push(format!("would merge {repo}#{pr_number}"));
    }

    async fn on_merge_outcome(&self, outcome: &MergeOutcome) {
        self.push(format!(
            "{} {}#{}",
            outcome.status, outcome.repo, outcome.pr_number
        ));
    }

    async fn on_error(&self, target: &str, _error: &Error) {
        self.push(format!("error {target}"));
    }

    async fn confirm_plan(&self, plan: &RepoPlan) -> bool {
        self.push(format!("confirm {}", plan.full_name));
        self.approve
    }
}
