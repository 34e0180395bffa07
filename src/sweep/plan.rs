//! Sweep planning - pure functions for turning snapshots into steps
//!
//! No I/O happens here - all data is passed in, making it easy to unit test.

use crate::sweep::evaluate::{BotAllowList, evaluate_pull_request, screen_author};
use crate::types::{
    MergeRequest, PullRequestDetails, PullRequestSnapshot, PullRequestSummary, RepoId,
};
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Preamble placed before the original PR body in the squash commit message
pub const MERGE_MESSAGE_PREAMBLE: &str = "Auto-merged by auto-merge workflow.";

/// A single step in a repository plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepStep {
    /// Merge this PR
    Merge {
        /// PR number
        pr_number: u64,
        /// PR title (for display)
        pr_title: String,
        /// Merge call parameters
        request: MergeRequest,
        /// Why the PR is eligible
        reason: String,
    },
    /// Leave this PR alone
    Skip {
        /// PR number
        pr_number: u64,
        /// PR title (for display)
        pr_title: String,
        /// Why the PR is not eligible
        reason: String,
    },
}

impl SweepStep {
    /// PR number this step refers to
    pub const fn pr_number(&self) -> u64 {
        match self {
            Self::Merge { pr_number, .. } | Self::Skip { pr_number, .. } => *pr_number,
        }
    }
}

impl std::fmt::Display for SweepStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge {
                pr_number,
                pr_title,
                ..
            } => write!(f, "merge PR #{pr_number}: {pr_title}"),
            Self::Skip {
                pr_number, reason, ..
            } => write!(f, "skip PR #{pr_number}: {reason}"),
        }
    }
}

/// Plan for one repository
#[derive(Debug, Clone)]
pub struct RepoPlan {
    /// Repository the steps apply to
    pub repo: RepoId,
    /// Display name reported by the platform
    pub full_name: String,
    /// Steps in PR listing order
    pub steps: Vec<SweepStep>,
}

impl RepoPlan {
    /// Check if the plan has any merge steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.steps.iter().any(|s| matches!(s, SweepStep::Merge { .. }))
    }

    /// Count mergeable PRs
    #[must_use]
    pub fn merge_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, SweepStep::Merge { .. }))
            .count()
    }
}

/// Squash-merge parameters for an eligible PR
///
/// Title is the PR title; the message is the preamble followed by the
/// original PR body.
#[must_use]
pub fn merge_request_for(details: &PullRequestDetails) -> MergeRequest {
    MergeRequest {
        commit_title: details.title.clone(),
        commit_message: format!(
            "{MERGE_MESSAGE_PREAMBLE}\n\n{}",
            details.body.as_deref().unwrap_or_default()
        ),
    }
}

/// Create a repository plan (PURE - no I/O, easily testable)
///
/// Steps follow the listing order of `prs`. A PR with a gathered snapshot is
/// fully evaluated; a PR without one is skipped on its author alone when
/// the author is not allow-listed, and left out otherwise (its gather
/// failure is reported by the caller).
#[must_use]
pub fn plan_repository<S: BuildHasher>(
    repo: &RepoId,
    full_name: &str,
    prs: &[PullRequestSummary],
    snapshots: &HashMap<u64, PullRequestSnapshot, S>,
    bots: &BotAllowList,
) -> RepoPlan {
    let mut steps = Vec::new();

    for pr in prs {
        let Some(snapshot) = snapshots.get(&pr.number) else {
            if let Some(rejection) = screen_author(&pr.author, bots) {
                steps.push(SweepStep::Skip {
                    pr_number: pr.number,
                    pr_title: pr.title.clone(),
                    reason: rejection.reason,
                });
            }
            continue;
        };

        let details = &snapshot.details;
        let evaluation = evaluate_pull_request(snapshot, bots);
        if evaluation.should_merge {
            steps.push(SweepStep::Merge {
                pr_number: details.number,
                pr_title: details.title.clone(),
                request: merge_request_for(details),
                reason: evaluation.reason,
            });
        } else {
            steps.push(SweepStep::Skip {
                pr_number: details.number,
                pr_title: details.title.clone(),
                reason: evaluation.reason,
            });
        }
    }

    RepoPlan {
        repo: repo.clone(),
        full_name: full_name.to_string(),
        steps,
    }
}
