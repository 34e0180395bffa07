//! PR eligibility rules - pure functions over a snapshot
//!
//! No I/O happens here. The sweeper gathers a [`PullRequestSnapshot`] first
//! and hands it in, so every rule can be unit tested without a network.

use crate::types::{CheckRunStatus, CommitState, PullRequestSnapshot};
use std::collections::BTreeSet;

/// Bot logins auto-merged when the config does not name its own
pub const DEFAULT_BOTS: [&str; 4] = [
    "pre-commit-ci[bot]",
    "dependabot[bot]",
    "dependabot",
    "dependabot-preview[bot]",
];

/// Case-insensitive set of bot logins whose PRs may be merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotAllowList {
    logins: BTreeSet<String>,
}

impl BotAllowList {
    /// Build an allow-list; logins are normalised to lower case
    pub fn new<I, S>(logins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            logins: logins
                .into_iter()
                .map(|l| l.as_ref().trim().to_lowercase())
                .filter(|l| !l.is_empty())
                .collect(),
        }
    }

    /// Whether `login` (any case) is allow-listed
    pub fn contains(&self, login: &str) -> bool {
        self.logins.contains(&login.to_lowercase())
    }

    /// Allow-listed logins, sorted
    pub fn logins(&self) -> impl Iterator<Item = &str> {
        self.logins.iter().map(String::as_str)
    }
}

impl Default for BotAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_BOTS)
    }
}

/// Decision for a single PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Whether the PR should be merged
    pub should_merge: bool,
    /// Human-readable reason for the decision
    pub reason: String,
}

impl Evaluation {
    fn merge(reason: impl Into<String>) -> Self {
        Self {
            should_merge: true,
            reason: reason.into(),
        }
    }

    fn reject(reason: impl Into<String>) -> Self {
        Self {
            should_merge: false,
            reason: reason.into(),
        }
    }
}

/// Author rule on its own, usable before any PR details are fetched
///
/// Returns the rejection when `login` is not an allow-listed bot.
#[must_use]
pub fn screen_author(login: &str, bots: &BotAllowList) -> Option<Evaluation> {
    let author = login.to_lowercase();
    (!bots.contains(&author))
        .then(|| Evaluation::reject(format!("Author {author} is not a bot we auto-merge.")))
}

/// Decide whether a PR should be auto-merged (PURE - no I/O)
///
/// Rules are applied in order and the first failing one decides:
/// 1. author must be an allow-listed bot
/// 2. mergeable must be known and true
/// 3. no CI at all is accepted
/// 4. legacy combined status, when present, must be `success`
/// 5. every check run must be completed with success, neutral or skipped
#[must_use]
pub fn evaluate_pull_request(snapshot: &PullRequestSnapshot, bots: &BotAllowList) -> Evaluation {
    let details = &snapshot.details;

    if let Some(rejection) = screen_author(&details.author, bots) {
        return rejection;
    }

    match details.mergeable {
        Some(true) => {}
        Some(false) => return Evaluation::reject("PR has merge conflicts."),
        None => {
            return Evaluation::reject("PR mergeability is unknown (GitHub still computing).");
        }
    }

    let status = &snapshot.combined_status;
    if !status.has_statuses() && snapshot.check_runs.is_empty() {
        return Evaluation::merge("No CI checks configured, proceeding.");
    }

    if status.has_statuses() && status.state != CommitState::Success {
        return Evaluation::reject(format!("Status checks: {}.", status.state));
    }

    for run in &snapshot.check_runs {
        if run.status != CheckRunStatus::Completed {
            return Evaluation::reject(format!(
                "Check run '{}' not completed: {}.",
                run.name, run.status
            ));
        }

        match run.conclusion {
            Some(conclusion) if conclusion.is_passing() => {}
            Some(conclusion) => {
                return Evaluation::reject(format!(
                    "Check run '{}' failed: {conclusion}.",
                    run.name
                ));
            }
            None => {
                return Evaluation::reject(format!("Check run '{}' failed: none.", run.name));
            }
        }
    }

    Evaluation::merge("All checks passed.")
}
