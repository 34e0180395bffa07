//! Core types for bot-sweep

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A repository coordinate (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoId {
    /// Create a repository id from its parts
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Resolve a configured repository entry.
    ///
    /// `"owner/repo"` is used as-is. A bare `"repo"` is combined with
    /// `username`; without a username the entry cannot be resolved.
    pub fn resolve(entry: &str, username: Option<&str>) -> Result<Self> {
        let entry = entry.trim();
        if let Some((owner, name)) = entry.split_once('/') {
            if owner.is_empty() || name.is_empty() || name.contains('/') {
                return Err(Error::InvalidRepository(entry.to_string()));
            }
            return Ok(Self::new(owner, name));
        }

        if entry.is_empty() {
            return Err(Error::InvalidRepository(entry.to_string()));
        }

        match username {
            Some(user) if !user.is_empty() => Ok(Self::new(user, entry)),
            _ => Err(Error::Config(format!(
                "repository '{entry}' has no owner and GITHUB_USERNAME is not set"
            ))),
        }
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository metadata needed before sweeping it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// `owner/name` as reported by GitHub
    pub full_name: String,
    /// Archived repositories are read-only and skipped
    pub archived: bool,
}

/// An open pull request as returned by the list endpoint
///
/// GitHub does not compute `mergeable` for list responses, so this only
/// carries what is needed to fetch the details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Login of the PR author
    pub author: String,
}

/// Full PR details for evaluation and merging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestDetails {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR body/description
    pub body: Option<String>,
    /// Login of the PR author
    pub author: String,
    /// Whether PR can be merged (no conflicts)
    /// - `Some(true)` = mergeable
    /// - `Some(false)` = has conflicts
    /// - `None` = unknown (GitHub still computing)
    pub mergeable: Option<bool>,
    /// SHA of the most recent commit on the head branch
    pub head_sha: String,
}

/// State of the legacy combined commit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitState {
    /// Every status context succeeded
    Success,
    /// At least one context is still pending (also reported when none exist)
    Pending,
    /// At least one context failed
    Failure,
    /// At least one context errored
    Error,
    /// A state this client does not know about
    #[serde(other)]
    Unknown,
}

impl fmt::Display for CommitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Pending => write!(f, "pending"),
            Self::Failure => write!(f, "failure"),
            Self::Error => write!(f, "error"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Combined legacy status for a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedStatus {
    /// Aggregated state
    pub state: CommitState,
    /// Number of status contexts reported for the commit
    pub total_count: u64,
}

impl CombinedStatus {
    /// A commit with no legacy statuses reported
    pub const fn none() -> Self {
        Self {
            state: CommitState::Pending,
            total_count: 0,
        }
    }

    /// Whether any status context exists
    pub const fn has_statuses(&self) -> bool {
        self.total_count > 0
    }
}

/// Lifecycle status of a check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunStatus {
    /// Waiting to start
    Queued,
    /// Running
    InProgress,
    /// Finished; `conclusion` is set
    Completed,
    /// Waiting on a deployment protection rule
    Waiting,
    /// Requested but not yet queued
    Requested,
    /// Pending
    Pending,
    /// A status this client does not know about
    #[serde(other)]
    Unknown,
}

impl fmt::Display for CheckRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => write!(f, "queued"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Waiting => write!(f, "waiting"),
            Self::Requested => write!(f, "requested"),
            Self::Pending => write!(f, "pending"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Conclusion of a completed check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    /// Passed
    Success,
    /// Failed
    Failure,
    /// Neither passed nor failed
    Neutral,
    /// Cancelled before finishing
    Cancelled,
    /// Skipped
    Skipped,
    /// Timed out
    TimedOut,
    /// Requires user action
    ActionRequired,
    /// Superseded by a newer run
    Stale,
    /// Workflow failed to start
    StartupFailure,
    /// A conclusion this client does not know about
    #[serde(other)]
    Unknown,
}

impl CheckConclusion {
    /// Conclusions that do not block a merge
    pub const fn is_passing(self) -> bool {
        matches!(self, Self::Success | Self::Neutral | Self::Skipped)
    }
}

impl fmt::Display for CheckConclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Neutral => "neutral",
            Self::Cancelled => "cancelled",
            Self::Skipped => "skipped",
            Self::TimedOut => "timed_out",
            Self::ActionRequired => "action_required",
            Self::Stale => "stale",
            Self::StartupFailure => "startup_failure",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A single check run from the checks API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    /// Check name (e.g. "build")
    pub name: String,
    /// Current status
    pub status: CheckRunStatus,
    /// Conclusion, only set once completed
    pub conclusion: Option<CheckConclusion>,
}

/// Everything the evaluator looks at for one pull request
///
/// Gathered up front by the sweeper; never mutated during evaluation.
#[derive(Debug, Clone)]
pub struct PullRequestSnapshot {
    /// PR details (author, mergeable, head SHA, title, body)
    pub details: PullRequestDetails,
    /// Legacy combined status of the head commit
    pub combined_status: CombinedStatus,
    /// Check runs reported for the head commit
    pub check_runs: Vec<CheckRun>,
}

/// Parameters of a squash merge call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Commit title
    pub commit_title: String,
    /// Commit message
    pub commit_message: String,
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}
