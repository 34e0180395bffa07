//! Platform services for GitHub
//!
//! The sweeper only talks to the hosting platform through
//! [`PlatformService`], so it can run against an in-memory implementation.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{
    CheckRun, CombinedStatus, MergeRequest, MergeResult, PullRequestDetails, PullRequestSummary,
    RepoId, RepositoryInfo,
};
use async_trait::async_trait;

/// Platform service trait for the operations a sweep needs
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Fetch repository metadata (name, archived flag)
    async fn get_repository(&self, repo: &RepoId) -> Result<RepositoryInfo>;

    /// List all open pull requests of a repository
    async fn list_open_prs(&self, repo: &RepoId) -> Result<Vec<PullRequestSummary>>;

    /// Get full PR details including body, head SHA and mergeable flag
    async fn get_pr_details(&self, repo: &RepoId, pr_number: u64) -> Result<PullRequestDetails>;

    /// Get the legacy combined status of a commit
    async fn get_combined_status(&self, repo: &RepoId, sha: &str) -> Result<CombinedStatus>;

    /// List every check run reported for a commit
    async fn list_check_runs(&self, repo: &RepoId, sha: &str) -> Result<Vec<CheckRun>>;

    /// Merge a PR
    async fn merge_pr(
        &self,
        repo: &RepoId,
        pr_number: u64,
        request: &MergeRequest,
    ) -> Result<MergeResult>;
}
