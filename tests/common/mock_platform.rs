//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use bot_sweep::error::{Error, Result};
use bot_sweep::platform::PlatformService;
use bot_sweep::types::{
    CheckRun, CombinedStatus, MergeRequest, MergeResult, PullRequestDetails, PullRequestSummary,
    RepoId, RepositoryInfo,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub repo: String,
    pub pr_number: u64,
    pub request: MergeRequest,
}

type PrKey = (String, u64);

/// Simple in-memory platform service
///
/// Features:
/// - Repositories and PRs registered per `owner/name`
/// - Call tracking for verification
/// - Error injection per repository or PR
/// - Merges succeed unless a response or error is configured
#[derive(Default)]
pub struct MockPlatformService {
    repositories: Mutex<HashMap<String, RepositoryInfo>>,
    open_prs: Mutex<HashMap<String, Vec<PullRequestSummary>>>,
    pr_details: Mutex<HashMap<PrKey, PullRequestDetails>>,
    statuses: Mutex<HashMap<String, CombinedStatus>>,
    check_runs: Mutex<HashMap<String, Vec<CheckRun>>>,
    merge_responses: Mutex<HashMap<PrKey, MergeResult>>,
    // Call tracking
    get_repository_calls: Mutex<Vec<String>>,
    list_prs_calls: Mutex<Vec<String>>,
    get_pr_details_calls: Mutex<Vec<PrKey>>,
    status_calls: Mutex<Vec<String>>,
    check_run_calls: Mutex<Vec<String>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_get_repository: Mutex<HashMap<String, String>>,
    error_on_list_prs: Mutex<HashMap<String, String>>,
    error_on_pr_details: Mutex<HashMap<PrKey, String>>,
    error_on_check_runs: Mutex<HashMap<String, String>>,
    error_on_merge_pr: Mutex<HashMap<PrKey, String>>,
}

/// Head SHA the mock assigns to a PR
pub fn head_sha(repo: &str, pr_number: u64) -> String {
    format!("sha-{repo}-{pr_number}")
}

impl MockPlatformService {
    pub fn new() -> Self {
        Self::default()
    }

    // === Setup methods ===

    /// Register an active repository
    pub fn add_repo(&self, full_name: &str) {
        self.insert_repo(full_name, false);
    }

    /// Register an archived repository
    pub fn add_archived_repo(&self, full_name: &str) {
        self.insert_repo(full_name, true);
    }

    fn insert_repo(&self, full_name: &str, archived: bool) {
        self.repositories.lock().unwrap().insert(
            full_name.to_string(),
            RepositoryInfo {
                full_name: full_name.to_string(),
                archived,
            },
        );
        self.open_prs
            .lock()
            .unwrap()
            .entry(full_name.to_string())
            .or_default();
    }

    /// Add an open, mergeable PR with no CI configured
    pub fn add_pr(&self, repo: &str, pr_number: u64, author: &str, title: &str) {
        self.open_prs
            .lock()
            .unwrap()
            .entry(repo.to_string())
            .or_default()
            .push(PullRequestSummary {
                number: pr_number,
                title: title.to_string(),
                author: author.to_string(),
            });

        self.pr_details.lock().unwrap().insert(
            (repo.to_string(), pr_number),
            PullRequestDetails {
                number: pr_number,
                title: title.to_string(),
                body: Some(format!("Body of {title}")),
                author: author.to_string(),
                mergeable: Some(true),
                head_sha: head_sha(repo, pr_number),
            },
        );
    }

    /// Override the mergeable flag of a PR
    pub fn set_mergeable(&self, repo: &str, pr_number: u64, mergeable: Option<bool>) {
        self.update_details(repo, pr_number, |d| d.mergeable = mergeable);
    }

    /// Override the body of a PR
    pub fn set_body(&self, repo: &str, pr_number: u64, body: Option<&str>) {
        self.update_details(repo, pr_number, |d| d.body = body.map(ToString::to_string));
    }

    fn update_details(&self, repo: &str, pr_number: u64, f: impl FnOnce(&mut PullRequestDetails)) {
        let mut details = self.pr_details.lock().unwrap();
        let entry = details
            .get_mut(&(repo.to_string(), pr_number))
            .expect("PR must be added before it is updated");
        f(entry);
    }

    /// Set the combined status of a PR's head commit
    pub fn set_combined_status(&self, repo: &str, pr_number: u64, status: CombinedStatus) {
        self.statuses
            .lock()
            .unwrap()
            .insert(head_sha(repo, pr_number), status);
    }

    /// Set the check runs of a PR's head commit
    pub fn set_check_runs(&self, repo: &str, pr_number: u64, runs: Vec<CheckRun>) {
        self.check_runs
            .lock()
            .unwrap()
            .insert(head_sha(repo, pr_number), runs);
    }

    /// Set the response for `merge_pr` for a specific PR
    pub fn set_merge_response(&self, repo: &str, pr_number: u64, result: MergeResult) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert((repo.to_string(), pr_number), result);
    }

    // === Error injection methods ===

    /// Make `get_repository` fail for a repository
    pub fn fail_get_repository(&self, repo: &str, msg: &str) {
        self.error_on_get_repository
            .lock()
            .unwrap()
            .insert(repo.to_string(), msg.to_string());
    }

    /// Make `list_open_prs` fail for a repository
    pub fn fail_list_prs(&self, repo: &str, msg: &str) {
        self.error_on_list_prs
            .lock()
            .unwrap()
            .insert(repo.to_string(), msg.to_string());
    }

    /// Make `get_pr_details` fail for a PR
    pub fn fail_pr_details(&self, repo: &str, pr_number: u64, msg: &str) {
        self.error_on_pr_details
            .lock()
            .unwrap()
            .insert((repo.to_string(), pr_number), msg.to_string());
    }

    /// Make `list_check_runs` fail for a PR's head commit
    pub fn fail_check_runs(&self, repo: &str, pr_number: u64, msg: &str) {
        self.error_on_check_runs
            .lock()
            .unwrap()
            .insert(head_sha(repo, pr_number), msg.to_string());
    }

    /// Make `merge_pr` fail for a PR
    pub fn fail_merge_pr(&self, repo: &str, pr_number: u64, msg: &str) {
        self.error_on_merge_pr
            .lock()
            .unwrap()
            .insert((repo.to_string(), pr_number), msg.to_string());
    }

    // === Call verification methods ===

    /// Repositories `get_repository` was called with
    pub fn get_repository_calls(&self) -> Vec<String> {
        self.get_repository_calls.lock().unwrap().clone()
    }

    /// Repositories `list_open_prs` was called with
    pub fn list_prs_calls(&self) -> Vec<String> {
        self.list_prs_calls.lock().unwrap().clone()
    }

    /// PRs `get_pr_details` was called with
    pub fn get_pr_details_calls(&self) -> Vec<(String, u64)> {
        self.get_pr_details_calls.lock().unwrap().clone()
    }

    /// SHAs `list_check_runs` was called with
    pub fn check_run_calls(&self) -> Vec<String> {
        self.check_run_calls.lock().unwrap().clone()
    }

    /// All `merge_pr` calls
    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// Assert that `merge_pr` was called for a specific PR
    pub fn assert_merge_called(&self, repo: &str, pr_number: u64) {
        let calls = self.get_merge_pr_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.repo == repo && c.pr_number == pr_number),
            "Expected merge_pr({repo}#{pr_number}) but got: {calls:?}"
        );
    }

    /// Assert that `merge_pr` was NOT called for a specific PR
    pub fn assert_merge_not_called(&self, repo: &str, pr_number: u64) {
        let calls = self.get_merge_pr_calls();
        assert!(
            !calls
                .iter()
                .any(|c| c.repo == repo && c.pr_number == pr_number),
            "Expected merge_pr({repo}#{pr_number}) NOT to be called but it was: {calls:?}"
        );
    }

    /// Get count of `merge_pr` calls
    pub fn merge_call_count(&self) -> usize {
        self.merge_pr_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_repository(&self, repo: &RepoId) -> Result<RepositoryInfo> {
        let name = repo.full_name();
        self.get_repository_calls.lock().unwrap().push(name.clone());

        if let Some(msg) = self.error_on_get_repository.lock().unwrap().get(&name) {
            return Err(Error::Platform(msg.clone()));
        }

        self.repositories
            .lock()
            .unwrap()
            .get(&name)
            .cloned()
            .ok_or_else(|| Error::Platform(format!("404 Not Found: {name}")))
    }

    async fn list_open_prs(&self, repo: &RepoId) -> Result<Vec<PullRequestSummary>> {
        let name = repo.full_name();
        self.list_prs_calls.lock().unwrap().push(name.clone());

        if let Some(msg) = self.error_on_list_prs.lock().unwrap().get(&name) {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self
            .open_prs
            .lock()
            .unwrap()
            .get(&name)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_pr_details(&self, repo: &RepoId, pr_number: u64) -> Result<PullRequestDetails> {
        let key = (repo.full_name(), pr_number);
        self.get_pr_details_calls.lock().unwrap().push(key.clone());

        if let Some(msg) = self.error_on_pr_details.lock().unwrap().get(&key) {
            return Err(Error::Platform(msg.clone()));
        }

        self.pr_details.lock().unwrap().get(&key).cloned().ok_or_else(|| {
            Error::Platform(format!(
                "get_pr_details: no response configured for {}#{pr_number}",
                key.0
            ))
        })
    }

    async fn get_combined_status(&self, _repo: &RepoId, sha: &str) -> Result<CombinedStatus> {
        self.status_calls.lock().unwrap().push(sha.to_string());
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .get(sha)
            .copied()
            .unwrap_or_else(CombinedStatus::none))
    }

    async fn list_check_runs(&self, _repo: &RepoId, sha: &str) -> Result<Vec<CheckRun>> {
        self.check_run_calls.lock().unwrap().push(sha.to_string());

        if let Some(msg) = self.error_on_check_runs.lock().unwrap().get(sha) {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self
            .check_runs
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .unwrap_or_default())
    }

    async fn merge_pr(
        &self,
        repo: &RepoId,
        pr_number: u64,
        request: &MergeRequest,
    ) -> Result<MergeResult> {
        let key = (repo.full_name(), pr_number);
        self.merge_pr_calls.lock().unwrap().push(MergePrCall {
            repo: key.0.clone(),
            pr_number,
            request: request.clone(),
        });

        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().get(&key) {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self
            .merge_responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| MergeResult {
                merged: true,
                sha: Some(format!("merged_sha_{pr_number}")),
                message: Some("Pull Request successfully merged".to_string()),
            }))
    }
}
