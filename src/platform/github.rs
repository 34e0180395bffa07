//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    CheckRun, CombinedStatus, CommitState, MergeRequest, MergeResult, PullRequestDetails,
    PullRequestSummary, RepoId, RepositoryInfo,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Default public API endpoint
const GITHUB_API: &str = "https://api.github.com";

/// Page size for paginated endpoints (GitHub's maximum)
const PER_PAGE: u8 = 100;

/// GitHub service using octocrab
///
/// Pull request and merge calls go through octocrab; commit status and
/// check runs are fetched with raw requests.
pub struct GitHubService {
    client: Octocrab,
    checks: ChecksApi,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` selects a GitHub Enterprise instance; `None` means github.com.
    pub fn new(token: &str, host: Option<&str>) -> Result<Self> {
        let api_base = host.map_or_else(|| GITHUB_API.to_string(), |h| format!("https://{h}/api/v3"));
        Self::with_api_base(token, &api_base)
    }

    /// Create a service against an explicit API base URL
    pub fn with_api_base(token: &str, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/');
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if api_base != GITHUB_API {
            builder = builder.base_uri(api_base)?;
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            checks: ChecksApi::new(token, api_base)?,
        })
    }
}

/// Raw REST access to the commit status and check runs endpoints
struct ChecksApi {
    http_client: Client,
    token: String,
    api_base: String,
}

#[derive(Deserialize)]
struct CombinedStatusResponse {
    state: CommitState,
    total_count: u64,
}

#[derive(Deserialize)]
struct CheckRunsResponse {
    total_count: u64,
    check_runs: Vec<CheckRun>,
}

impl ChecksApi {
    fn new(token: &str, api_base: &str) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("bot-sweep/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            token: token.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        let response = self
            .http_client
            .get(url)
            .query(query)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::GitHubApi(format!("{what} request returned {status}")));
        }

        Ok(response.json().await?)
    }

    /// Legacy commit statuses via the combined status API
    async fn combined_status(&self, repo: &RepoId, sha: &str) -> Result<CombinedStatus> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}/status",
            self.api_base, repo.owner, repo.name, sha
        );
        let status: CombinedStatusResponse = self.get(&url, &[], "commit status").await?;

        debug!(state = %status.state, count = status.total_count, "commit status result");
        Ok(CombinedStatus {
            state: status.state,
            total_count: status.total_count,
        })
    }

    /// All check runs for a commit, following pagination
    async fn check_runs(&self, repo: &RepoId, sha: &str) -> Result<Vec<CheckRun>> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}/check-runs",
            self.api_base, repo.owner, repo.name, sha
        );

        let mut runs = Vec::new();
        let mut page = 1u32;
        loop {
            let query = [("per_page", PER_PAGE.to_string()), ("page", page.to_string())];
            let response: CheckRunsResponse = self.get(&url, &query, "check runs").await?;
            let received = response.check_runs.len();
            runs.extend(response.check_runs);

            if received == 0 || runs.len() as u64 >= response.total_count {
                break;
            }
            page += 1;
        }

        debug!(count = runs.len(), "check runs fetched");
        Ok(runs)
    }
}

fn author_login(pr: &octocrab::models::pulls::PullRequest) -> String {
    pr.user
        .as_ref()
        .map(|u| u.login.clone())
        .unwrap_or_default()
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_repository(&self, repo: &RepoId) -> Result<RepositoryInfo> {
        debug!(%repo, "getting repository");
        let info = self.client.repos(&repo.owner, &repo.name).get().await?;

        Ok(RepositoryInfo {
            full_name: info.full_name.unwrap_or_else(|| repo.full_name()),
            archived: info.archived.unwrap_or(false),
        })
    }

    async fn list_open_prs(&self, repo: &RepoId) -> Result<Vec<PullRequestSummary>> {
        debug!(%repo, "listing open PRs");
        let first_page = self
            .client
            .pulls(&repo.owner, &repo.name)
            .list()
            .state(octocrab::params::State::Open)
            .per_page(PER_PAGE)
            .send()
            .await?;

        let prs = self.client.all_pages(first_page).await?;
        let result: Vec<PullRequestSummary> = prs
            .iter()
            .map(|pr| PullRequestSummary {
                number: pr.number,
                title: pr.title.clone().unwrap_or_default(),
                author: author_login(pr),
            })
            .collect();

        debug!(%repo, count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn get_pr_details(&self, repo: &RepoId, pr_number: u64) -> Result<PullRequestDetails> {
        debug!(%repo, pr_number, "getting PR details");
        let pr = self
            .client
            .pulls(&repo.owner, &repo.name)
            .get(pr_number)
            .await?;

        let details = PullRequestDetails {
            number: pr.number,
            title: pr.title.clone().unwrap_or_default(),
            body: pr.body.clone(),
            author: author_login(&pr),
            mergeable: pr.mergeable,
            head_sha: pr.head.sha.clone(),
        };

        debug!(%repo, pr_number, mergeable = ?details.mergeable, "got PR details");
        Ok(details)
    }

    async fn get_combined_status(&self, repo: &RepoId, sha: &str) -> Result<CombinedStatus> {
        debug!(%repo, sha, "getting combined status");
        self.checks.combined_status(repo, sha).await
    }

    async fn list_check_runs(&self, repo: &RepoId, sha: &str) -> Result<Vec<CheckRun>> {
        debug!(%repo, sha, "listing check runs");
        self.checks.check_runs(repo, sha).await
    }

    async fn merge_pr(
        &self,
        repo: &RepoId,
        pr_number: u64,
        request: &MergeRequest,
    ) -> Result<MergeResult> {
        debug!(%repo, pr_number, "squash-merging PR");

        let result = self
            .client
            .pulls(&repo.owner, &repo.name)
            .merge(pr_number)
            .method(octocrab::params::pulls::MergeMethod::Squash)
            .title(request.commit_title.clone())
            .message(request.commit_message.clone())
            .send()
            .await?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            %repo,
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
