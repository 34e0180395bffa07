//! GitHub token discovery

use super::AuthSource;
use crate::error::{Error, Result};
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in order
const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolved GitHub credentials
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Access token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

/// Look up a token in the environment through `lookup`.
///
/// Empty values are ignored.
pub fn resolve_env_token<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    TOKEN_VARS.iter().find_map(|var| {
        lookup(var)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Ask the GitHub CLI for its token (`gh auth token`).
async fn get_gh_cli_token() -> Option<String> {
    let output = Command::new("gh").args(["auth", "token"]).output().await.ok()?;
    if !output.status.success() {
        debug!(status = %output.status, "gh auth token failed");
        return None;
    }

    let token = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!token.is_empty()).then_some(token)
}

/// Get GitHub authentication.
///
/// Priority: `GITHUB_TOKEN`, `GH_TOKEN`, then `gh auth token`.
pub async fn get_github_auth() -> Result<GitHubAuthConfig> {
    if let Some(token) = resolve_env_token(|var| std::env::var(var).ok()) {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    if let Some(token) = get_gh_cli_token().await {
        debug!("using GitHub token from gh CLI");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(
        "GITHUB_TOKEN not set (and no token available from `gh auth token`)".to_string(),
    ))
}
