//! Authentication for GitHub
//!
//! Supports environment variables and the GitHub CLI (`gh`).

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, resolve_env_token};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (gh)
    Cli,
    /// Token from environment variable
    EnvVar,
}
