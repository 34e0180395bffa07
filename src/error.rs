//! Error types for bot-sweep

use thiserror::Error;

/// Errors produced while loading configuration or talking to GitHub
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API returned an error or an unexpected response
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generic platform failure (used by alternative `PlatformService` impls)
    #[error("platform error: {0}")]
    Platform(String),

    /// Configuration could not be used
    #[error("configuration error: {0}")]
    Config(String),

    /// No usable credentials were found
    #[error("authentication error: {0}")]
    Auth(String),

    /// A repository entry could not be resolved to `owner/name`
    #[error("invalid repository '{0}'")]
    InvalidRepository(String),

    /// Raw HTTP request failed (transport or response decoding)
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<octocrab::Error> for Error {
    fn from(e: octocrab::Error) -> Self {
        Self::GitHubApi(e.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
