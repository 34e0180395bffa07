//! Shared setup for a sweep run
//!
//! Resolves credentials, loads the repository list and builds the platform
//! service before any repository is touched.

use bot_sweep::auth::get_github_auth;
use bot_sweep::config::load_config;
use bot_sweep::error::{Error, Result};
use bot_sweep::platform::{GitHubService, PlatformService};
use bot_sweep::sweep::BotAllowList;
use std::path::Path;
use tracing::debug;

/// Everything a sweep needs, resolved up front
///
/// Construction fails (and the process exits with status 1) when no token
/// is available or no repositories are configured.
pub struct SweepContext {
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
    /// Configured repository entries
    pub repositories: Vec<String>,
    /// Bot logins eligible for auto-merge
    pub bots: BotAllowList,
}

impl SweepContext {
    /// Create a new sweep context
    ///
    /// - Resolve the GitHub token
    /// - Load the repository config (missing or malformed means empty)
    /// - Create the GitHub service
    pub async fn new(config_path: &Path, host: Option<&str>) -> Result<Self> {
        let auth = get_github_auth().await?;
        debug!(source = ?auth.source, "resolved GitHub token");

        let config = load_config(config_path);
        if config.repositories.is_empty() {
            return Err(Error::Config(
                "No repositories configured. Exiting.".to_string(),
            ));
        }
        let bots = config.allow_list();
        debug!(
            repositories = config.repositories.len(),
            bots = ?bots.logins().collect::<Vec<_>>(),
            "loaded config"
        );

        let platform = GitHubService::new(&auth.token, host)?;

        Ok(Self {
            platform: Box::new(platform),
            repositories: config.repositories,
            bots,
        })
    }
}
