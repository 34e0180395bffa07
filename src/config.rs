//! Repository list configuration
//!
//! The config file is JSON:
//!
//! ```json
//! { "repositories": ["owner/repo", "repo"], "bots": ["dependabot[bot]"] }
//! ```
//!
//! A missing or malformed file never aborts the run; it is reported and
//! treated as an empty configuration.

use crate::error::{Error, Result};
use crate::sweep::BotAllowList;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, warn};

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/repositories.json";

/// Parsed configuration file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SweepConfig {
    /// Repository entries, `"owner/repo"` or bare `"repo"`
    #[serde(default)]
    pub repositories: Vec<String>,
    /// Optional replacement for the default bot allow-list
    #[serde(default)]
    pub bots: Option<Vec<String>>,
}

impl SweepConfig {
    /// Bot allow-list from the config, falling back to the defaults
    pub fn allow_list(&self) -> BotAllowList {
        match &self.bots {
            Some(bots) if !bots.is_empty() => BotAllowList::new(bots),
            _ => BotAllowList::default(),
        }
    }
}

/// Read and parse a config file, surfacing every failure as an error.
pub fn read_config(path: &Path) -> Result<SweepConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Load the config file, degrading to an empty config on failure.
///
/// Missing file: warning. Unreadable or malformed file: error log.
pub fn load_config(path: &Path) -> SweepConfig {
    if !path.exists() {
        warn!(
            path = %path.display(),
            "config file not found; create it with a \"repositories\" list to target"
        );
        return SweepConfig::default();
    }

    read_config(path).unwrap_or_else(|e| {
        error!(error = %e, "ignoring unusable config file");
        SweepConfig::default()
    })
}
