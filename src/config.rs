use crate::error::{Result, StatsError};
use crate::github::{self, parse_repo_full_name};
use crate::models::{Settlement, StatsRecord};
use crate::modrinth;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_REPOSITORY: &str = "shasankp000/AI-Player";
pub const DEFAULT_PROJECT: &str = "ai-player";
pub const DEFAULT_USER_AGENT: &str = "ai-player-stats/0.1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Everything one stats run needs: what to track, where to ask, and what to
/// show when asking fails.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub owner: String,
    pub repo: String,
    pub project: String,
    pub fallback: StatsRecord,
    pub github_api_url: String,
    pub modrinth_api_url: String,
    pub github_token: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for StatsConfig {
    fn default() -> Self {
        let (owner, repo) = DEFAULT_REPOSITORY
            .split_once('/')
            .map(|(o, r)| (o.to_string(), r.to_string()))
            .unwrap_or_default();
        Self {
            owner,
            repo,
            project: DEFAULT_PROJECT.to_string(),
            fallback: StatsRecord::fallback(),
            github_api_url: github::DEFAULT_API_BASE_URL.to_string(),
            modrinth_api_url: modrinth::DEFAULT_API_BASE_URL.to_string(),
            github_token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl StatsConfig {
    pub fn with_repository(mut self, full_name: &str) -> Result<Self> {
        let (owner, repo) = parse_repo_full_name(full_name)?;
        self.owner = owner;
        self.repo = repo;
        Ok(self)
    }

    /// Replaces the compiled-in fallback with a JSON snapshot written by
    /// the `snapshot` command.
    pub fn with_fallback_file(mut self, path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StatsError::ConfigError(format!(
                "Failed to read fallback file {}: {}",
                path.display(),
                e
            ))
        })?;
        self.fallback = serde_json::from_str(&contents).map_err(|e| {
            StatsError::ConfigError(format!(
                "Invalid fallback file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(self)
    }

    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn validate(&self) -> Result<()> {
        parse_repo_full_name(&self.repository())?;
        if self.project.is_empty() {
            return Err(StatsError::ConfigError(
                "Modrinth project slug must not be empty".to_string(),
            ));
        }
        for base in [&self.github_api_url, &self.modrinth_api_url] {
            let url = Url::parse(base)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(StatsError::ConfigError(format!(
                    "Unsupported URL scheme: {}",
                    base
                )));
            }
        }
        if self.timeout.is_zero() {
            return Err(StatsError::ConfigError(
                "Timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Writes a settled record as a fallback snapshot. Only live numbers are
/// written; a degraded or fallback settlement is refused.
pub fn write_snapshot(settlement: &Settlement, path: &Path) -> Result<()> {
    if !settlement.outcome.is_live() {
        return Err(StatsError::ConfigError(format!(
            "Refusing to write snapshot from non-live stats ({:?})",
            settlement.outcome
        )));
    }

    let json = serde_json::to_string_pretty(&settlement.record)?;
    std::fs::write(path, json)?;
    Ok(())
}
