use crate::error::{Result, StatsError};
use crate::types::{GitHubContributor, GitHubEvent, GitHubRepo};
use reqwest::{Client, Response, StatusCode};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const PER_PAGE: u32 = 100;

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
        token: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(GitHubClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Single unauthenticated (or token-authenticated) GET. Nothing is retried:
    /// a failed fetch is final for the current load.
    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await?;

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        match response.status() {
            StatusCode::OK => {
                if let Some(remaining) = rate_limit_remaining {
                    if remaining < 10 {
                        warn!(remaining, "GitHub rate limit low");
                    }
                }
                debug!(url, "GitHub request succeeded");
                Ok(response)
            }
            StatusCode::NOT_FOUND => {
                Err(StatsError::NotFound(format!("Resource not found: {}", url)))
            }
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if rate_limit_remaining == Some(0) =>
            {
                let reset = response
                    .headers()
                    .get("X-RateLimit-Reset")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(0);
                let reset_time = SystemTime::UNIX_EPOCH + Duration::from_secs(reset);
                Err(StatsError::RateLimitExceeded(format!(
                    "GitHub API rate limit exceeded. Reset at: {:?}",
                    reset_time
                )))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(StatsError::ApiError(format!(
                    "GitHub request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }

    pub async fn get_repository_info(&self, owner: &str, repo: &str) -> Result<GitHubRepo> {
        validate_segment(owner)?;
        validate_segment(repo)?;
        let url = format!("{}/repos/{}/{}", self.base_url, owner, repo);
        let response = self.make_request(&url).await?;
        let repo_data: GitHubRepo = serde_json::from_slice(&response.bytes().await?)?;
        Ok(repo_data)
    }

    /// First page of contributors, in the order GitHub returns them.
    pub async fn get_contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<GitHubContributor>> {
        validate_segment(owner)?;
        validate_segment(repo)?;
        let url = format!(
            "{}/repos/{}/{}/contributors?per_page={}",
            self.base_url, owner, repo, PER_PAGE
        );
        let response = self.make_request(&url).await?;
        let contributors: Vec<GitHubContributor> =
            serde_json::from_slice(&response.bytes().await?)?;
        Ok(contributors)
    }

    pub async fn get_recent_events(&self, owner: &str, repo: &str) -> Result<Vec<GitHubEvent>> {
        validate_segment(owner)?;
        validate_segment(repo)?;
        let url = format!(
            "{}/repos/{}/{}/events?per_page={}",
            self.base_url, owner, repo, PER_PAGE
        );
        let response = self.make_request(&url).await?;
        let events: Vec<GitHubEvent> = serde_json::from_slice(&response.bytes().await?)?;
        Ok(events)
    }
}

fn validate_segment(segment: &str) -> Result<()> {
    if segment.is_empty() || segment.contains('/') {
        return Err(StatsError::InvalidRepo(format!(
            "Invalid repository segment: {:?}",
            segment
        )));
    }
    Ok(())
}

/// Splits an `owner/name` identifier.
pub fn parse_repo_full_name(full_name: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = full_name.split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(StatsError::InvalidRepo(format!(
            "Invalid repository name format: {}",
            full_name
        )));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}
