use crate::error::{Result, StatsError};
use crate::types::ModrinthProject;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE_URL: &str = "https://api.modrinth.com";

/// Read-only client for the Modrinth v2 project endpoint.
#[derive(Debug, Clone)]
pub struct ModrinthClient {
    client: Client,
    base_url: String,
}

impl ModrinthClient {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(ModrinthClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_project(&self, slug: &str) -> Result<ModrinthProject> {
        if slug.is_empty() || slug.contains('/') {
            return Err(StatsError::ConfigError(format!(
                "Invalid Modrinth project slug: {:?}",
                slug
            )));
        }

        let url = format!("{}/v2/project/{}", self.base_url, slug);
        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::OK => {
                debug!(url = %url, "Modrinth request succeeded");
                let project: ModrinthProject = serde_json::from_slice(&response.bytes().await?)?;
                Ok(project)
            }
            StatusCode::NOT_FOUND => {
                Err(StatsError::NotFound(format!("Modrinth project not found: {}", slug)))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(StatsError::RateLimitExceeded(
                "Modrinth API rate limit exceeded".to_string(),
            )),
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(StatsError::ApiError(format!(
                    "Modrinth request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }
}
