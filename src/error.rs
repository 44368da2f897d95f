use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Invalid repository: {0}")]
    InvalidRepo(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Stats run cancelled")]
    Cancelled,
}

impl From<url::ParseError> for StatsError {
    fn from(e: url::ParseError) -> Self {
        StatsError::ConfigError(format!("Invalid URL: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
