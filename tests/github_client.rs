mod common;

use ai_player_stats::error::StatsError;
use ai_player_stats::github::GitHubClient;
use ai_player_stats::modrinth::ModrinthClient;
use common::*;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn github_client(base_url: &str) -> GitHubClient {
    GitHubClient::new(base_url, "ai-player-stats-tests", Duration::from_secs(5), None)
        .expect("Failed to create client")
}

#[tokio::test]
async fn test_github_client_creation() {
    let client = GitHubClient::new(
        "https://api.github.com",
        "ai-player-stats-tests",
        Duration::from_secs(5),
        Some("test_token".to_string()),
    );
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_get_repository_info() {
    let ctx = TestContext::new().await;
    ctx.mount_json(REPO_PATH, 200, repo_body(77, 11, 5)).await;

    let repo = github_client(&ctx.server.uri())
        .get_repository_info(OWNER, REPO)
        .await
        .expect("Failed to get repository info");

    assert_eq!(repo.full_name, "shasankp000/AI-Player");
    assert_eq!(repo.stargazers_count, 77);
    assert_eq!(repo.forks_count, 11);
    assert_eq!(repo.open_issues_count, 5);
}

#[tokio::test]
async fn test_repository_missing_counts_default_to_zero() {
    let ctx = TestContext::new().await;
    ctx.mount_json(REPO_PATH, 200, json!({ "full_name": "shasankp000/AI-Player" }))
        .await;

    let repo = github_client(&ctx.server.uri())
        .get_repository_info(OWNER, REPO)
        .await
        .expect("Failed to get repository info");

    assert_eq!(repo.stargazers_count, 0);
    assert_eq!(repo.forks_count, 0);
    assert_eq!(repo.open_issues_count, 0);
}

#[tokio::test]
async fn test_get_contributors_preserves_order() {
    let ctx = TestContext::new().await;
    ctx.mount_json(CONTRIBUTORS_PATH, 200, contributors_body(3)).await;

    let contributors = github_client(&ctx.server.uri())
        .get_contributors(OWNER, REPO)
        .await
        .expect("Failed to fetch contributors");

    let logins: Vec<&str> = contributors.iter().map(|c| c.login.as_str()).collect();
    assert_eq!(logins, vec!["dev0", "dev1", "dev2"]);
    assert!(contributors[0].avatar_url.is_some());
}

#[tokio::test]
async fn test_get_recent_events() {
    let ctx = TestContext::new().await;
    ctx.mount_json(EVENTS_PATH, 200, events_body(4)).await;

    let events = github_client(&ctx.server.uri())
        .get_recent_events(OWNER, REPO)
        .await
        .expect("Failed to fetch events");

    assert_eq!(events.len(), 4);
    assert_eq!(events[0].kind.as_deref(), Some("PushEvent"));
    assert!(events[0].created_at.is_some());
}

#[tokio::test]
async fn test_repository_not_found() {
    let ctx = TestContext::new().await;
    ctx.mount_json(REPO_PATH, 404, json!({ "message": "Not Found" }))
        .await;

    let result = github_client(&ctx.server.uri())
        .get_repository_info(OWNER, REPO)
        .await;

    match result.unwrap_err() {
        StatsError::NotFound(_) => {}
        other => panic!("Expected NotFound error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limited_response() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header("X-RateLimit-Reset", "1735689600")
                .set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&ctx.server)
        .await;

    let result = github_client(&ctx.server.uri())
        .get_repository_info(OWNER, REPO)
        .await;

    match result.unwrap_err() {
        StatsError::RateLimitExceeded(_) => {}
        other => panic!("Expected RateLimitExceeded error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let result = github_client(&ctx.server.uri())
        .get_repository_info(OWNER, REPO)
        .await;

    assert!(matches!(result, Err(StatsError::ApiError(_))));
}

#[tokio::test]
async fn test_malformed_json() {
    let ctx = TestContext::new().await;
    ctx.mount_raw(CONTRIBUTORS_PATH, 200, "{ not json").await;

    let result = github_client(&ctx.server.uri())
        .get_contributors(OWNER, REPO)
        .await;

    assert!(matches!(result, Err(StatsError::JsonError(_))));
}

#[tokio::test]
async fn test_unexpected_shape_is_json_error() {
    let ctx = TestContext::new().await;
    ctx.mount_json(CONTRIBUTORS_PATH, 200, json!({ "message": "oops" }))
        .await;

    let result = github_client(&ctx.server.uri())
        .get_contributors(OWNER, REPO)
        .await;

    assert!(matches!(result, Err(StatsError::JsonError(_))));
}

#[tokio::test]
async fn test_token_sent_when_configured() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path(REPO_PATH))
        .and(header("Authorization", "token secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_body(1, 2, 3)))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let client = GitHubClient::new(
        &ctx.server.uri(),
        "ai-player-stats-tests",
        Duration::from_secs(5),
        Some("secret".to_string()),
    )
    .unwrap();

    let repo = client.get_repository_info(OWNER, REPO).await.unwrap();
    assert_eq!(repo.stargazers_count, 1);
}

#[tokio::test]
async fn test_invalid_repo_segment() {
    let client = github_client(UNREACHABLE_URL);

    let result = client.get_repository_info("owner/extra", REPO).await;

    match result.unwrap_err() {
        StatsError::InvalidRepo(_) => {}
        other => panic!("Expected InvalidRepo error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let result = github_client(UNREACHABLE_URL)
        .get_repository_info(OWNER, REPO)
        .await;

    assert!(matches!(result, Err(StatsError::NetworkError(_))));
}

#[tokio::test]
async fn test_modrinth_get_project() {
    let ctx = TestContext::new().await;
    ctx.mount_json(PROJECT_PATH, 200, project_body(62404, 171, 20))
        .await;

    let client = ModrinthClient::new(
        &ctx.server.uri(),
        "ai-player-stats-tests",
        Duration::from_secs(5),
    )
    .unwrap();
    let project = client.get_project(PROJECT).await.unwrap();

    assert_eq!(project.slug, "ai-player");
    assert_eq!(project.downloads, 62404);
    assert_eq!(project.followers, 171);
    assert_eq!(project.versions.len(), 20);
}

#[tokio::test]
async fn test_modrinth_project_not_found() {
    let ctx = TestContext::new().await;
    ctx.mount_json(PROJECT_PATH, 404, json!({ "error": "not_found" }))
        .await;

    let client = ModrinthClient::new(
        &ctx.server.uri(),
        "ai-player-stats-tests",
        Duration::from_secs(5),
    )
    .unwrap();

    assert!(matches!(
        client.get_project(PROJECT).await,
        Err(StatsError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "Requires network access to api.github.com"]
async fn test_live_repository_info() {
    let client = github_client("https://api.github.com");

    let repo = client
        .get_repository_info("rust-lang", "rust")
        .await
        .expect("Failed to get repository info");

    assert_eq!(repo.full_name, "rust-lang/rust");
    assert!(repo.stargazers_count > 0);
}
