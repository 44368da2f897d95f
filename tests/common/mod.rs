#![allow(dead_code)]

use ai_player_stats::config::StatsConfig;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const OWNER: &str = "shasankp000";
pub const REPO: &str = "AI-Player";
pub const PROJECT: &str = "ai-player";

pub const REPO_PATH: &str = "/repos/shasankp000/AI-Player";
pub const CONTRIBUTORS_PATH: &str = "/repos/shasankp000/AI-Player/contributors";
pub const EVENTS_PATH: &str = "/repos/shasankp000/AI-Player/events";
pub const PROJECT_PATH: &str = "/v2/project/ai-player";

/// Nothing listens here, so every request fails at the transport level.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// One mock server standing in for both GitHub and Modrinth.
pub struct TestContext {
    pub server: MockServer,
}

impl TestContext {
    pub async fn new() -> Self {
        TestContext {
            server: MockServer::start().await,
        }
    }

    pub fn config(&self) -> StatsConfig {
        StatsConfig {
            owner: OWNER.to_string(),
            repo: REPO.to_string(),
            project: PROJECT.to_string(),
            github_api_url: self.server.uri(),
            modrinth_api_url: self.server.uri(),
            timeout: Duration::from_secs(30),
            ..Default::default()
        }
    }

    pub async fn mount_json(&self, route: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_delayed_json(&self, route: &str, body: Value, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body)
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mount_raw(&self, route: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mounts healthy responses for every endpoint a load touches.
    pub async fn mount_all_healthy(&self, contributor_count: usize) {
        self.mount_json(REPO_PATH, 200, repo_body(120, 14, 6)).await;
        self.mount_json(CONTRIBUTORS_PATH, 200, contributors_body(contributor_count))
            .await;
        self.mount_json(EVENTS_PATH, 200, events_body(3)).await;
        self.mount_json(PROJECT_PATH, 200, project_body(70_000, 200, 22))
            .await;
    }
}

pub fn repo_body(stars: u64, forks: u64, issues: u64) -> Value {
    json!({
        "id": 801234567,
        "name": REPO,
        "full_name": format!("{}/{}", OWNER, REPO),
        "html_url": format!("https://github.com/{}/{}", OWNER, REPO),
        "stargazers_count": stars,
        "forks_count": forks,
        "open_issues_count": issues
    })
}

pub fn contributors_body(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "login": format!("dev{}", i),
                    "id": 1000 + i,
                    "avatar_url": format!("https://avatars.githubusercontent.com/u/{}?v=4", 1000 + i),
                    "html_url": format!("https://github.com/dev{}", i),
                    "contributions": 100 - i
                })
            })
            .collect(),
    )
}

/// Events stamped "now", so all of them fall inside the activity window.
pub fn events_body(count: usize) -> Value {
    let now = chrono::Utc::now().to_rfc3339();
    Value::Array(
        (0..count)
            .map(|i| json!({ "id": i.to_string(), "type": "PushEvent", "created_at": now }))
            .collect(),
    )
}

pub fn project_body(downloads: u64, followers: u64, versions: usize) -> Value {
    json!({
        "slug": PROJECT,
        "title": "AI-Player",
        "downloads": downloads,
        "followers": followers,
        "versions": (0..versions).map(|i| format!("v{}", i)).collect::<Vec<_>>()
    })
}
