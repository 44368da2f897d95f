//! Live statistics for the tracked project, merged from GitHub and Modrinth.
//!
//! A load runs four read-only requests concurrently and settles exactly once.
//! The requests fall into three groups that fail independently:
//!
//! * primary: repository metadata and contributors. If either fails, the
//!   whole record is replaced by the configured fallback literal.
//! * secondary: the Modrinth project. On failure its fields become zero.
//! * activity: the public events feed. On failure the count becomes zero.
//!
//! Every caught failure is reported on the `ai_player_stats::fallback` target.

use crate::config::StatsConfig;
use crate::error::{Result, StatsError};
use crate::github::GitHubClient;
use crate::models::{Contributor, LoadState, Outcome, Settlement, StatGroup, StatsRecord};
use crate::modrinth::ModrinthClient;
use crate::types::{GitHubContributor, GitHubEvent, GitHubRepo, ModrinthProject};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use futures::future::try_join;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub const FALLBACK_TARGET: &str = "ai_player_stats::fallback";

/// Window used to count "recent" events from the activity feed.
pub const ACTIVITY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone)]
pub struct StatsAggregator {
    config: Arc<StatsConfig>,
    github: GitHubClient,
    modrinth: ModrinthClient,
}

struct PrimaryStats {
    repo: GitHubRepo,
    contributors: Vec<GitHubContributor>,
}

impl StatsAggregator {
    pub fn new(config: StatsConfig) -> Result<Self> {
        config.validate()?;

        let github = GitHubClient::new(
            &config.github_api_url,
            &config.user_agent,
            config.timeout,
            config.github_token.clone(),
        )?;
        let modrinth =
            ModrinthClient::new(&config.modrinth_api_url, &config.user_agent, config.timeout)?;

        Ok(Self {
            config: Arc::new(config),
            github,
            modrinth,
        })
    }

    /// Runs one aggregation. Never fails: every error is folded into
    /// the returned settlement.
    pub async fn load(&self) -> Settlement {
        debug!(
            repository = %self.config.repository(),
            project = %self.config.project,
            "Loading project stats"
        );

        let (primary, secondary, activity) = tokio::join!(
            self.load_primary(),
            self.load_secondary(),
            self.load_activity()
        );

        let settlement = match primary {
            Err(e) => {
                report_fallback(StatGroup::Primary, &e);
                Settlement {
                    record: self.config.fallback.clone(),
                    outcome: Outcome::Fallback,
                    settled_at: Utc::now(),
                }
            }
            Ok(primary) => {
                let mut degraded = Vec::new();

                let (downloads, followers, released_version_count) = match secondary {
                    Ok(project) => (
                        project.downloads,
                        project.followers,
                        project.versions.len() as u64,
                    ),
                    Err(e) => {
                        report_fallback(StatGroup::Secondary, &e);
                        degraded.push(StatGroup::Secondary);
                        (0, 0, 0)
                    }
                };

                let recent_events = match activity {
                    Ok(events) => {
                        count_recent_events(&events, Utc::now(), ACTIVITY_WINDOW_DAYS)
                    }
                    Err(e) => {
                        report_fallback(StatGroup::Activity, &e);
                        degraded.push(StatGroup::Activity);
                        0
                    }
                };

                let contributor_count = primary.contributors.len() as u64;
                let contributors = primary
                    .contributors
                    .into_iter()
                    .map(Contributor::from)
                    .collect();

                Settlement {
                    record: StatsRecord {
                        stars: primary.repo.stargazers_count,
                        forks: primary.repo.forks_count,
                        open_issues: primary.repo.open_issues_count,
                        contributors,
                        contributor_count,
                        downloads,
                        followers,
                        released_version_count,
                        recent_events,
                    },
                    outcome: if degraded.is_empty() {
                        Outcome::Live
                    } else {
                        Outcome::Degraded { groups: degraded }
                    },
                    settled_at: Utc::now(),
                }
            }
        };

        info!(
            outcome = ?settlement.outcome,
            stars = settlement.record.stars,
            downloads = settlement.record.downloads,
            "Project stats settled"
        );

        settlement
    }

    /// Starts a load in the background. The run lives as long as the
    /// returned handle.
    pub fn spawn(&self) -> StatsHandle {
        let (tx, rx) = watch::channel(LoadState::Loading);
        let aggregator = self.clone();

        let task = tokio::spawn(async move {
            let settlement = aggregator.load().await;
            if tx.send(LoadState::Settled(settlement)).is_err() {
                debug!("Stats handle dropped before settlement, discarding result");
            }
        });

        StatsHandle { state: rx, task }
    }

    async fn load_primary(&self) -> Result<PrimaryStats> {
        let (repo, contributors) = try_join(
            self.github
                .get_repository_info(&self.config.owner, &self.config.repo),
            self.github
                .get_contributors(&self.config.owner, &self.config.repo),
        )
        .await?;

        Ok(PrimaryStats { repo, contributors })
    }

    async fn load_secondary(&self) -> Result<ModrinthProject> {
        self.modrinth.get_project(&self.config.project).await
    }

    async fn load_activity(&self) -> Result<Vec<GitHubEvent>> {
        self.github
            .get_recent_events(&self.config.owner, &self.config.repo)
            .await
    }
}

impl From<GitHubContributor> for Contributor {
    fn from(c: GitHubContributor) -> Self {
        Contributor {
            handle: c.login,
            avatar_url: c.avatar_url.unwrap_or_default(),
            profile_url: c.html_url.unwrap_or_default(),
        }
    }
}

fn report_fallback(group: StatGroup, error: &StatsError) {
    warn!(
        target: FALLBACK_TARGET,
        group = %group,
        error = %error,
        "Stats group failed, using fallback values"
    );
}

/// Counts events created within `window_days` of `now`. Events without a
/// timestamp are skipped.
pub fn count_recent_events(events: &[GitHubEvent], now: DateTime<Utc>, window_days: i64) -> u64 {
    let cutoff = now - ChronoDuration::days(window_days);
    events
        .iter()
        .filter_map(|event| event.created_at)
        .filter(|created_at| *created_at >= cutoff && *created_at <= now)
        .count() as u64
}

/// Owns one background stats run. Dropping the handle aborts the run, so a
/// late resolution is never published.
#[derive(Debug)]
pub struct StatsHandle {
    state: watch::Receiver<LoadState>,
    task: JoinHandle<()>,
}

impl StatsHandle {
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.clone()
    }

    /// Waits for the run to settle. Fails with `Cancelled` if the run was
    /// aborted first.
    pub async fn settled(&mut self) -> Result<Settlement> {
        let state = self
            .state
            .wait_for(|state| !state.is_loading())
            .await
            .map_err(|_| StatsError::Cancelled)?;
        let settlement = state.settlement().cloned();
        settlement.ok_or(StatsError::Cancelled)
    }

    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for StatsHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
