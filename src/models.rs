use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contributor as shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub handle: String,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,
    #[serde(rename = "profileUrl")]
    pub profile_url: String,
}

/// Display-ready statistics for the tracked project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub stars: u64,
    pub forks: u64,
    #[serde(rename = "openIssues")]
    pub open_issues: u64,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    #[serde(rename = "contributorCount")]
    pub contributor_count: u64,
    pub downloads: u64,
    pub followers: u64,
    #[serde(rename = "releasedVersionCount")]
    pub released_version_count: u64,
    #[serde(rename = "recentEvents", default)]
    pub recent_events: u64,
}

impl StatsRecord {
    /// Snapshot substituted wholesale when the primary repository stats
    /// cannot be loaded.
    pub fn fallback() -> Self {
        Self {
            stars: 77,
            forks: 11,
            open_issues: 5,
            contributors: Vec::new(),
            contributor_count: 8,
            downloads: 62404,
            followers: 171,
            released_version_count: 20,
            recent_events: 0,
        }
    }

    /// The first `limit` contributors plus how many were left out.
    pub fn featured_contributors(&self, limit: usize) -> (&[Contributor], u64) {
        let shown = &self.contributors[..self.contributors.len().min(limit)];
        let hidden = self.contributor_count.saturating_sub(limit as u64);
        (shown, hidden)
    }
}

/// Independently failing groups of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatGroup {
    Primary,
    Secondary,
    Activity,
}

impl std::fmt::Display for StatGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatGroup::Primary => "primary",
            StatGroup::Secondary => "secondary",
            StatGroup::Activity => "activity",
        };
        f.write_str(name)
    }
}

/// Where the numbers of a settled record came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Outcome {
    Live,
    Degraded { groups: Vec<StatGroup> },
    Fallback,
}

impl Outcome {
    pub fn is_live(&self) -> bool {
        matches!(self, Outcome::Live)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub record: StatsRecord,
    pub outcome: Outcome,
    #[serde(rename = "settledAt")]
    pub settled_at: DateTime<Utc>,
}

/// Loading state of a single stats run. Moves from `Loading` to `Settled`
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Settled(Settlement),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        match self {
            LoadState::Loading => None,
            LoadState::Settled(settlement) => Some(settlement),
        }
    }
}

/// Progress toward a growth goal shown under "Growth Analytics".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Milestone {
    pub label: &'static str,
    pub current: u64,
    pub goal: u64,
}

impl Milestone {
    pub fn stars(record: &StatsRecord) -> Self {
        Self {
            label: "GitHub Stars",
            current: record.stars,
            goal: 100,
        }
    }

    pub fn downloads(record: &StatsRecord) -> Self {
        Self {
            label: "Modrinth Downloads",
            current: record.downloads,
            goal: 100_000,
        }
    }

    /// Percentage of the goal reached, capped at 100.
    pub fn percent(&self) -> f64 {
        if self.goal == 0 {
            return 100.0;
        }
        (self.current as f64 / self.goal as f64 * 100.0).min(100.0)
    }
}
