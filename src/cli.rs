use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ai-player-stats")]
#[command(about = "Live GitHub and Modrinth statistics for the AI-Player mod, with snapshot fallback")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Repository owner on GitHub
    #[arg(long, env = "STATS_OWNER", default_value = "shasankp000")]
    pub owner: String,

    /// Repository name on GitHub
    #[arg(long, env = "STATS_REPO", default_value = "AI-Player")]
    pub repo: String,

    /// Repository as owner/name, overrides --owner and --repo
    #[arg(long, env = "STATS_REPOSITORY")]
    pub repository: Option<String>,

    /// Modrinth project slug
    #[arg(long, env = "STATS_PROJECT", default_value = "ai-player")]
    pub project: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// Modrinth API base URL
    #[arg(long, env = "MODRINTH_API_URL", default_value = "https://api.modrinth.com")]
    pub modrinth_api_url: String,

    /// Optional GitHub token, raises the unauthenticated rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "STATS_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// JSON snapshot used instead of the built-in fallback numbers
    #[arg(long, env = "STATS_FALLBACK_FILE")]
    pub fallback_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the stats once and print them
    Show {
        /// Print the settlement as JSON instead of the console panels
        #[arg(long)]
        json: bool,
    },

    /// Serve the stats over HTTP, loading fresh on every request
    Serve {
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },

    /// Write live stats to a file for use with --fallback-file
    Snapshot {
        #[arg(long, short)]
        output: PathBuf,
    },
}
