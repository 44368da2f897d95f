use ai_player_stats::aggregator::StatsAggregator;
use ai_player_stats::cli::{Cli, Command};
use ai_player_stats::config::{write_snapshot, StatsConfig, DEFAULT_USER_AGENT};
use ai_player_stats::models::LoadState;
use ai_player_stats::render::{render_console, render_json};
use ai_player_stats::server::{start_server, AppState};
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::io::IsTerminal;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Logs go to stderr so `show --json` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let aggregator = StatsAggregator::new(config).context("Invalid stats configuration")?;

    match cli.command.unwrap_or(Command::Show { json: false }) {
        Command::Show { json } => show(&aggregator, json).await,
        Command::Serve { port } => {
            println!("{}", "AI-Player Stats Server".bold().green());
            println!("{}\n", "=".repeat(50).dimmed());
            start_server(AppState { aggregator }, port)
                .await
                .context("Stats server failed")
        }
        Command::Snapshot { output } => {
            let settlement = aggregator.load().await;
            write_snapshot(&settlement, &output)
                .with_context(|| format!("Failed to write snapshot to {}", output.display()))?;
            info!(path = %output.display(), "Snapshot written");
            println!("✅ Snapshot written to {}", output.display());
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> Result<StatsConfig> {
    let mut config = StatsConfig {
        owner: cli.owner.clone(),
        repo: cli.repo.clone(),
        project: cli.project.clone(),
        github_api_url: cli.github_api_url.clone(),
        modrinth_api_url: cli.modrinth_api_url.clone(),
        github_token: cli.github_token.clone().filter(|t| !t.is_empty()),
        user_agent: DEFAULT_USER_AGENT.to_string(),
        timeout: Duration::from_secs(cli.timeout_secs),
        ..Default::default()
    };

    if let Some(full_name) = &cli.repository {
        config = config
            .with_repository(full_name)
            .context("Invalid --repository, expected owner/name")?;
    }

    if let Some(path) = &cli.fallback_file {
        config = config
            .with_fallback_file(path)
            .context("Failed to load fallback snapshot")?;
    }

    Ok(config)
}

async fn show(aggregator: &StatsAggregator, json: bool) -> Result<()> {
    let mut handle = aggregator.spawn();

    tokio::select! {
        settlement = handle.settled() => {
            let settlement = settlement?;
            if json {
                println!("{}", render_json(&settlement)?);
            } else {
                let color = std::io::stdout().is_terminal();
                print!("{}", render_console(&LoadState::Settled(settlement), color));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            // The handle aborts the in-flight run when it drops
            warn!("Interrupted before stats settled");
        }
    }

    Ok(())
}
