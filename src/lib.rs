pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod modrinth;
pub mod render;
pub mod server;
pub mod types;

pub use aggregator::{StatsAggregator, StatsHandle};
pub use config::StatsConfig;
pub use error::{Result, StatsError};
pub use models::{LoadState, Outcome, Settlement, StatsRecord};
