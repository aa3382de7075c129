pub mod backends;
pub mod cli;
pub mod core;

use crate::cli::entries::{ListFilter, NewEntry};
use crate::core::Period;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Dashboard { period: Option<Period> },
    Chart { period: Option<Period> },
    List(ListFilter),
    Add(NewEntry),
    Delete { id: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Fintally starting...");

    let config = match config_path {
        Some(path) => core::config::AppConfig::load_from_path(path)?,
        None => core::config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let backend = backends::from_config(&config.backend)?;
    let symbol = config.currency_symbol.as_str();

    match command {
        AppCommand::Dashboard { period } => {
            cli::dashboard::run(
                backend.as_ref(),
                period.unwrap_or(config.default_period),
                symbol,
            )
            .await
        }
        AppCommand::Chart { period } => {
            cli::chart::run(
                backend.as_ref(),
                period.unwrap_or(config.default_period),
                symbol,
            )
            .await
        }
        AppCommand::List(filter) => cli::entries::list(backend.as_ref(), &filter, symbol).await,
        AppCommand::Add(entry) => cli::entries::add(backend.as_ref(), entry).await,
        AppCommand::Delete { id } => cli::entries::delete(backend.as_ref(), &id).await,
    }
}
