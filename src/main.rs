//! MACD backtester CLI application.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use macd_config::load_config;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Command-line flags win over the logging section
    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let json = cli.json_logs || config.logging.format == "json";
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from));
    let _guard = logging::setup_logging(&level, json, log_file.as_deref())?;

    match cli.command {
        Commands::Backtest(args) => cli::commands::backtest::run(args, config).await,
        Commands::Signals(args) => cli::commands::signals::run(args, config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, &config).await,
    }
}
