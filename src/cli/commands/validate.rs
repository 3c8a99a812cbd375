//! Validate configuration command.

use anyhow::Result;
use macd_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: &Path, config: &AppConfig) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.is_file() {
        println!("File not found, using built-in defaults");
    }

    match config.validate() {
        Ok(()) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!(
                "Windows: short {} / long {} / signal {}",
                config.indicator.short_window,
                config.indicator.long_window,
                config.indicator.signal_window
            );
            if config.indicator.is_inverted() {
                println!("Warning: short window is not shorter than long window");
            }
            println!("Initial cash: {}", config.backtest.initial_cash);
            println!("Initial holdings: {}", config.backtest.initial_holdings);
            println!("Data files: {}", config.data.files.len());
            println!();
            println!("Effective configuration:");
            println!("{}", config.to_toml()?);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
