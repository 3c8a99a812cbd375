//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use macd_backtest::ValuationTiming;
use macd_config::AppConfig;
use macd_data::PriceField;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "macd")]
#[command(author, version, about = "MACD crossover backtester for CSV price histories")]
pub struct Cli {
    /// Configuration file path (optional; defaults apply when missing)
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level, overriding the configuration file
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MACD strategy over one or more price histories
    Backtest(BacktestArgs),
    /// List crossover signals without simulating trades
    Signals(SignalsArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PriceColumn {
    Open,
    Close,
}

impl From<PriceColumn> for PriceField {
    fn from(column: PriceColumn) -> Self {
        match column {
            PriceColumn::Open => PriceField::Open,
            PriceColumn::Close => PriceField::Close,
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Input files and indicator windows shared by every command.
#[derive(clap::Args)]
pub struct DataArgs {
    /// Data file (CSV); repeat for several files
    #[arg(short, long = "data")]
    pub data: Vec<PathBuf>,

    /// Price column to read
    #[arg(long)]
    pub price_field: Option<PriceColumn>,

    /// Short EMA span
    #[arg(long)]
    pub short: Option<usize>,

    /// Long EMA span
    #[arg(long)]
    pub long: Option<usize>,

    /// Signal line span
    #[arg(long)]
    pub signal: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl DataArgs {
    /// Fold command-line overrides into the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(short) = self.short {
            config.indicator.short_window = short;
        }
        if let Some(long) = self.long {
            config.indicator.long_window = long;
        }
        if let Some(signal) = self.signal {
            config.indicator.signal_window = signal;
        }
        if let Some(column) = self.price_field {
            config.data.price_field = column.into();
        }
    }
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Initial cash
    #[arg(long)]
    pub cash: Option<f64>,

    /// Initial holdings
    #[arg(long)]
    pub holdings: Option<f64>,

    /// Record balances after each index's trades instead of before
    #[arg(long)]
    pub post_trade_valuation: bool,

    /// Save results to file (JSON)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Write a per-index valuation CSV for each series into this directory
    #[arg(long)]
    pub valuation_csv: Option<PathBuf>,
}

impl BacktestArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        self.data.apply(config);
        if let Some(cash) = self.cash {
            config.backtest.initial_cash = cash;
        }
        if let Some(holdings) = self.holdings {
            config.backtest.initial_holdings = holdings;
        }
        if self.post_trade_valuation {
            config.backtest.valuation_timing = ValuationTiming::PostTrade;
        }
    }
}

#[derive(clap::Args)]
pub struct SignalsArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_backtest_overrides() {
        let cli = Cli::parse_from([
            "macd",
            "backtest",
            "--data",
            "a.csv",
            "--data",
            "b.csv",
            "--short",
            "3",
            "--cash",
            "50",
            "--price-field",
            "close",
            "--post-trade-valuation",
        ]);
        let Commands::Backtest(args) = cli.command else {
            panic!("expected backtest command");
        };

        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(args.data.data.len(), 2);
        assert_eq!(config.indicator.short_window, 3);
        assert_eq!(config.indicator.long_window, 26);
        assert_eq!(config.backtest.initial_cash, 50.0);
        assert_eq!(config.data.price_field, PriceField::Close);
        assert_eq!(config.backtest.valuation_timing, ValuationTiming::PostTrade);
    }

    #[test]
    fn test_log_level_optional() {
        let cli = Cli::parse_from(["macd", "validate-config"]);
        assert!(cli.log_level.is_none());

        let cli = Cli::parse_from(["macd", "-l", "debug", "signals"]);
        assert_eq!(cli.log_level.map(LogLevel::as_str), Some("debug"));
    }
}
