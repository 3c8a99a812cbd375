//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, DataSettings, LoggingConfig};

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use config::builder::DefaultState;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to render configuration: {0}")]
    Render(String),
}

/// Load configuration from file and environment.
///
/// A missing file is not an error; built-in defaults apply. Environment
/// variables such as `MACD__INDICATOR__SHORT_WINDOW` override file values.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    build(Config::builder().add_source(File::from(path).required(false)))
}

/// Parse configuration from a TOML string, then apply the environment.
pub fn parse_config(toml: &str) -> Result<AppConfig, SettingsError> {
    build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, SettingsError> {
    let config = builder
        .add_source(
            Environment::with_prefix("MACD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use macd_backtest::ValuationTiming;
    use macd_data::PriceField;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.indicator.short_window, 12);
        assert_eq!(config.indicator.long_window, 26);
        assert_eq!(config.indicator.signal_window, 9);
        assert_eq!(config.backtest.initial_cash, 1000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sections_parsed() {
        let config = parse_config(
            r#"
            [indicator]
            short_window = 3
            long_window = 5
            signal_window = 2

            [backtest]
            initial_cash = 500
            valuation_timing = "post_trade"

            [data]
            files = ["data/btc.csv", "data/doge.csv"]
            price_field = "close"
            "#,
        )
        .unwrap();

        assert_eq!(config.indicator.short_window, 3);
        assert!(config.indicator.adjust);
        assert_eq!(config.backtest.initial_cash, 500.0);
        assert_eq!(config.backtest.valuation_timing, ValuationTiming::PostTrade);
        assert_eq!(config.data.files.len(), 2);
        assert_eq!(config.data.price_field, PriceField::Close);

        let backtest = config.backtest_config();
        assert_eq!(backtest.macd.long_window, 5);
    }

    #[test]
    fn test_validation() {
        let config = parse_config("[indicator]\nsignal_window = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(SettingsError::Invalid(_))));

        let config = parse_config("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_defaults() {
        let config = load_config(Path::new("/definitely/not/here.toml")).unwrap();
        assert_eq!(config.app.name, "macd-backtest");
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = AppConfig::default();
        let rendered = config.to_toml().unwrap();

        assert!(rendered.contains("[indicator]"));
        assert_eq!(parse_config(&rendered).unwrap(), config);
    }
}
