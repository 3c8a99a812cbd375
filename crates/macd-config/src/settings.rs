//! Configuration structures.

use macd_backtest::{BacktestConfig, SimulationConfig};
use macd_data::PriceField;
use macd_indicators::MacdConfig;
use serde::{Deserialize, Serialize};

use crate::SettingsError;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub indicator: MacdConfig,
    #[serde(default)]
    pub backtest: SimulationConfig,
    #[serde(default)]
    pub data: DataSettings,
}

impl AppConfig {
    /// Check every section for values the pipeline would reject.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.indicator
            .validate()
            .map_err(|e| SettingsError::Invalid(e.to_string()))?;
        self.backtest
            .validate()
            .map_err(|e| SettingsError::Invalid(e.to_string()))?;
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(SettingsError::Invalid(format!(
                "Unknown log format '{}', expected 'pretty' or 'json'",
                self.logging.format
            )));
        }
        Ok(())
    }

    /// Engine configuration built from the indicator and backtest sections.
    pub fn backtest_config(&self) -> BacktestConfig {
        BacktestConfig {
            macd: self.indicator.clone(),
            simulation: self.backtest.clone(),
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Render(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "macd-backtest".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Input data settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DataSettings {
    /// CSV files to backtest when none are given on the command line
    pub files: Vec<String>,
    /// Price column to use
    pub price_field: PriceField,
}
