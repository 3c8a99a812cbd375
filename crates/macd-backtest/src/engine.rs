//! Backtesting engine.

use macd_core::error::{DataError, MacdResult};
use macd_core::types::PriceSeries;
use macd_indicators::{compute_indicators, MacdConfig};
use macd_signals::signals_for;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::report::BacktestReport;
use crate::simulator::{simulate, SimulationConfig};
use crate::statistics::SimulationStats;

/// Backtest configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Indicator windows
    #[serde(default)]
    pub macd: MacdConfig,
    /// Starting balances and snapshot ordering
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Backtesting engine.
///
/// Runs indicators, crossover detection and the ledger replay over one
/// price series. Each run is independent, so separate series can be
/// processed on separate threads.
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// Create a new backtest engine.
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run a backtest.
    pub fn run(&self, series: &PriceSeries) -> MacdResult<BacktestReport> {
        if series.is_empty() {
            return Err(DataError::Empty(series.name.clone()).into());
        }

        let macd = &self.config.macd;
        if macd.is_inverted() {
            warn!(
                short = macd.short_window,
                long = macd.long_window,
                "Short window is not shorter than long window, MACD sign is inverted"
            );
        }

        let prices = series.prices();
        let indicators = compute_indicators(&prices, macd)?;
        let signals = signals_for(&indicators)?;
        let simulation = simulate(&prices, &signals, &self.config.simulation)?;
        let stats = SimulationStats::compute(&prices, &simulation);

        info!(
            series = %series.name,
            bars = prices.len(),
            buys = signals.buys.len(),
            sells = signals.sells.len(),
            trades = stats.total_trades,
            ending_value = stats.ending_value,
            "Backtest complete"
        );

        Ok(BacktestReport {
            name: series.name.clone(),
            config: self.config.clone(),
            prices: series.clone(),
            indicators,
            signals,
            simulation,
            stats,
        })
    }
}
