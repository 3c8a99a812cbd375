//! Backtest statistics.

use macd_core::types::SignalKind;
use serde::{Deserialize, Serialize};

use crate::simulator::Simulation;

/// Summary of a simulation run against its price series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Valuation at the first index
    pub starting_value: f64,
    /// Valuation at the last index
    pub ending_value: f64,
    /// Ending minus starting valuation
    pub earnings: f64,
    /// Ending over starting valuation (0 when starting at 0)
    pub value_multiplier: f64,
    /// Highest recorded valuation
    pub best_value: f64,
    /// Lowest recorded valuation
    pub worst_value: f64,
    /// First price of the series
    pub starting_price: f64,
    /// Last price of the series
    pub ending_price: f64,
    /// Last over first price (buy-and-hold multiplier)
    pub price_multiplier: f64,
    /// Largest peak-to-trough valuation drop, in percent
    pub max_drawdown_pct: f64,
    /// Number of executed buys
    pub buys: usize,
    /// Number of executed sells
    pub sells: usize,
    /// Number of executed trades
    pub total_trades: usize,
    /// Number of prices replayed
    pub bars_processed: usize,
}

impl SimulationStats {
    /// Compute statistics for `simulation` over `prices`.
    pub fn compute(prices: &[f64], simulation: &Simulation) -> Self {
        let valuation = &simulation.state.valuation;
        let (Some(&starting_value), Some(&ending_value)) = (valuation.first(), valuation.last())
        else {
            return Self::default();
        };
        let starting_price = prices.first().copied().unwrap_or_default();
        let ending_price = prices.last().copied().unwrap_or_default();

        let best_value = valuation.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst_value = valuation.iter().copied().fold(f64::INFINITY, f64::min);

        // Update peak and drawdown
        let mut peak = starting_value;
        let mut max_drawdown_pct = 0.0;
        for &value in valuation {
            if value > peak {
                peak = value;
            }
            if peak > 0.0 {
                let drawdown = (peak - value) / peak * 100.0;
                if drawdown > max_drawdown_pct {
                    max_drawdown_pct = drawdown;
                }
            }
        }

        let buys = simulation.trades_of(SignalKind::Buy).count();
        let sells = simulation.trades_of(SignalKind::Sell).count();

        Self {
            starting_value,
            ending_value,
            earnings: ending_value - starting_value,
            value_multiplier: ratio(ending_value, starting_value),
            best_value,
            worst_value,
            starting_price,
            ending_price,
            price_multiplier: ratio(ending_price, starting_price),
            max_drawdown_pct,
            buys,
            sells,
            total_trades: simulation.trades.len(),
            bars_processed: valuation.len(),
        }
    }

    /// Valuation change in percent.
    pub fn total_return_pct(&self) -> f64 {
        (self.value_multiplier - 1.0) * 100.0
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{simulate, SimulationConfig};
    use macd_core::types::SignalSet;

    #[test]
    fn test_stats_round_trip() {
        let prices = [10.0, 20.0, 40.0, 20.0, 10.0, 5.0];
        let signals = SignalSet::from_indices(vec![1], vec![3]);
        let simulation = simulate(&prices, &signals, &SimulationConfig::default()).unwrap();
        let stats = SimulationStats::compute(&prices, &simulation);

        assert_eq!(stats.starting_value, 1000.0);
        assert_eq!(stats.ending_value, 1000.0);
        assert_eq!(stats.earnings, 0.0);
        assert_eq!(stats.value_multiplier, 1.0);
        assert_eq!(stats.best_value, 2000.0);
        assert_eq!(stats.worst_value, 1000.0);
        assert_eq!(stats.price_multiplier, 0.5);
        assert!((stats.max_drawdown_pct - 50.0).abs() < 1e-10);
        assert_eq!(stats.buys, 1);
        assert_eq!(stats.sells, 1);
        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.bars_processed, 6);
        assert!(stats.total_return_pct().abs() < 1e-10);
    }

    #[test]
    fn test_stats_zero_start() {
        let config = SimulationConfig {
            initial_cash: 0.0,
            ..Default::default()
        };
        let simulation = simulate(&[1.0, 2.0], &SignalSet::new(), &config).unwrap();
        let stats = SimulationStats::compute(&[1.0, 2.0], &simulation);

        assert_eq!(stats.value_multiplier, 0.0);
        assert_eq!(stats.max_drawdown_pct, 0.0);
        assert_eq!(stats.price_multiplier, 2.0);
    }
}
