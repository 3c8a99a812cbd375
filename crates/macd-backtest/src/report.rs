//! Backtest report generation.

use macd_core::types::{PriceSeries, SignalSet};
use macd_indicators::IndicatorSeries;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::{BacktestConfig, Simulation, SimulationStats};

/// Complete backtest report for one price series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Series name
    pub name: String,
    /// Configuration used
    pub config: BacktestConfig,
    /// Replayed prices
    pub prices: PriceSeries,
    /// EMAs, MACD and signal line
    pub indicators: IndicatorSeries,
    /// Crossover indices
    pub signals: SignalSet,
    /// Ledger snapshots and trade log
    pub simulation: Simulation,
    /// Summary statistics
    pub stats: SimulationStats,
}

impl BacktestReport {
    fn date_at(&self, index: usize) -> &str {
        self.prices.get(index).map(|p| p.date.as_str()).unwrap_or("?")
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        let stats = &self.stats;
        let macd = &self.config.macd;

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!("  STATISTICS for {}\n", self.name));
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("PERFORMANCE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Starting Money:      {:.2}\n", stats.starting_value));
        s.push_str(&format!("  Ending Money:        {:.2}\n", stats.ending_value));
        s.push_str(&format!("  Earnings:            {:.2}\n", stats.earnings));
        s.push_str(&format!("  Money Multiplier:    {:.4}\n", stats.value_multiplier));
        s.push_str(&format!("  Best Moment:         {:.2}\n", stats.best_value));
        s.push_str(&format!("  Worst Moment:        {:.2}\n", stats.worst_value));
        s.push_str(&format!("  Max Drawdown:        {:.2}%\n", stats.max_drawdown_pct));
        s.push('\n');

        s.push_str("MARKET\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Starting Price:      {:.4}\n", stats.starting_price));
        s.push_str(&format!("  Ending Price:        {:.4}\n", stats.ending_price));
        s.push_str(&format!("  Price Multiplier:    {:.4}\n", stats.price_multiplier));
        s.push('\n');

        s.push_str("SIGNALS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Windows:             {}/{}/{}\n",
            macd.short_window, macd.long_window, macd.signal_window
        ));
        s.push_str(&format!("  Buy Signals:         {}\n", self.signals.buys.len()));
        s.push_str(&format!("  Sell Signals:        {}\n", self.signals.sells.len()));
        s.push_str(&format!("  Executed Buys:       {}\n", stats.buys));
        s.push_str(&format!("  Executed Sells:      {}\n", stats.sells));
        s.push_str(&format!("  Bars Processed:      {}\n", stats.bars_processed));
        s.push('\n');

        if !self.simulation.trades.is_empty() {
            s.push_str("TRADES\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            for trade in &self.simulation.trades {
                let _ = writeln!(
                    s,
                    "  {:<4} {:>12}  @ {:<12.4} units {:<14.6} value {:.2}",
                    trade.kind,
                    self.date_at(trade.index),
                    trade.price,
                    trade.units,
                    trade.value
                );
            }
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the per-index ledger to CSV.
    pub fn valuation_to_csv(&self) -> String {
        let state = &self.simulation.state;
        let mut csv = String::from("index,date,price,cash,holdings,valuation\n");
        for (i, point) in self.prices.iter().enumerate().take(state.len()) {
            let _ = writeln!(
                csv,
                "{},{},{},{},{},{}",
                i, point.date, point.price, state.cash[i], state.holdings[i], state.valuation[i]
            );
        }
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BacktestEngine;
    use macd_core::types::PricePoint;
    use macd_indicators::MacdConfig;

    fn report() -> BacktestReport {
        let points = [10.0, 10.0, 10.0, 10.0, 10.0, 12.0, 8.0, 13.0, 7.0, 14.0, 6.0]
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(format!("2024-01-{:02}", i + 1), p))
            .collect();
        let series = PriceSeries::new("btc", points).unwrap();
        let config = BacktestConfig {
            macd: MacdConfig::with_windows(2, 3, 2),
            ..Default::default()
        };
        BacktestEngine::new(config).run(&series).unwrap()
    }

    #[test]
    fn test_report_summary() {
        let report = report();
        let summary = report.summary();

        assert!(summary.contains("STATISTICS for btc"));
        assert!(summary.contains("Starting Money:      1000.00"));
        assert!(summary.contains("Windows:             2/3/2"));
        assert!(summary.contains("TRADES"));
    }

    #[test]
    fn test_valuation_csv() {
        let report = report();
        let csv = report.valuation_to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "index,date,price,cash,holdings,valuation");
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[1], "0,2024-01-01,10,1000,0,1000");
    }

    #[test]
    fn test_report_json() {
        let report = report();
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "btc");
        assert_eq!(value["stats"]["bars_processed"], 11);
        assert!(value["simulation"]["trades"].is_array());
    }
}
