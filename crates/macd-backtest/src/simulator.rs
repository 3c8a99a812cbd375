//! All-in/all-out signal replay.

use macd_core::error::SimulationError;
use macd_core::types::{SignalKind, SignalSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// When the per-index snapshot is taken relative to that index's trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationTiming {
    /// Record cash and holdings before the trade at the same index executes
    #[default]
    PreTrade,
    /// Record cash and holdings after the trade at the same index executes
    PostTrade,
}

/// Simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Cash available at index 0
    pub initial_cash: f64,
    /// Asset units held at index 0
    pub initial_holdings: f64,
    /// Snapshot ordering at trade indices
    pub valuation_timing: ValuationTiming,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_cash: 1000.0,
            initial_holdings: 0.0,
            valuation_timing: ValuationTiming::PreTrade,
        }
    }
}

impl SimulationConfig {
    /// Check that both starting balances are finite and non-negative.
    pub fn validate(&self) -> Result<(), SimulationError> {
        for (name, value) in [
            ("initial_cash", self.initial_cash),
            ("initial_holdings", self.initial_holdings),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidBalance { name, value });
            }
        }
        Ok(())
    }
}

/// Per-index account snapshots, aligned with the price series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Cash balance
    pub cash: Vec<f64>,
    /// Asset units held
    pub holdings: Vec<f64>,
    /// Cash plus holdings marked at that index's price
    pub valuation: Vec<f64>,
}

impl SimulationState {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            cash: Vec::with_capacity(capacity),
            holdings: Vec::with_capacity(capacity),
            valuation: Vec::with_capacity(capacity),
        }
    }

    fn record(&mut self, ledger: &Ledger, price: f64) {
        self.cash.push(ledger.cash);
        self.holdings.push(ledger.holdings);
        self.valuation.push(ledger.cash + ledger.holdings * price);
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.valuation.len()
    }

    /// Check if no snapshot was recorded.
    pub fn is_empty(&self) -> bool {
        self.valuation.is_empty()
    }
}

/// Record of a single executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Index into the price series
    pub index: usize,
    /// Buy or sell
    pub kind: SignalKind,
    /// Execution price
    pub price: f64,
    /// Asset units bought or sold
    pub units: f64,
    /// Cash spent or received
    pub value: f64,
    /// Cash balance after the trade
    pub cash_after: f64,
    /// Holdings after the trade
    pub holdings_after: f64,
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// Snapshots per index
    pub state: SimulationState,
    /// Executed trades, in execution order
    pub trades: Vec<TradeRecord>,
}

impl Simulation {
    /// Cash left after the last index.
    pub fn final_cash(&self) -> f64 {
        self.trades
            .last()
            .map(|t| t.cash_after)
            .or_else(|| self.state.cash.last().copied())
            .unwrap_or_default()
    }

    /// Holdings left after the last index.
    pub fn final_holdings(&self) -> f64 {
        self.trades
            .last()
            .map(|t| t.holdings_after)
            .or_else(|| self.state.holdings.last().copied())
            .unwrap_or_default()
    }

    /// Valuation recorded at the last index.
    pub fn final_valuation(&self) -> f64 {
        self.state.valuation.last().copied().unwrap_or_default()
    }

    /// Trades of one kind.
    pub fn trades_of(&self, kind: SignalKind) -> impl Iterator<Item = &TradeRecord> {
        self.trades.iter().filter(move |t| t.kind == kind)
    }
}

/// Running cash/holdings balance.
#[derive(Debug, Clone, Copy)]
struct Ledger {
    cash: f64,
    holdings: f64,
}

impl Ledger {
    /// Spend all cash on the asset.
    fn buy_all(&mut self, index: usize, price: f64) -> Option<TradeRecord> {
        if self.cash <= 0.0 {
            return None;
        }
        let value = self.cash;
        let units = value / price;
        self.holdings += units;
        self.cash = 0.0;
        Some(self.trade(index, SignalKind::Buy, price, units, value))
    }

    /// Liquidate all holdings into cash.
    fn sell_all(&mut self, index: usize, price: f64) -> Option<TradeRecord> {
        if self.holdings <= 0.0 {
            return None;
        }
        let units = self.holdings;
        let value = units * price;
        self.cash += value;
        self.holdings = 0.0;
        Some(self.trade(index, SignalKind::Sell, price, units, value))
    }

    fn trade(
        &self,
        index: usize,
        kind: SignalKind,
        price: f64,
        units: f64,
        value: f64,
    ) -> TradeRecord {
        TradeRecord {
            index,
            kind,
            price,
            units,
            value,
            cash_after: self.cash,
            holdings_after: self.holdings,
        }
    }
}

/// Replay `signals` against `prices`.
///
/// Index 0 only records the starting balances. At every later index a buy
/// spends all cash and a sell liquidates all holdings; a buy is applied
/// before a sell at the same index. Trades at index 0 are never executed.
///
/// Fails without producing partial output when `prices` is empty, a price is
/// not positive, a starting balance is invalid, or a signal index is out of
/// range.
pub fn simulate(
    prices: &[f64],
    signals: &SignalSet,
    config: &SimulationConfig,
) -> Result<Simulation, SimulationError> {
    if prices.is_empty() {
        return Err(SimulationError::EmptyInput);
    }
    config.validate()?;

    if let Some((index, &price)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && **p > 0.0))
    {
        return Err(SimulationError::InvalidPrice { index, price });
    }

    let len = prices.len();
    let mut actions = vec![(false, false); len];
    for (kind, indices) in [(SignalKind::Buy, &signals.buys), (SignalKind::Sell, &signals.sells)] {
        for &index in indices {
            let slot = actions
                .get_mut(index)
                .ok_or(SimulationError::IndexOutOfRange { kind, index, len })?;
            match kind {
                SignalKind::Buy => slot.0 = true,
                SignalKind::Sell => slot.1 = true,
            }
        }
    }

    let mut ledger = Ledger {
        cash: config.initial_cash,
        holdings: config.initial_holdings,
    };
    let mut state = SimulationState::with_capacity(len);
    let mut trades = Vec::new();

    state.record(&ledger, prices[0]);

    for (i, (&price, &(buy, sell))) in prices.iter().zip(actions.iter()).enumerate().skip(1) {
        if config.valuation_timing == ValuationTiming::PreTrade {
            state.record(&ledger, price);
        }

        if buy {
            if let Some(trade) = ledger.buy_all(i, price) {
                debug!(index = i, price, units = trade.units, spent = trade.value, "Bought");
                trades.push(trade);
            }
        }
        if sell {
            if let Some(trade) = ledger.sell_all(i, price) {
                debug!(index = i, price, units = trade.units, received = trade.value, "Sold");
                trades.push(trade);
            }
        }

        if config.valuation_timing == ValuationTiming::PostTrade {
            state.record(&ledger, price);
        }
    }

    debug!(
        bars = len,
        trades = trades.len(),
        final_cash = ledger.cash,
        final_holdings = ledger.holdings,
        "Simulation complete"
    );

    Ok(Simulation { state, trades })
}
