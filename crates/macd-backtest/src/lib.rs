//! Signal replay, statistics and reporting.
//!
//! The simulator replays buy/sell indices against a price series with an
//! all-in/all-out policy. The engine chains indicator computation, signal
//! generation, simulation and statistics into one report.

mod engine;
mod report;
mod simulator;
mod statistics;

pub use engine::{BacktestConfig, BacktestEngine};
pub use report::BacktestReport;
pub use simulator::{
    simulate, Simulation, SimulationConfig, SimulationState, TradeRecord, ValuationTiming,
};
pub use statistics::SimulationStats;
