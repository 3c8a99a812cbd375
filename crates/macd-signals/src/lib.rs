//! MACD/signal line crossover detection.
//!
//! Turns the MACD line and its signal line into discrete trading events:
//! - Buy when the MACD line crosses above the signal line
//! - Sell when the MACD line crosses below the signal line

mod crossover;

pub use crossover::{generate_signals, scan_crossovers, signals_for, Crossover};
