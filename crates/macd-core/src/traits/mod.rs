//! Core traits for the MACD backtester.

mod indicator;

pub use indicator::{Indicator, MultiOutputIndicator};
