//! Core data types for the MACD backtester.

mod line;
mod price;
mod signal;

pub use line::IndicatorLine;
pub use price::{PricePoint, PriceSeries};
pub use signal::{SignalKind, SignalSet};
