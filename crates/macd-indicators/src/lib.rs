//! Exponential moving averages and the MACD indicator.
//!
//! This crate provides:
//! - Exponentially weighted moving averages with span-based smoothing
//! - The MACD line and its signal line, aligned with the input prices
//!
//! Every output keeps the length of its input. Positions inside an average's
//! warm-up period are left undefined rather than zero-filled.

pub mod ewm;
pub mod macd;

pub use ewm::Ewm;
pub use macd::{compute_indicators, IndicatorSeries, Macd, MacdConfig};
