//! Error types for the MACD backtester.

use thiserror::Error;

use crate::types::SignalKind;

/// Top-level error for the whole pipeline.
#[derive(Error, Debug)]
pub enum MacdError {
    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Price series is empty")]
    EmptyInput,

    #[error("Invalid window: {name} must be a positive integer, got {value}")]
    InvalidWindow { name: &'static str, value: usize },
}

/// Signal generation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Misaligned lines: macd has {macd} entries, signal has {signal}")]
    LengthMismatch { macd: usize, signal: usize },
}

/// Backtest simulation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Price series is empty")]
    EmptyInput,

    #[error("{kind} index {index} is out of range for {len} prices")]
    IndexOutOfRange {
        kind: SignalKind,
        index: usize,
        len: usize,
    },

    #[error("Invalid price {price} at index {index}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("Invalid {name}: {value}")]
    InvalidBalance { name: &'static str, value: f64 },
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data file not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid price {price} in row {row}")]
    InvalidPrice { row: usize, price: f64 },

    #[error("No price rows in {0}")]
    Empty(String),
}

/// Result type alias for pipeline operations.
pub type MacdResult<T> = Result<T, MacdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SimulationError::IndexOutOfRange {
            kind: SignalKind::Sell,
            index: 12,
            len: 10,
        };
        assert_eq!(err.to_string(), "Sell index 12 is out of range for 10 prices");

        let err: MacdError = IndicatorError::InvalidWindow {
            name: "long_window",
            value: 0,
        }
        .into();
        assert!(err.to_string().starts_with("Indicator error: Invalid window: long_window"));
    }
}
