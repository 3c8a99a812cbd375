//! Core types and traits for the MACD backtester.
//!
//! This crate provides the foundational building blocks including:
//! - Price data types (PricePoint, PriceSeries)
//! - Warm-up aware indicator lines
//! - Buy/sell signal sets
//! - Error types shared by every stage of the pipeline
//! - Core traits for indicators

pub mod types;
pub mod traits;
pub mod error;

pub use error::{MacdError, MacdResult};
pub use types::*;
pub use traits::*;
