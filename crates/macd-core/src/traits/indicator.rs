//! Indicator trait definitions.

use crate::error::IndicatorError;
use crate::types::IndicatorLine;

/// Trait for single-output technical indicators.
///
/// Indicators are pure functions of their input: the same prices always
/// produce the same line. The returned line is aligned with the input, with
/// positions before the warm-up period left undefined.
pub trait Indicator: Send + Sync {
    /// Calculate the indicator over `data`.
    ///
    /// # Arguments
    /// * `data` - Input data (typically prices)
    ///
    /// # Returns
    /// A line of the same aligned length as `data`
    fn calculate(&self, data: &[f64]) -> Result<IndicatorLine, IndicatorError>;

    /// Number of observations needed before the first value.
    fn warmup(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Reject empty input.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.is_empty() {
            return Err(IndicatorError::EmptyInput);
        }
        Ok(())
    }
}

/// Multi-output indicator (e.g. MACD with its EMAs and signal line).
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing the related lines.
    type Outputs;

    /// Calculate all outputs over `data`.
    fn calculate(&self, data: &[f64]) -> Result<Self::Outputs, IndicatorError>;

    /// Number of observations needed before every output is defined.
    fn warmup(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Reject empty input.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.is_empty() {
            return Err(IndicatorError::EmptyInput);
        }
        Ok(())
    }
}
