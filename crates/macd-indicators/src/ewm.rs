//! Exponentially weighted moving average.

use macd_core::error::IndicatorError;
use macd_core::traits::Indicator;
use macd_core::types::IndicatorLine;

/// Exponentially weighted moving average (EMA).
///
/// Uses span-based smoothing, `alpha = 2 / (span + 1)`, and produces no
/// value until `min_periods` observations have been seen (defaults to the
/// span).
///
/// With `adjust` enabled (the default) each output is the weighted mean of
/// every observation so far, with weights `(1 - alpha)^k` for the
/// observation `k` steps back. With `adjust` disabled the plain recursion
/// `ema = alpha * price + (1 - alpha) * ema` is used, seeded with the first
/// observation.
#[derive(Debug, Clone)]
pub struct Ewm {
    span: usize,
    min_periods: usize,
    alpha: f64,
    adjust: bool,
}

impl Ewm {
    /// Create a new EMA with the specified span.
    pub fn new(span: usize) -> Result<Self, IndicatorError> {
        if span == 0 {
            return Err(IndicatorError::InvalidWindow {
                name: "span",
                value: span,
            });
        }
        Ok(Self::from_valid_span(span))
    }

    /// Create an EMA for a span already checked to be positive.
    pub(crate) fn from_valid_span(span: usize) -> Self {
        debug_assert!(span > 0);
        Self {
            span,
            min_periods: span,
            alpha: 2.0 / (span as f64 + 1.0),
            adjust: true,
        }
    }

    /// Switch between the adjusted and the recursive form.
    pub fn with_adjust(mut self, adjust: bool) -> Self {
        self.adjust = adjust;
        self
    }

    /// Override the number of observations required before the first value.
    pub fn with_min_periods(mut self, min_periods: usize) -> Result<Self, IndicatorError> {
        if min_periods == 0 {
            return Err(IndicatorError::InvalidWindow {
                name: "min_periods",
                value: min_periods,
            });
        }
        self.min_periods = min_periods;
        Ok(self)
    }

    /// The configured span.
    pub fn span(&self) -> usize {
        self.span
    }

    /// The smoothing factor derived from the span.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Apply the average to the defined part of another line.
    ///
    /// The warm-up of the result stacks on top of the input's: the first
    /// value appears `min_periods - 1` positions after the input's first
    /// defined value.
    pub fn calculate_line(&self, line: &IndicatorLine) -> IndicatorLine {
        if !line.is_defined() {
            return IndicatorLine::undefined(line.len());
        }
        let values = self.masked(line.values());
        IndicatorLine::new(
            line.len(),
            line.defined_from() + self.min_periods - 1,
            values,
        )
    }

    /// Smoothed values from the `min_periods`-th observation onward.
    fn masked(&self, data: &[f64]) -> Vec<f64> {
        let skip = self.min_periods - 1;
        if data.len() <= skip {
            return vec![];
        }
        let mut smoothed = self.smooth(data);
        smoothed.split_off(skip)
    }

    /// One smoothed value per observation, warm-up included.
    ///
    /// The mean is updated incrementally from the running weight of past
    /// observations. An observation equal to the current mean leaves it
    /// untouched, so flat stretches stay exact.
    fn smooth(&self, data: &[f64]) -> Vec<f64> {
        let Some((&first, rest)) = data.split_first() else {
            return vec![];
        };
        let decay = 1.0 - self.alpha;
        let new_weight = if self.adjust { 1.0 } else { self.alpha };

        let mut result = Vec::with_capacity(data.len());
        let mut mean = first;
        let mut old_weight = 1.0;
        result.push(mean);

        for &price in rest {
            old_weight *= decay;
            if mean != price {
                mean = (old_weight * mean + new_weight * price) / (old_weight + new_weight);
            }
            old_weight = if self.adjust {
                old_weight + new_weight
            } else {
                1.0
            };
            result.push(mean);
        }

        result
    }
}

impl Indicator for Ewm {
    fn calculate(&self, data: &[f64]) -> Result<IndicatorLine, IndicatorError> {
        self.validate_data(data)?;
        Ok(IndicatorLine::new(
            data.len(),
            self.min_periods - 1,
            self.masked(data),
        ))
    }

    fn warmup(&self) -> usize {
        self.min_periods
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
