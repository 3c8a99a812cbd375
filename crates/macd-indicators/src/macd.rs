//! MACD (Moving Average Convergence Divergence).

use macd_core::error::IndicatorError;
use macd_core::traits::{Indicator, MultiOutputIndicator};
use macd_core::types::IndicatorLine;
use serde::{Deserialize, Serialize};

use crate::ewm::Ewm;

/// Window sizes for the MACD computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    /// Span of the short (fast) EMA
    pub short_window: usize,
    /// Span of the long (slow) EMA
    pub long_window: usize,
    /// Span of the signal line EMA
    pub signal_window: usize,
    /// Use the adjusted (weighted mean) form of the EMA
    pub adjust: bool,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            short_window: 12,
            long_window: 26,
            signal_window: 9,
            adjust: true,
        }
    }
}

impl MacdConfig {
    /// Create a config with custom windows.
    pub fn with_windows(short_window: usize, long_window: usize, signal_window: usize) -> Self {
        Self {
            short_window,
            long_window,
            signal_window,
            ..Default::default()
        }
    }

    /// Check that every window is a positive integer.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        for (name, value) in [
            ("short_window", self.short_window),
            ("long_window", self.long_window),
            ("signal_window", self.signal_window),
        ] {
            if value == 0 {
                return Err(IndicatorError::InvalidWindow { name, value });
            }
        }
        Ok(())
    }

    /// True when the short window is not shorter than the long one.
    ///
    /// Such a config still computes, but the MACD line changes sign.
    pub fn is_inverted(&self) -> bool {
        self.short_window >= self.long_window
    }

    /// First index where the MACD line is defined.
    pub fn macd_start(&self) -> usize {
        self.short_window.max(self.long_window).saturating_sub(1)
    }

    /// First index where the signal line is defined.
    pub fn signal_start(&self) -> usize {
        self.macd_start() + self.signal_window.saturating_sub(1)
    }
}

/// The four aligned outputs of a MACD computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    /// Windows used to produce the lines
    pub config: MacdConfig,
    /// Short EMA of the prices
    pub short_ema: IndicatorLine,
    /// Long EMA of the prices
    pub long_ema: IndicatorLine,
    /// Short EMA minus long EMA
    pub macd: IndicatorLine,
    /// EMA of the MACD line
    pub signal: IndicatorLine,
}

impl IndicatorSeries {
    /// Aligned length (number of prices).
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    /// Check if the series covers no prices.
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }

    /// MACD minus signal at `index`, when both are defined.
    pub fn histogram(&self, index: usize) -> Option<f64> {
        Some(self.macd.get(index)? - self.signal.get(index)?)
    }
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    config: MacdConfig,
    short: Ewm,
    long: Ewm,
    signal: Ewm,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::build(MacdConfig::default())
    }

    /// Create a MACD with custom windows.
    pub fn with_config(config: MacdConfig) -> Result<Self, IndicatorError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: MacdConfig) -> Self {
        let ewm = |span: usize| Ewm::from_valid_span(span).with_adjust(config.adjust);
        Self {
            short: ewm(config.short_window),
            long: ewm(config.long_window),
            signal: ewm(config.signal_window),
            config,
        }
    }

    /// The windows in use.
    pub fn config(&self) -> &MacdConfig {
        &self.config
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = IndicatorSeries;

    fn calculate(&self, data: &[f64]) -> Result<IndicatorSeries, IndicatorError> {
        self.validate_data(data)?;

        let short_ema = self.short.calculate(data)?;
        let long_ema = self.long.calculate(data)?;

        // Defined only where both averages are
        let start = short_ema.defined_from().max(long_ema.defined_from());
        let values: Vec<f64> = (start..data.len())
            .filter_map(|i| Some(short_ema.get(i)? - long_ema.get(i)?))
            .collect();
        let macd = IndicatorLine::new(data.len(), start, values);

        let signal = self.signal.calculate_line(&macd);

        Ok(IndicatorSeries {
            config: self.config.clone(),
            short_ema,
            long_ema,
            macd,
            signal,
        })
    }

    fn warmup(&self) -> usize {
        self.config.signal_start() + 1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// Compute the short/long EMAs, MACD line and signal line for `prices`.
///
/// Fails when `prices` is empty or a window is zero.
pub fn compute_indicators(
    prices: &[f64],
    config: &MacdConfig,
) -> Result<IndicatorSeries, IndicatorError> {
    Macd::with_config(config.clone())?.calculate(prices)
}
