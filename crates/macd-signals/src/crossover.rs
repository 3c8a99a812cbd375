//! Crossover scan.
//!
//! Compares each point of the MACD/signal pair with the point before it.
//! The current point is tested strictly and the previous one non-strictly,
//! so a tie followed by a move away still counts as a cross, and no index
//! can be both a buy and a sell.

use macd_core::error::SignalError;
use macd_core::types::{IndicatorLine, SignalKind, SignalSet};
use macd_indicators::IndicatorSeries;
use tracing::debug;

/// Outcome of comparing two consecutive MACD/signal pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// MACD moved from at-or-below to strictly above the signal line
    Bullish,
    /// MACD moved from at-or-above to strictly below the signal line
    Bearish,
    /// No cross
    Hold,
}

impl Crossover {
    /// Classify the step from `prev` to `curr`, each a `(macd, signal)` pair.
    pub fn classify(prev: (f64, f64), curr: (f64, f64)) -> Self {
        let (prev_macd, prev_signal) = prev;
        let (macd, signal) = curr;

        if macd > signal && prev_macd <= prev_signal {
            Crossover::Bullish
        } else if macd < signal && prev_macd >= prev_signal {
            Crossover::Bearish
        } else {
            Crossover::Hold
        }
    }

    /// The trading signal this crossover triggers, if any.
    pub fn signal_kind(self) -> Option<SignalKind> {
        match self {
            Crossover::Bullish => Some(SignalKind::Buy),
            Crossover::Bearish => Some(SignalKind::Sell),
            Crossover::Hold => None,
        }
    }
}

/// Scan fully defined, equal-length MACD and signal slices for crossovers.
///
/// Position 0 of the slices corresponds to series index `offset`, so the
/// reported indices are `offset + i` for `i` in `1..len`.
pub fn scan_crossovers(
    macd: &[f64],
    signal: &[f64],
    offset: usize,
) -> Result<SignalSet, SignalError> {
    if macd.len() != signal.len() {
        return Err(SignalError::LengthMismatch {
            macd: macd.len(),
            signal: signal.len(),
        });
    }

    let mut signals = SignalSet::new();
    for i in 1..macd.len() {
        let step = Crossover::classify((macd[i - 1], signal[i - 1]), (macd[i], signal[i]));
        if let Some(kind) = step.signal_kind() {
            signals.push(kind, offset + i);
        }
    }

    Ok(signals)
}

/// Generate buy/sell indices from aligned MACD and signal lines.
///
/// Only the range where both lines are defined is scanned; the first index
/// that can carry a signal is one past the later of the two warm-ups.
pub fn generate_signals(
    macd: &IndicatorLine,
    signal: &IndicatorLine,
) -> Result<SignalSet, SignalError> {
    if macd.len() != signal.len() {
        return Err(SignalError::LengthMismatch {
            macd: macd.len(),
            signal: signal.len(),
        });
    }

    let start = macd.defined_from().max(signal.defined_from());
    if start >= macd.len() {
        debug!(len = macd.len(), "No defined MACD/signal range, no signals");
        return Ok(SignalSet::new());
    }

    let macd_values = &macd.values()[start - macd.defined_from()..];
    let signal_values = &signal.values()[start - signal.defined_from()..];
    let signals = scan_crossovers(macd_values, signal_values, start)?;

    debug!(
        start,
        buys = signals.buys.len(),
        sells = signals.sells.len(),
        "Crossover scan complete"
    );

    Ok(signals)
}

/// Generate signals straight from a computed indicator series.
pub fn signals_for(indicators: &IndicatorSeries) -> Result<SignalSet, SignalError> {
    generate_signals(&indicators.macd, &indicators.signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use macd_indicators::{compute_indicators, MacdConfig};

    fn full_line(values: &[f64]) -> IndicatorLine {
        IndicatorLine::new(values.len(), 0, values.to_vec())
    }

    fn assert_well_formed(signals: &SignalSet) {
        for list in [&signals.buys, &signals.sells] {
            assert!(list.windows(2).all(|w| w[0] < w[1]));
            assert!(list.iter().all(|&i| i >= 1));
        }
        for buy in &signals.buys {
            assert!(!signals.sells.contains(buy));
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Crossover::classify((0.0, 1.0), (2.0, 1.0)), Crossover::Bullish);
        assert_eq!(Crossover::classify((2.0, 1.0), (0.0, 1.0)), Crossover::Bearish);
        assert_eq!(Crossover::classify((2.0, 1.0), (3.0, 1.0)), Crossover::Hold);
        assert_eq!(Crossover::classify((0.0, 1.0), (1.0, 1.0)), Crossover::Hold);
    }

    #[test]
    fn test_tie_then_move_counts() {
        // Exact tie at the previous point
        assert_eq!(Crossover::classify((1.0, 1.0), (1.5, 1.0)), Crossover::Bullish);
        assert_eq!(Crossover::classify((1.0, 1.0), (0.5, 1.0)), Crossover::Bearish);
    }

    #[test]
    fn test_upward_cross_at_k() {
        let k = 6;
        let macd: Vec<f64> = (0..12).map(|i| i as f64 - k as f64 + 0.5).collect();
        let signal = vec![0.0; 12];

        let signals = generate_signals(&full_line(&macd), &full_line(&signal)).unwrap();

        assert_eq!(signals.buys, vec![k]);
        assert!(signals.sells.is_empty());
    }

    #[test]
    fn test_downward_cross() {
        let macd = [3.0, 2.0, 1.0, -1.0, -2.0];
        let signal = [0.0; 5];

        let signals = scan_crossovers(&macd, &signal, 0).unwrap();
        assert!(signals.buys.is_empty());
        assert_eq!(signals.sells, vec![3]);
    }

    #[test]
    fn test_offset_applied() {
        let macd = [-1.0, 1.0, -1.0];
        let signal = [0.0; 3];

        let signals = scan_crossovers(&macd, &signal, 10).unwrap();
        assert_eq!(signals.buys, vec![11]);
        assert_eq!(signals.sells, vec![12]);
    }

    #[test]
    fn test_warmup_region_skipped() {
        // Signal defined from 3, macd from 2; index 3 has no predecessor pair
        let macd = IndicatorLine::new(7, 2, vec![-5.0, 1.0, -1.0, 1.0, 1.0]);
        let signal = IndicatorLine::new(7, 3, vec![0.0, 0.0, 0.0, 0.0]);

        let signals = generate_signals(&macd, &signal).unwrap();
        assert_eq!(signals.sells, vec![4]);
        assert_eq!(signals.buys, vec![5]);
    }

    #[test]
    fn test_length_mismatch() {
        let err = generate_signals(&full_line(&[1.0, 2.0]), &full_line(&[1.0])).unwrap_err();
        assert_eq!(err, SignalError::LengthMismatch { macd: 2, signal: 1 });
        assert!(scan_crossovers(&[1.0], &[], 0).is_err());
    }

    #[test]
    fn test_short_series_no_signals() {
        let config = MacdConfig::with_windows(3, 5, 2);
        let indicators = compute_indicators(&[10.0, 11.0, 12.0, 13.0], &config).unwrap();

        let signals = signals_for(&indicators).unwrap();
        assert!(signals.buys.is_empty());
        assert!(signals.sells.is_empty());
    }

    #[test]
    fn test_oscillating_prices() {
        let prices = [
            10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 12.0, 8.0, 11.0, 9.0,
            13.0, 7.0, 14.0, 6.0, 15.0, 5.0, 16.0, 4.0, 17.0, 3.0, 18.0, 2.0, 19.0, 1.0, 20.0, 0.5,
        ];
        let config = MacdConfig::with_windows(3, 5, 2);
        let indicators = compute_indicators(&prices, &config).unwrap();
        let signals = signals_for(&indicators).unwrap();

        assert_well_formed(&signals);
        // The flat prefix stays silent; the first cross is the jump at 10
        assert_eq!(signals.buys, vec![10, 12, 14, 16, 18, 20, 22, 24, 26, 28]);
        assert_eq!(signals.sells, vec![11, 13, 15, 17, 19, 21, 23, 25, 27, 29]);
    }

    #[test]
    fn test_constant_prices_no_signals() {
        for prices in [vec![10.0; 30], vec![0.1; 80]] {
            let indicators = compute_indicators(&prices, &MacdConfig::with_windows(3, 5, 2)).unwrap();
            let signals = signals_for(&indicators).unwrap();
            assert!(signals.is_empty());
        }
    }

    #[test]
    fn test_signals_well_formed_on_noise() {
        let prices: Vec<f64> = (0..300)
            .map(|i| 100.0 + (i as f64 * 0.37).sin() * 4.0 + (i as f64 * 1.3).cos() * 2.0)
            .collect();
        let indicators = compute_indicators(&prices, &MacdConfig::default()).unwrap();
        let signals = signals_for(&indicators).unwrap();

        assert!(!signals.is_empty());
        assert_well_formed(&signals);
    }
}
