//! Trading signal types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a crossover signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// MACD crossed above its signal line
    Buy,
    /// MACD crossed below its signal line
    Sell,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Buy => f.pad("Buy"),
            SignalKind::Sell => f.pad("Sell"),
        }
    }
}

/// Buy and sell indices into a price series.
///
/// Both lists are strictly increasing; `push` callers must add indices in
/// ascending order to keep it that way. A `SignalSet` produced by the
/// crossover scan never shares an index between the two lists and never
/// contains index 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    /// Indices of upward crossovers
    pub buys: Vec<usize>,
    /// Indices of downward crossovers
    pub sells: Vec<usize>,
}

impl SignalSet {
    /// Create an empty signal set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from explicit index lists, sorted and deduplicated.
    pub fn from_indices(mut buys: Vec<usize>, mut sells: Vec<usize>) -> Self {
        for list in [&mut buys, &mut sells] {
            list.sort_unstable();
            list.dedup();
        }
        Self { buys, sells }
    }

    /// Record a signal at `index`.
    ///
    /// Callers push in scan order, which keeps both lists sorted.
    pub fn push(&mut self, kind: SignalKind, index: usize) {
        match kind {
            SignalKind::Buy => self.buys.push(index),
            SignalKind::Sell => self.sells.push(index),
        }
    }

    /// Check for a buy signal at `index`.
    pub fn is_buy(&self, index: usize) -> bool {
        self.buys.binary_search(&index).is_ok()
    }

    /// Check for a sell signal at `index`.
    pub fn is_sell(&self, index: usize) -> bool {
        self.sells.binary_search(&index).is_ok()
    }

    /// Total number of signals.
    pub fn len(&self) -> usize {
        self.buys.len() + self.sells.len()
    }

    /// Check if there are no signals.
    pub fn is_empty(&self) -> bool {
        self.buys.is_empty() && self.sells.is_empty()
    }

    /// Largest index referenced by either list.
    pub fn max_index(&self) -> Option<usize> {
        self.buys.last().copied().max(self.sells.last().copied())
    }

    /// All signals merged in index order; buys sort before sells on ties.
    pub fn events(&self) -> Vec<(usize, SignalKind)> {
        let mut events: Vec<(usize, SignalKind)> = self
            .buys
            .iter()
            .map(|&i| (i, SignalKind::Buy))
            .chain(self.sells.iter().map(|&i| (i, SignalKind::Sell)))
            .collect();
        events.sort_by_key(|&(i, kind)| (i, kind == SignalKind::Sell));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let mut set = SignalSet::new();
        set.push(SignalKind::Sell, 3);
        set.push(SignalKind::Buy, 5);
        set.push(SignalKind::Sell, 9);

        assert!(set.is_buy(5));
        assert!(!set.is_buy(3));
        assert!(set.is_sell(9));
        assert_eq!(set.len(), 3);
        assert_eq!(set.max_index(), Some(9));
    }

    #[test]
    fn test_events_in_order() {
        let set = SignalSet::from_indices(vec![2, 7], vec![4, 7, 10]);
        assert_eq!(
            set.events(),
            vec![
                (2, SignalKind::Buy),
                (4, SignalKind::Sell),
                (7, SignalKind::Buy),
                (7, SignalKind::Sell),
                (10, SignalKind::Sell),
            ]
        );
    }

    #[test]
    fn test_from_unsorted_indices() {
        let set = SignalSet::from_indices(vec![9, 2, 5, 2], vec![8, 3]);

        assert_eq!(set.buys, vec![2, 5, 9]);
        assert_eq!(set.sells, vec![3, 8]);
        assert!(set.is_buy(9));
        assert!(set.is_buy(2));
        assert!(set.is_sell(3));
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_empty_set() {
        let set = SignalSet::default();
        assert!(set.is_empty());
        assert!(set.max_index().is_none());
        assert!(set.events().is_empty());
    }
}
