//! Warm-up aware indicator lines.

use serde::{Deserialize, Serialize};

/// An indicator sequence aligned index-for-index with a price series.
///
/// Positions before `defined_from` belong to the warm-up period and have no
/// value. Only the defined values are stored, so a line that never warms up
/// has `defined_from == len()` and an empty `values()` slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorLine {
    len: usize,
    defined_from: usize,
    values: Vec<f64>,
}

impl IndicatorLine {
    /// Create a line of aligned length `len` whose values start at `defined_from`.
    ///
    /// `values.len()` must equal `len - defined_from`; when `defined_from`
    /// is at or past `len` the values must be empty.
    pub fn new(len: usize, defined_from: usize, values: Vec<f64>) -> Self {
        let defined_from = defined_from.min(len);
        debug_assert_eq!(values.len(), len - defined_from);
        Self {
            len,
            defined_from,
            values,
        }
    }

    /// A line with no defined values at all.
    pub fn undefined(len: usize) -> Self {
        Self::new(len, len, Vec::new())
    }

    /// Aligned length (the length of the underlying price series).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the aligned length is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First index holding a value (equals `len()` if none).
    #[inline]
    pub fn defined_from(&self) -> usize {
        self.defined_from
    }

    /// Check whether any value is defined.
    pub fn is_defined(&self) -> bool {
        !self.values.is_empty()
    }

    /// Value at `index`, or `None` during warm-up or past the end.
    pub fn get(&self, index: usize) -> Option<f64> {
        index
            .checked_sub(self.defined_from)
            .and_then(|offset| self.values.get(offset).copied())
    }

    /// The defined values, starting at `defined_from()`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over every aligned position.
    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Materialize as one `Option` per aligned position.
    pub fn to_options(&self) -> Vec<Option<f64>> {
        self.iter().collect()
    }
}
