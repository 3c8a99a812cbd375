//! Price data types.

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// A single observation of the traded asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Date label as it appeared in the source; treated as opaque
    pub date: String,
    /// Observed price, always positive
    pub price: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(date: impl Into<String>, price: f64) -> Self {
        Self {
            date: date.into(),
            price,
        }
    }
}

/// Chronologically ordered, read-only price history of one asset.
///
/// Index 0 is the oldest point. The order given at construction is kept
/// as-is; the series never re-sorts its points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Series name (usually the source file stem)
    pub name: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series, rejecting non-positive or non-finite prices.
    pub fn new(name: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, DataError> {
        if let Some((row, point)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.price.is_finite() && p.price > 0.0))
        {
            return Err(DataError::InvalidPrice {
                row,
                price: point.price,
            });
        }

        Ok(Self {
            name: name.into(),
            points,
        })
    }

    /// Build a series from bare prices, labelling each point with its index.
    pub fn from_prices(name: impl Into<String>, prices: &[f64]) -> Result<Self, DataError> {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(i.to_string(), price))
            .collect();
        Self::new(name, points)
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get all points as a slice.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Get a point by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    /// Get the first point.
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Get the last point.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Extract prices as a vector.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Extract date labels as a vector.
    pub fn dates(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.date.as_str()).collect()
    }

    /// Get an iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_keeps_order() {
        let series = PriceSeries::new(
            "btc",
            vec![
                PricePoint::new("2021-01-03", 3.0),
                PricePoint::new("2021-01-01", 1.0),
                PricePoint::new("2021-01-02", 2.0),
            ],
        )
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.prices(), vec![3.0, 1.0, 2.0]);
        assert_eq!(series.dates(), vec!["2021-01-03", "2021-01-01", "2021-01-02"]);
        assert_eq!(series.first().unwrap().price, 3.0);
        assert_eq!(series.last().unwrap().date, "2021-01-02");
    }

    #[test]
    fn test_series_rejects_invalid_prices() {
        let err = PriceSeries::from_prices("x", &[1.0, 0.0, 2.0]).unwrap_err();
        assert!(matches!(err, DataError::InvalidPrice { row: 1, .. }));

        assert!(PriceSeries::from_prices("x", &[1.0, -3.0]).is_err());
        assert!(PriceSeries::from_prices("x", &[f64::NAN]).is_err());
        assert!(PriceSeries::from_prices("x", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_from_prices_labels() {
        let series = PriceSeries::from_prices("x", &[5.0, 6.0]).unwrap();
        assert_eq!(series.get(1).unwrap().date, "1");
        assert!(series.get(2).is_none());
    }
}
