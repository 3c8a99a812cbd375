//! CSV data source.

use csv::ReaderBuilder;
use macd_core::error::DataError;
use macd_core::types::{PricePoint, PriceSeries};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which price column feeds the indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    /// Opening price
    #[default]
    Open,
    /// Closing price
    Close,
}

/// CSV record format.
///
/// Accepts both Polish (`Data`, `Otwarcie`, `Zamkniecie`) and English
/// headers. Other columns are ignored.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Data", alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Otwarcie", alias = "Open", alias = "open")]
    open: Option<f64>,
    #[serde(alias = "Zamkniecie", alias = "Close", alias = "close", default)]
    close: Option<f64>,
}

/// CSV data source for a single price history.
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::NotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every row, keeping file order.
    pub fn load(&self, name: impl Into<String>, field: PriceField) -> Result<PriceSeries, DataError> {
        let file = std::fs::File::open(&self.path)
            .map_err(|e| DataError::NotFound(format!("{}: {}", self.path.display(), e)))?;
        let series = read_prices(file, name, field)?;
        if series.is_empty() {
            return Err(DataError::Empty(self.path.display().to_string()));
        }
        debug!(path = %self.path.display(), rows = series.len(), "Loaded price history");
        Ok(series)
    }
}

/// Parse CSV content from any reader.
fn read_prices<R: Read>(
    reader: R,
    name: impl Into<String>,
    field: PriceField,
) -> Result<PriceSeries, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();

    for (row, result) in reader.deserialize().enumerate() {
        let record: CsvRecord = result.map_err(|e| DataError::Parse(e.to_string()))?;

        let price = match field {
            PriceField::Open => record.open,
            PriceField::Close => record.close,
        }
        .ok_or_else(|| DataError::Parse(format!("Missing {:?} price in row {}", field, row)))?;

        if !(price.is_finite() && price > 0.0) {
            return Err(DataError::InvalidPrice { row, price });
        }

        points.push(PricePoint::new(record.date, price));
    }

    PriceSeries::new(name, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLISH: &str = "Data,Otwarcie,Najwyzszy,Najnizszy,Zamkniecie,Wolumen\n\
        2021-01-01,29000.5,29600,28800,29300,1200\n\
        2021-01-02,29300,33000,29000,32100,1500\n\
        2021-01-03,32100,34700,31900,33000,1800\n";

    #[test]
    fn test_polish_headers() {
        let series = read_prices(POLISH.as_bytes(), "btc", PriceField::Open).unwrap();

        assert_eq!(series.name, "btc");
        assert_eq!(series.len(), 3);
        assert_eq!(series.prices(), vec![29000.5, 29300.0, 32100.0]);
        assert_eq!(series.first().unwrap().date, "2021-01-01");
    }

    #[test]
    fn test_close_field() {
        let series = read_prices(POLISH.as_bytes(), "btc", PriceField::Close).unwrap();
        assert_eq!(series.prices(), vec![29300.0, 32100.0, 33000.0]);
    }

    #[test]
    fn test_english_headers_keep_order() {
        let data = "Date,Open,High,Low,Close\n2024-01-03,3,3,3,3\n2024-01-01,1,1,1,1\n";
        let series = read_prices(data.as_bytes(), "x", PriceField::Open).unwrap();

        // File order is preserved, never re-sorted
        assert_eq!(series.dates(), vec!["2024-01-03", "2024-01-01"]);
    }

    #[test]
    fn test_missing_close_column() {
        let data = "Date,Open\n2024-01-01,1.5\n";
        assert!(read_prices(data.as_bytes(), "x", PriceField::Open).is_ok());
        assert!(matches!(
            read_prices(data.as_bytes(), "x", PriceField::Close),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_rows() {
        let zero = "Date,Open\n2024-01-01,1.5\n2024-01-02,0\n";
        assert!(matches!(
            read_prices(zero.as_bytes(), "x", PriceField::Open),
            Err(DataError::InvalidPrice { row: 1, .. })
        ));

        let garbage = "Date,Open\n2024-01-01,abc\n";
        assert!(matches!(
            read_prices(garbage.as_bytes(), "x", PriceField::Open),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CsvPriceSource::new("/definitely/not/here.csv"),
            Err(DataError::NotFound(_))
        ));
    }
}
