//! CSV price history loading.

mod csv_source;

pub use csv_source::{CsvPriceSource, PriceField};

use macd_core::error::DataError;
use macd_core::types::PriceSeries;
use std::path::Path;

/// Load a price series from a CSV file, named after the file stem.
pub fn load_csv(path: impl AsRef<Path>, field: PriceField) -> Result<PriceSeries, DataError> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    CsvPriceSource::new(path)?.load(name, field)
}
