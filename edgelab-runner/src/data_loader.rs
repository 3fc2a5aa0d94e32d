//! CSV ingestion — materialize a validated `PriceSeries` from disk.
//!
//! Data quality is settled at this boundary: non-numeric price fields, bad
//! dates, duplicate or out-of-order rows are rejected here, before the core
//! sees a single bar. Expected header: `date,open,high,low,close`; extra
//! columns are ignored.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use edgelab_core::domain::{Bar, PriceSeries, SeriesError};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: csv::Error,
    },

    #[error("row {row}: malformed record: {source}")]
    Record { row: usize, source: csv::Error },

    #[error("row {row}: invalid date '{value}', expected YYYY-MM-DD")]
    Date { row: usize, value: String },

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// One CSV row; prices deserialize straight to f64 so a non-numeric field
/// is a typed error, never a silently coerced value.
#[derive(Debug, Deserialize)]
struct CsvBar {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

/// Load a price series from a CSV file.
pub fn load_csv(path: &Path, symbol: &str) -> Result<PriceSeries, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| DataError::Open {
            path: path.display().to_string(),
            source,
        })?;

    let mut bars = Vec::new();
    for (i, record) in reader.deserialize::<CsvBar>().enumerate() {
        let row = i + 2; // header is line 1
        let record = record.map_err(|source| DataError::Record { row, source })?;
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").map_err(|_| {
            DataError::Date {
                row,
                value: record.date.clone(),
            }
        })?;
        bars.push(Bar {
            date,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
        });
    }

    Ok(PriceSeries::new(symbol, bars)?)
}
