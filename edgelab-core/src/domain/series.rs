//! PriceSeries — validated, immutable bar history for one instrument.
//!
//! Data quality is settled at construction: out-of-order rows, duplicate
//! dates, and malformed bars are rejected here, so every downstream
//! computation can assume clean numeric input and never re-validates per
//! field. Calendar gaps are tolerated and never auto-filled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Bar;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("bar {index} ({date}) is out of order: expected a date after {prev}")]
    OutOfOrder {
        index: usize,
        date: NaiveDate,
        prev: NaiveDate,
    },

    #[error("bar {index} duplicates date {date}")]
    DuplicateDate { index: usize, date: NaiveDate },

    #[error("bar {index} has a non-finite or inconsistent OHLC field")]
    MalformedBar { index: usize },
}

/// Ordered bar history for a single instrument.
///
/// Immutable once constructed; all indicator and event derivations are pure
/// functions over the bar slice producing parallel series of the same
/// length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Validates ordering and data quality once.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            if !bar.is_sane() {
                return Err(SeriesError::MalformedBar { index });
            }
            if index > 0 {
                let prev = bars[index - 1].date;
                if bar.date == prev {
                    return Err(SeriesError::DuplicateDate {
                        index,
                        date: bar.date,
                    });
                }
                if bar.date < prev {
                    return Err(SeriesError::OutOfOrder {
                        index,
                        date: bar.date,
                        prev,
                    });
                }
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
