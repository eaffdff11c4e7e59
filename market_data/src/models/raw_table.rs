//! Provider-output bar table prior to normalization.
//!
//! Vendors return columnar data with holes: halted sessions, thin books, or
//! API quirks leave individual fields null. [`RawBarTable`] preserves that
//! shape (parallel arrays keyed by column name) so the preprocessor can make
//! the gap-filling decisions in one place instead of inside each provider.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::models::timeframe::TimeFrame;

/// The canonical column set retained after preprocessing, in output order.
pub const CANONICAL_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// A raw, possibly gappy bar table for one symbol.
///
/// Columns are keyed by lowercase name and kept in insertion order. A
/// provider may include extra vendor columns (e.g. "adjclose"); the
/// preprocessor drops anything outside [`CANONICAL_COLUMNS`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawBarTable {
    /// The symbol this table represents.
    pub symbol: String,
    /// The interval of each row.
    pub timeframe: TimeFrame,
    /// Row timestamps (UTC), in the order the vendor returned them.
    pub timestamps: Vec<DateTime<Utc>>,
    /// Column name -> per-row values; `None` marks a gap.
    pub columns: IndexMap<String, Vec<Option<f64>>>,
}

impl RawBarTable {
    pub fn new(symbol: impl Into<String>, timeframe: TimeFrame) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            timestamps: Vec::new(),
            columns: IndexMap::new(),
        }
    }

    /// Number of rows (timestamps).
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Adds or replaces a column. The name is normalized to lowercase.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        self.columns.insert(name.into().to_lowercase(), values);
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }
}
