//! Canonical in-memory representation of a time-series bar (OHLCV).
//!
//! This struct is the normalized output of the preprocessor and the standard
//! input for signal and metrics computation, regardless of which vendor the
//! data came from.

use chrono::{DateTime, Utc};

/// A single time-series bar (OHLCV) for a given timestamp.
///
/// Field values are `f64`. After preprocessing, a field is `f64::NAN` only
/// for leading rows that had no preceding valid value to carry forward; see
/// [`crate::preprocess`] for the forward-fill contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// The timestamp for this bar (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the bar interval.
    pub volume: f64,
}

impl Bar {
    /// True when every retained field holds a real value (no leading gap).
    pub fn is_complete(&self) -> bool {
        !(self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan())
    }
}
