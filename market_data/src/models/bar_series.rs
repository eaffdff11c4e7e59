//! A collection of time-series bars for a specific symbol and timeframe.

use chrono::{DateTime, Utc};

use crate::models::{bar::Bar, timeframe::TimeFrame};

/// Represents a complete set of normalized time-series data for one symbol.
///
/// This struct groups a vector of [`Bar`]s with their corresponding symbol
/// and [`TimeFrame`], making the data set self-describing. The preprocessor
/// guarantees strictly increasing, unique timestamps; after construction the
/// series is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// The time interval for each bar in the series.
    pub timeframe: TimeFrame,
    /// The collection of OHLCV bars, in ascending timestamp order.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    /// Number of bars in the series.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in timestamp order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Timestamps in series order.
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// Drops leading bars that still carry unfilled (NAN) fields.
    ///
    /// Forward-filling cannot fill rows with no preceding valid value;
    /// callers that feed the series into return derivation drop them first.
    pub fn trim_leading_gaps(mut self) -> Self {
        let skip = self
            .bars
            .iter()
            .position(Bar::is_complete)
            .unwrap_or(self.bars.len());
        self.bars.drain(..skip);
        self
    }

    /// True when timestamps are unique and strictly increasing.
    ///
    /// The preprocessor enforces this; the helper exists so downstream code
    /// can assert the invariant on series built by hand (tests, fixtures).
    pub fn is_ordered(&self) -> bool {
        self.bars
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp)
    }
}
