//! Normalization of raw provider tables into canonical [`BarSeries`].
//!
//! The preprocessor is the single place where vendor output is validated
//! and gap-filled:
//!
//! - the canonical five columns (open, high, low, close, volume) must be
//!   present with one value slot per timestamp; anything else is a
//!   [`SchemaError`] rather than a cryptic downstream failure,
//! - timestamps must be unique and strictly increasing,
//! - gaps are forward-filled from the most recent preceding valid value,
//!   per column.
//!
//! Leading rows with no preceding valid value cannot be filled and keep
//! `f64::NAN` in the affected fields. That carried-forward semantics is
//! deliberate: the gap stays visible instead of being invented, and return
//! derivation downstream refuses NAN closes.

use thiserror::Error;
use tracing::debug;

use crate::models::bar::Bar;
use crate::models::bar_series::BarSeries;
use crate::models::raw_table::{CANONICAL_COLUMNS, RawBarTable};

/// The raw table does not match the canonical bar schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required column is absent from the table.
    #[error("Required column {name:?} is missing")]
    MissingColumn { name: &'static str },

    /// A column's length disagrees with the timestamp count.
    #[error("Column {name:?} has {actual} values for {expected} timestamps")]
    ColumnLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Two rows share a timestamp.
    #[error("Duplicate timestamp at row {row}")]
    DuplicateTimestamp { row: usize },

    /// Timestamps are not in strictly increasing order.
    #[error("Timestamps out of order at row {row}")]
    UnorderedTimestamps { row: usize },
}

/// Normalizes a raw provider table into a canonical [`BarSeries`].
///
/// Restricts the table to the canonical five columns (vendor extras are
/// dropped), validates ordering, and forward-fills gaps. Idempotent on
/// gap-free input.
pub fn preprocess(table: RawBarTable) -> Result<BarSeries, SchemaError> {
    use std::cmp::Ordering;

    let rows = table.len();

    for row in 1..rows {
        match table.timestamps[row - 1].cmp(&table.timestamps[row]) {
            Ordering::Less => {}
            Ordering::Equal => return Err(SchemaError::DuplicateTimestamp { row }),
            Ordering::Greater => return Err(SchemaError::UnorderedTimestamps { row }),
        }
    }

    let mut filled: Vec<Vec<f64>> = Vec::with_capacity(CANONICAL_COLUMNS.len());
    for name in CANONICAL_COLUMNS {
        let values = table
            .column(name)
            .ok_or(SchemaError::MissingColumn { name })?;
        if values.len() != rows {
            return Err(SchemaError::ColumnLength {
                name,
                expected: rows,
                actual: values.len(),
            });
        }
        filled.push(forward_fill(values));
    }

    let bars = (0..rows)
        .map(|row| Bar {
            timestamp: table.timestamps[row],
            open: filled[0][row],
            high: filled[1][row],
            low: filled[2][row],
            close: filled[3][row],
            volume: filled[4][row],
        })
        .collect();

    debug!(symbol = %table.symbol, rows, "normalized raw table");

    Ok(BarSeries {
        symbol: table.symbol,
        timeframe: table.timeframe,
        bars,
    })
}

/// Carries the most recent preceding valid value into each gap.
///
/// Leading gaps have nothing to carry and become `f64::NAN`.
fn forward_fill(values: &[Option<f64>]) -> Vec<f64> {
    let mut last_valid = f64::NAN;
    values
        .iter()
        .map(|v| {
            if let Some(value) = v {
                last_valid = *value;
            }
            last_valid
        })
        .collect()
}
