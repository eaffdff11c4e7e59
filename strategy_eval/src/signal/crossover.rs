//! Two-SMA crossover signal.
//!
//! The rule is state-based: the signal at period t compares the two
//! averages at t, it does not look for the moment of crossing. A period is
//! `Long` while the short average sits above the long average, `Flat` while
//! it is at or below, and `Insufficient` until both windows have enough
//! history.

use chrono::{DateTime, Utc};
use market_data::models::bar_series::BarSeries;

use crate::config::CrossoverParams;
use crate::errors::EvalError;
use crate::signal::sma::rolling_mean;

/// Signal state for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// One of the averages is still warming up; no position is implied.
    Insufficient,
    /// Short SMA at or below long SMA.
    Flat,
    /// Short SMA above long SMA.
    Long,
}

/// A signal aligned to its bar timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalPoint {
    pub timestamp: DateTime<Utc>,
    pub signal: Signal,
}

/// Computes the crossover signal series for a bar series.
///
/// Returns one [`SignalPoint`] per input bar. Fails when the parameters are
/// invalid or the long window exceeds the available history.
pub fn crossover_signals(
    series: &BarSeries,
    params: &CrossoverParams,
) -> Result<Vec<SignalPoint>, EvalError> {
    params.validate()?;

    if series.len() < params.long_window {
        return Err(EvalError::InsufficientData {
            needed: params.long_window,
            available: series.len(),
        });
    }

    let closes = series.closes();
    let short = rolling_mean(&closes, params.short_window);
    let long = rolling_mean(&closes, params.long_window);

    let signals = series
        .bars
        .iter()
        .enumerate()
        .map(|(t, bar)| {
            let signal = match (short[t], long[t]) {
                (Some(s), Some(l)) if s > l => Signal::Long,
                (Some(_), Some(_)) => Signal::Flat,
                _ => Signal::Insufficient,
            };
            SignalPoint {
                timestamp: bar.timestamp,
                signal,
            }
        })
        .collect();

    Ok(signals)
}
