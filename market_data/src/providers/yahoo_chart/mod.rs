//! Yahoo Finance v8 chart API provider.
//!
//! Keyless REST vendor serving OHLCV arrays per symbol. Quote arrays may
//! contain nulls (halted sessions, stale prints); these are preserved as
//! gaps in the returned [`RawBarTable`](crate::models::raw_table::RawBarTable)
//! for the preprocessor to fill.

mod params;
mod provider;
mod response;

pub use params::YahooChartParams;
pub use provider::YahooChartProvider;
pub use response::{ChartEnvelope, ChartResult};
