//! Historical market-data retrieval and normalization.
//!
//! The crate is organized around three seams:
//!
//! - [`providers::DataProvider`] fetches raw, possibly gappy bar tables from
//!   a market-data vendor (Yahoo chart API, Alpha Vantage).
//! - [`preprocess::preprocess`] normalizes a raw table into the canonical
//!   OHLCV [`models::bar_series::BarSeries`].
//! - [`io::DataSink`] writes normalized series to a destination (CSV file).
//!
//! Everything downstream of preprocessing treats the series as read-only.

pub mod errors;
pub mod io;
pub mod models;
pub mod preprocess;
pub mod providers;
