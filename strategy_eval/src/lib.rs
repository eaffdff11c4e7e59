//! The numeric core of the backtesting toolkit.
//!
//! Given a normalized [`BarSeries`](market_data::models::bar_series::BarSeries):
//!
//! - [`signal`] computes the two-SMA crossover signal,
//! - [`runner`] turns signals into a strategy return trace behind the
//!   [`runner::StrategyRunner`] seam,
//! - [`metrics`] evaluates a return trace (Sharpe ratio, maximum drawdown).
//!
//! Everything here is a pure function over in-memory series; no network or
//! simulation dependency is needed to test it.

pub mod config;
pub mod errors;
pub mod metrics;
pub mod runner;
pub mod signal;
