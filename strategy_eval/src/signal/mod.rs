//! Moving-average crossover signal generation.

pub mod crossover;
pub mod sma;

pub use crossover::{Signal, SignalPoint, crossover_signals};
pub use sma::rolling_mean;
