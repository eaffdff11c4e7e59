//! The backtest-runner seam.
//!
//! The metrics engine only needs a return trace; where that trace comes
//! from is behind [`StrategyRunner`]. The bundled [`CrossoverBacktester`]
//! is a minimal signal-following simulation; an external execution engine
//! plugs in behind the same trait without touching the numeric core.

use market_data::models::bar_series::BarSeries;
use tracing::debug;

use crate::config::CrossoverParams;
use crate::errors::EvalError;
use crate::metrics::{ReturnSeries, returns_from_closes};
use crate::signal::{Signal, crossover_signals};

/// Produces a strategy return trace for a crossover specification over a
/// bar series.
pub trait StrategyRunner {
    fn run(&self, params: &CrossoverParams, series: &BarSeries)
    -> Result<ReturnSeries, EvalError>;
}

/// Reference runner: hold the market return for periods entered `Long`.
///
/// The position for period t is the signal at t-1 (a signal can only be
/// acted on after its bar closes). `Flat` and `Insufficient` periods earn
/// zero. No transaction costs, no sizing.
#[derive(Debug, Default)]
pub struct CrossoverBacktester;

impl StrategyRunner for CrossoverBacktester {
    fn run(
        &self,
        params: &CrossoverParams,
        series: &BarSeries,
    ) -> Result<ReturnSeries, EvalError> {
        let signals = crossover_signals(series, params)?;
        let market_returns = returns_from_closes(series)?;

        // market_returns[i] spans bars i -> i+1, so it pairs with the
        // signal at bar i.
        let strategy_returns: ReturnSeries = market_returns
            .iter()
            .zip(&signals)
            .map(|(&r, point)| if point.signal == Signal::Long { r } else { 0.0 })
            .collect();

        let periods_in_market = strategy_returns.iter().filter(|&&r| r != 0.0).count();
        debug!(
            symbol = %series.symbol,
            periods = strategy_returns.len(),
            periods_in_market,
            "ran crossover backtest"
        );

        Ok(strategy_returns)
    }
}

/// Benchmark runner: hold the market for every period.
///
/// Ignores the crossover windows entirely; the trace is the raw
/// close-to-close return series. Run it next to a signal-driven runner to
/// see what the signal actually bought over just staying invested.
#[derive(Debug, Default)]
pub struct BuyAndHold;

impl StrategyRunner for BuyAndHold {
    fn run(
        &self,
        _params: &CrossoverParams,
        series: &BarSeries,
    ) -> Result<ReturnSeries, EvalError> {
        returns_from_closes(series)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use market_data::models::{bar::Bar, timeframe::TimeFrame};

    use super::*;

    fn series_from_closes(closes: &[f64]) -> BarSeries {
        BarSeries {
            symbol: "TEST".into(),
            timeframe: TimeFrame::day(),
            bars: closes
                .iter()
                .enumerate()
                .map(|(i, &c)| Bar {
                    timestamp: Utc.with_ymd_and_hms(2024, 1, 1 + i as u32, 0, 0, 0).unwrap(),
                    open: c,
                    high: c,
                    low: c,
                    close: c,
                    volume: 1.0,
                })
                .collect(),
        }
    }

    #[test]
    fn warmup_periods_earn_zero() {
        let series = series_from_closes(&[1., 2., 3., 4., 5., 6., 7., 8.]);
        let params = CrossoverParams::new(2, 5).unwrap();
        let returns = CrossoverBacktester.run(&params, &series).unwrap();

        assert_eq!(returns.len(), 7);
        // Signals at bars 0..=3 are Insufficient; returns 0..=3 span bars
        // 0->1 .. 3->4 and must all be zero.
        assert!(returns[..4].iter().all(|&r| r == 0.0));
        // Bar 4 is the first Long signal; return 4 spans bars 4 -> 5.
        assert!((returns[4] - (6.0 / 5.0 - 1.0)).abs() < 1e-12);
        assert!(returns[4..].iter().all(|&r| r > 0.0));
    }

    #[test]
    fn flat_signals_stay_out_of_the_market() {
        let series = series_from_closes(&[10., 9., 8., 7., 6., 5., 4., 3.]);
        let params = CrossoverParams::new(2, 5).unwrap();
        let returns = CrossoverBacktester.run(&params, &series).unwrap();
        // A falling tape never goes Long, so the strategy never takes a
        // market return.
        assert!(returns.iter().all(|&r| r == 0.0));
    }

    #[test]
    fn buy_and_hold_takes_every_market_return() {
        let series = series_from_closes(&[1., 2., 3., 4., 5., 6., 7., 8.]);
        let params = CrossoverParams::new(2, 5).unwrap();

        let benchmark = BuyAndHold.run(&params, &series).unwrap();
        let crossover = CrossoverBacktester.run(&params, &series).unwrap();
        assert_eq!(benchmark.len(), crossover.len());

        // The benchmark is in the market from the first period; the
        // crossover runner sits out its warmup, then matches it on a
        // rising tape.
        assert!(benchmark[..4].iter().all(|&r| r > 0.0));
        assert!(crossover[..4].iter().all(|&r| r == 0.0));
        assert_eq!(&benchmark[4..], &crossover[4..]);
    }

    #[test]
    fn buy_and_hold_rides_a_falling_tape_down() {
        let series = series_from_closes(&[10., 9., 8., 7., 6., 5., 4., 3.]);
        let params = CrossoverParams::new(2, 5).unwrap();

        let benchmark = BuyAndHold.run(&params, &series).unwrap();
        assert!(benchmark.iter().all(|&r| r < 0.0));
        // The crossover runner never goes Long here (see
        // flat_signals_stay_out_of_the_market), so the benchmark is the
        // strictly worse trace.
        let crossover = CrossoverBacktester.run(&params, &series).unwrap();
        assert!(benchmark.iter().zip(&crossover).all(|(&b, &c)| b < c));
    }

    #[test]
    fn propagates_insufficient_history() {
        let series = series_from_closes(&[1., 2., 3.]);
        let params = CrossoverParams::new(2, 5).unwrap();
        assert_eq!(
            CrossoverBacktester.run(&params, &series),
            Err(EvalError::InsufficientData {
                needed: 5,
                available: 3
            })
        );
    }
}
