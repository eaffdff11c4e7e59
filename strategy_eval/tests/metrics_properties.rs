//! Property tests for the metrics engine.

use proptest::prelude::*;
use strategy_eval::config::MetricsParams;
use strategy_eval::metrics::{max_drawdown, sharpe_ratio};

proptest! {
    /// For a constant return series with r > -1: drawdown is zero when
    /// r >= 0, otherwise exactly (1 + r)^(n-1) - 1 (peak is the first
    /// cumulative value, trough the last).
    #[test]
    fn constant_returns_have_closed_form_drawdown(
        r in -0.99f64..1.0,
        n in 1usize..40,
    ) {
        let dd = max_drawdown(&vec![r; n]).unwrap();
        if r >= 0.0 {
            prop_assert_eq!(dd, 0.0);
        } else {
            let expected = (1.0 + r).powi(n as i32 - 1) - 1.0;
            prop_assert!(dd < 0.0);
            prop_assert!((dd - expected).abs() < 1e-9);
        }
    }

    /// Drawdown never leaves (-1, 0] for sane return series.
    #[test]
    fn drawdown_is_bounded(
        returns in prop::collection::vec(-0.5f64..0.5, 1..60),
    ) {
        let dd = max_drawdown(&returns).unwrap();
        prop_assert!(dd <= 0.0);
        prop_assert!(dd > -1.0);
    }

    /// Sharpe is invariant under a common positive scaling of returns and
    /// the risk-free rate.
    #[test]
    fn sharpe_is_scale_invariant_with_matching_rate(
        returns in prop::collection::vec(-0.1f64..0.1, 2..40),
        scale in 0.1f64..10.0,
    ) {
        let base = MetricsParams { risk_free_rate: 0.01 };
        let Ok(sharpe) = sharpe_ratio(&returns, &base) else {
            // Zero-variance draws are legitimately undefined; skip them.
            return Ok(());
        };

        let scaled_returns: Vec<f64> = returns.iter().map(|r| r * scale).collect();
        let scaled = MetricsParams { risk_free_rate: 0.01 * scale };
        let scaled_sharpe = sharpe_ratio(&scaled_returns, &scaled).unwrap();
        prop_assert!((sharpe - scaled_sharpe).abs() < 1e-9);
    }
}
