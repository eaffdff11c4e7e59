//! Performance metrics over a return series.
//!
//! Two statistics: Sharpe ratio (mean excess return over its sample
//! standard deviation) and maximum drawdown (largest peak-to-trough decline
//! of the cumulative return). Undefined cases are explicit errors, never a
//! silent NaN.

use market_data::models::bar_series::BarSeries;

use crate::config::MetricsParams;
use crate::errors::EvalError;

/// Period-over-period simple returns; length = bars - 1.
pub type ReturnSeries = Vec<f64>;

/// Derives simple returns from consecutive closing prices.
///
/// Requires at least two bars and positive finite closes. Leading unfilled
/// rows must be trimmed first (see `BarSeries::trim_leading_gaps`).
pub fn returns_from_closes(series: &BarSeries) -> Result<ReturnSeries, EvalError> {
    let closes = series.closes();
    if closes.len() < 2 {
        return Err(EvalError::InsufficientData {
            needed: 2,
            available: closes.len(),
        });
    }
    for (index, &value) in closes.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(EvalError::InvalidClose { index, value });
        }
    }
    Ok(closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect())
}

/// Sharpe ratio: mean excess return / sample standard deviation of excess
/// returns.
///
/// `risk_free_rate` is applied uniformly per period. Fewer than two returns
/// or a zero-variance series is an explicit error; the division is never
/// attempted on a zero denominator.
pub fn sharpe_ratio(returns: &[f64], params: &MetricsParams) -> Result<f64, EvalError> {
    if returns.len() < 2 {
        return Err(EvalError::InsufficientData {
            needed: 2,
            available: returns.len(),
        });
    }

    let excess: Vec<f64> = returns.iter().map(|r| r - params.risk_free_rate).collect();
    let mean = excess.iter().sum::<f64>() / excess.len() as f64;
    // Sample variance (ddof = 1), matching the original evaluation.
    let variance = excess.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
        / (excess.len() - 1) as f64;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        return Err(EvalError::ZeroVariance);
    }
    Ok(mean / std_dev)
}

/// Maximum drawdown of the cumulative return series.
///
/// Cumulative return at t is the product of `(1 + r_i)` for `i <= t`; the
/// drawdown at t is `(cum_t - peak_t) / peak_t` against the running peak.
/// The result is zero or negative, zero only when returns never decline
/// from a peak. A return at or below -100% is rejected before it can make
/// the cumulative value non-positive.
pub fn max_drawdown(returns: &[f64]) -> Result<f64, EvalError> {
    if returns.is_empty() {
        return Err(EvalError::InsufficientData {
            needed: 1,
            available: 0,
        });
    }

    let mut cumulative = 1.0_f64;
    let mut peak = f64::MIN;
    let mut min_drawdown = 0.0_f64;

    for (index, &r) in returns.iter().enumerate() {
        cumulative *= 1.0 + r;
        if cumulative <= 0.0 {
            return Err(EvalError::DegenerateReturn { index, value: r });
        }
        if cumulative > peak {
            peak = cumulative;
        }
        let drawdown = (cumulative - peak) / peak;
        if drawdown < min_drawdown {
            min_drawdown = drawdown;
        }
    }

    Ok(min_drawdown)
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
    fn returns_are_period_over_period() {
        let series = series_from_closes(&[100.0, 110.0, 99.0]);
        let returns = returns_from_closes(&series).unwrap();
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.1).abs() < 1e-12);
        assert!((returns[1] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn returns_reject_short_series_and_bad_closes() {
        assert_eq!(
            returns_from_closes(&series_from_closes(&[100.0])),
            Err(EvalError::InsufficientData {
                needed: 2,
                available: 1
            })
        );
        let err = returns_from_closes(&series_from_closes(&[100.0, f64::NAN])).unwrap_err();
        assert!(matches!(err, EvalError::InvalidClose { index: 1, .. }));
        let err = returns_from_closes(&series_from_closes(&[0.0, 100.0])).unwrap_err();
        assert!(matches!(err, EvalError::InvalidClose { index: 0, .. }));
    }

    #[test]
    fn sharpe_on_synthetic_series_with_known_moments() {
        // Excess returns with rf = 0.01: [0.01, -0.01, 0.01, -0.01].
        // mean = 0, so Sharpe = 0 regardless of the (nonzero) std dev.
        let returns = [0.02, 0.0, 0.02, 0.0];
        let params = MetricsParams {
            risk_free_rate: 0.01,
        };
        let sharpe = sharpe_ratio(&returns, &params).unwrap();
        assert!(sharpe.abs() < 1e-12);

        // Shifting every return up by a constant moves only the mean:
        // excess becomes [0.02, 0.0, 0.02, 0.0], mean 0.01, sample std
        // sqrt(4/3)*0.01... computed directly for the assertion.
        let returns = [0.03, 0.01, 0.03, 0.01];
        let sharpe = sharpe_ratio(&returns, &params).unwrap();
        let expected = 0.01 / (0.0001f64 * 4.0 / 3.0).sqrt();
        assert!((sharpe - expected).abs() < 1e-12);
    }

    #[test]
    fn sharpe_zero_variance_is_explicit() {
        let params = MetricsParams::default();
        assert_eq!(
            sharpe_ratio(&[0.05, 0.05, 0.05], &params),
            Err(EvalError::ZeroVariance)
        );
        assert_eq!(
            sharpe_ratio(&[0.05], &params),
            Err(EvalError::InsufficientData {
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn drawdown_of_monotone_growth_is_zero() {
        assert_eq!(max_drawdown(&[0.01, 0.02, 0.0, 0.03]).unwrap(), 0.0);
    }

    #[test]
    fn drawdown_matches_hand_computed_dip() {
        // cum: 1.1, 0.99, 1.188; peak 1.1 at the dip.
        let dd = max_drawdown(&[0.1, -0.1, 0.2]).unwrap();
        assert!((dd - (0.99 / 1.1 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn constant_negative_returns_have_closed_form_drawdown() {
        // peak is the first cumulative value (1 + r); trough the last.
        let r = -0.05_f64;
        let n = 6;
        let dd = max_drawdown(&vec![r; n]).unwrap();
        let expected = (1.0 + r).powi(n as i32 - 1) - 1.0;
        assert!((dd - expected).abs() < 1e-12);
    }

    #[test]
    fn total_loss_is_rejected() {
        let err = max_drawdown(&[0.1, -1.0]).unwrap_err();
        assert!(matches!(err, EvalError::DegenerateReturn { index: 1, .. }));
        let err = max_drawdown(&[-1.5]).unwrap_err();
        assert!(matches!(err, EvalError::DegenerateReturn { index: 0, .. }));
    }

    #[test]
    fn empty_returns_are_insufficient() {
        assert_eq!(
            max_drawdown(&[]),
            Err(EvalError::InsufficientData {
                needed: 1,
                available: 0
            })
        );
    }
}
