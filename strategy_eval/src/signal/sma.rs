//! Simple moving average over a trailing window.

/// Computes the simple moving average of `values` over a trailing window of
/// `window` periods, inclusive of the current period.
///
/// The output is aligned to the input: position `t` holds the mean of
/// `values[t + 1 - window ..= t]`. Positions before the window has enough
/// history are `None`, as is any position whose window contains a
/// non-finite value (e.g. a leading unfilled close).
///
/// # Panics
///
/// Panics if `window` is zero; callers validate window lengths via
/// [`CrossoverParams`](crate::config::CrossoverParams) before reaching this.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    assert!(window > 0, "window must be greater than zero");

    values
        .iter()
        .enumerate()
        .map(|(t, _)| {
            if t + 1 < window {
                return None;
            }
            let slice = &values[t + 1 - window..=t];
            if slice.iter().any(|v| !v.is_finite()) {
                return None;
            }
            Some(slice.iter().sum::<f64>() / window as f64)
        })
        .collect()
}
