use thiserror::Error;

/// Errors from signal generation and performance evaluation.
#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    /// Parameter combination is invalid (e.g. short window >= long window).
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Not enough history for the requested computation.
    #[error("Insufficient data: needed {needed} periods, have {available}")]
    InsufficientData { needed: usize, available: usize },

    /// Excess returns have no variance, so the Sharpe denominator is zero.
    #[error("Excess returns have zero variance; Sharpe ratio is undefined")]
    ZeroVariance,

    /// A close price is not a positive finite number. Leading unfilled rows
    /// must be trimmed before deriving returns.
    #[error("Close price at index {index} is not a positive finite number ({value})")]
    InvalidClose { index: usize, value: f64 },

    /// A single-period return at or below -100% makes the cumulative value
    /// non-positive and later drawdown divisions degenerate.
    #[error("Return at index {index} ({value}) drives cumulative value to zero or below")]
    DegenerateReturn { index: usize, value: f64 },
}
