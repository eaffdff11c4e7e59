use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeFrameError {
    #[error("Invalid amount for {unit:?}: {message}")]
    InvalidAmount {
        unit: TimeFrameUnit,
        message: String,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

/// Unit component of a bar interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

/// Universal representation of a bar interval (amount and unit).
///
/// Construction validates the combinations that data vendors commonly
/// accept; individual providers may restrict this further (for example
/// Alpha Vantage's daily endpoint only serves `1 Day`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub fn new(amount: u32, unit: TimeFrameUnit) -> Result<Self, TimeFrameError> {
        Self::validate(amount, unit)?;
        Ok(Self { amount, unit })
    }

    /// One-day bars, the default granularity for backtests.
    pub fn day() -> Self {
        Self {
            amount: 1,
            unit: TimeFrameUnit::Day,
        }
    }

    fn validate(amount: u32, unit: TimeFrameUnit) -> Result<(), TimeFrameError> {
        match unit {
            TimeFrameUnit::Minute if !(1..=59).contains(&amount) => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Minute units can only be used with amounts between 1-59.".into(),
                })
            }
            TimeFrameUnit::Hour if !(1..=23).contains(&amount) => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Hour units can only be used with amounts 1-23.".into(),
                })
            }
            TimeFrameUnit::Day | TimeFrameUnit::Week if amount != 1 => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Day and Week units can only be used with amount 1.".into(),
                })
            }
            TimeFrameUnit::Month if ![1, 3].contains(&amount) => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Month units can only be used with amount 1 or 3.".into(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Parses a short unit spelling ("m", "d", "wk", ...) into a `TimeFrame`.
pub fn parse_timeframe(amount: u32, unit: &str) -> Result<TimeFrame, TimeFrameError> {
    match unit.trim().to_lowercase().as_str() {
        "m" | "min" | "minute" => TimeFrame::new(amount, TimeFrameUnit::Minute),
        "h" | "hr" | "hour" => TimeFrame::new(amount, TimeFrameUnit::Hour),
        "d" | "day" => TimeFrame::new(amount, TimeFrameUnit::Day),
        "w" | "wk" | "week" => TimeFrame::new(amount, TimeFrameUnit::Week),
        "mo" | "month" => TimeFrame::new(amount, TimeFrameUnit::Month),
        other => Err(TimeFrameError::InvalidInput {
            message: format!("Invalid timeframe unit: {other}"),
        }),
    }
}
