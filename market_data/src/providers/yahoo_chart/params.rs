use serde::{Deserialize, Serialize};

use crate::models::request_params::BarsRequestParams;
use crate::models::timeframe::{TimeFrame, TimeFrameUnit};
use crate::providers::ProviderError;

/// Yahoo-specific parameters for a chart request.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct YahooChartParams {
    /// Include pre/post market candles. Defaults to the API default (off).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_prepost: Option<bool>,
    /// Comma-separated event types to include (e.g. "div,split").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<String>,
}

/// Maps a universal [`TimeFrame`] to a Yahoo interval string.
///
/// Yahoo only serves a fixed set of intervals; anything else is a
/// validation error rather than a silent approximation.
pub fn interval_str(timeframe: &TimeFrame) -> Result<String, ProviderError> {
    let interval = match (timeframe.amount, timeframe.unit) {
        (a @ (1 | 2 | 5 | 15 | 30), TimeFrameUnit::Minute) => format!("{a}m"),
        (1, TimeFrameUnit::Hour) => "1h".to_string(),
        (1, TimeFrameUnit::Day) => "1d".to_string(),
        (1, TimeFrameUnit::Week) => "1wk".to_string(),
        (1, TimeFrameUnit::Month) => "1mo".to_string(),
        (3, TimeFrameUnit::Month) => "3mo".to_string(),
        (amount, unit) => {
            return Err(ProviderError::Validation(format!(
                "Yahoo chart API does not serve interval {amount} {unit:?}"
            )));
        }
    };
    Ok(interval)
}

/// Builds the query string for one symbol of a bars request.
pub fn construct_query(
    params: &BarsRequestParams,
    yahoo: &YahooChartParams,
) -> Result<Vec<(String, String)>, ProviderError> {
    let mut query = vec![
        ("period1".to_string(), params.start.timestamp().to_string()),
        ("period2".to_string(), params.end.timestamp().to_string()),
        ("interval".to_string(), interval_str(&params.timeframe)?),
    ];
    if let Some(prepost) = yahoo.include_prepost {
        query.push(("includePrePost".to_string(), prepost.to_string()));
    }
    if let Some(events) = &yahoo.events {
        query.push(("events".to_string(), events.clone()));
    }
    Ok(query)
}
