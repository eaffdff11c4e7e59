use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::timeframe::TimeFrame;
use crate::providers::yahoo_chart::YahooChartParams;

/// Universal parameters for requesting time-series bar data from any
/// market data provider.
///
/// This struct is vendor-agnostic and is the standard input for all
/// [`DataProvider`](crate::providers::DataProvider) implementations.
/// Validation of allowed timeframe values is performed by each provider
/// according to its own API rules.
#[derive(Clone, Debug)]
pub struct BarsRequestParams {
    /// List of symbols to request (e.g., `["AAPL"]`).
    pub symbols: Vec<String>,

    /// The time interval for each bar (e.g., 1 day).
    pub timeframe: TimeFrame,

    /// Start of the requested time range (inclusive, UTC).
    pub start: DateTime<Utc>,

    /// End of the requested time range (exclusive, UTC).
    ///
    /// Providers return bars strictly before this timestamp.
    pub end: DateTime<Utc>,

    /// Optional, provider-specific parameters.
    pub provider_specific: ProviderParams,
}

/// An enum to hold provider-specific request parameters.
///
/// Lets callers pass detailed per-request options for a particular provider
/// without cluttering the universal `BarsRequestParams`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum ProviderParams {
    #[default]
    None,
    Yahoo(YahooChartParams),
}
