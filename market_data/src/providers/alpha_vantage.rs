//! Alpha Vantage daily-bars provider.
//!
//! Env-keyed REST vendor (`ALPHAVANTAGE_API_KEY`). Only serves 1-day bars;
//! any other timeframe is rejected up front. The free tier is throttled
//! hard, so the provider carries its own rate quota and flags quota notes
//! from the API as retryable.

use chrono::{DateTime, NaiveDate, Utc};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use indexmap::IndexMap;
use nonzero_ext::nonzero;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::debug;

use crate::models::raw_table::RawBarTable;
use crate::models::request_params::BarsRequestParams;
use crate::models::timeframe::{TimeFrame, TimeFrameUnit};
use crate::providers::{
    ClientBuildSnafu, DataProvider, MissingEnvVarSnafu, ProviderError, ProviderInitError,
};
use async_trait::async_trait;

const BASE_URL: &str = "https://www.alphavantage.co/query";

pub struct AlphaVantageProvider {
    client: Client,
    api_key: SecretString,
    limiter: DefaultDirectRateLimiter,
}

#[derive(Deserialize, Debug)]
struct AvResponse {
    #[serde(rename = "Time Series (Daily)")]
    series: Option<IndexMap<String, AvDailyBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

/// All numeric fields arrive as strings in the Alpha Vantage payload.
#[derive(Deserialize, Debug)]
struct AvDailyBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

impl AlphaVantageProvider {
    /// Creates a new Alpha Vantage provider.
    ///
    /// Reads the API key from the `ALPHAVANTAGE_API_KEY` environment
    /// variable.
    pub fn new() -> Result<Self, ProviderInitError> {
        let api_key =
            SecretString::new(get_env_var("ALPHAVANTAGE_API_KEY").context(MissingEnvVarSnafu)?.into());

        let client = Client::builder().build().context(ClientBuildSnafu)?;

        // Free-tier quota is 5 requests per minute.
        let limiter = RateLimiter::direct(Quota::per_minute(nonzero!(5u32)));

        Ok(Self {
            client,
            api_key,
            limiter,
        })
    }

    async fn fetch_symbol(
        &self,
        symbol: &str,
        params: &BarsRequestParams,
    ) -> Result<RawBarTable, ProviderError> {
        self.limiter.until_ready().await;

        let query = [
            ("function", "TIME_SERIES_DAILY"),
            ("symbol", symbol),
            ("outputsize", "full"),
            ("apikey", self.api_key.expose_secret()),
        ];
        let response = self.client.get(BASE_URL).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let retryable = status.is_server_error() || status.as_u16() == 429;
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api { message, retryable });
        }

        let body = response.json::<AvResponse>().await?;

        if let Some(message) = body.error_message {
            return Err(ProviderError::Api {
                message,
                retryable: false,
            });
        }
        // "Note"/"Information" payloads are how the API reports throttling.
        if let Some(message) = body.note.or(body.information) {
            return Err(ProviderError::Api {
                message,
                retryable: true,
            });
        }

        let series = body.series.ok_or_else(|| {
            ProviderError::Decode("response carried no daily time series".into())
        })?;

        // The API returns newest-first; re-sort ascending and clip to the
        // requested [start, end) range.
        let mut rows: Vec<(DateTime<Utc>, AvDailyBar)> = series
            .into_iter()
            .map(|(date, bar)| {
                let day = date.parse::<NaiveDate>().map_err(|_| {
                    ProviderError::Decode(format!("invalid date key {date:?}"))
                })?;
                let ts = day.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();
                Ok((ts, bar))
            })
            .collect::<Result<_, ProviderError>>()?;
        rows.sort_by_key(|(ts, _)| *ts);
        rows.retain(|(ts, _)| *ts >= params.start && *ts < params.end);

        debug!(symbol, rows = rows.len(), "decoded daily time series");

        let mut table = RawBarTable::new(symbol, params.timeframe.clone());
        let mut open = Vec::with_capacity(rows.len());
        let mut high = Vec::with_capacity(rows.len());
        let mut low = Vec::with_capacity(rows.len());
        let mut close = Vec::with_capacity(rows.len());
        let mut volume = Vec::with_capacity(rows.len());
        for (ts, bar) in rows {
            table.timestamps.push(ts);
            open.push(parse_field(&bar.open)?);
            high.push(parse_field(&bar.high)?);
            low.push(parse_field(&bar.low)?);
            close.push(parse_field(&bar.close)?);
            volume.push(parse_field(&bar.volume)?);
        }
        table.insert_column("open", open);
        table.insert_column("high", high);
        table.insert_column("low", low);
        table.insert_column("close", close);
        table.insert_column("volume", volume);
        Ok(table)
    }
}

fn parse_field(raw: &str) -> Result<Option<f64>, ProviderError> {
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| ProviderError::Decode(format!("non-numeric field value {raw:?}")))
}

#[async_trait]
impl DataProvider for AlphaVantageProvider {
    async fn fetch_bars(
        &self,
        params: BarsRequestParams,
    ) -> Result<Vec<RawBarTable>, ProviderError> {
        if params.timeframe != (TimeFrame { amount: 1, unit: TimeFrameUnit::Day }) {
            return Err(ProviderError::Validation(
                "Alpha Vantage daily endpoint only serves 1 Day bars".into(),
            ));
        }

        let mut tables = Vec::with_capacity(params.symbols.len());
        for symbol in &params.symbols {
            tables.push(self.fetch_symbol(symbol, &params).await?);
        }
        Ok(tables)
    }
}
