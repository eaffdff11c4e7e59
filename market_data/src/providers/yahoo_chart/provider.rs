use chrono::{DateTime, Utc};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, header};
use tracing::debug;

use crate::models::raw_table::RawBarTable;
use crate::models::request_params::{BarsRequestParams, ProviderParams};
use crate::providers::yahoo_chart::params::{YahooChartParams, construct_query, interval_str};
use crate::providers::yahoo_chart::response::ChartEnvelope;
use crate::providers::{ClientBuildSnafu, DataProvider, ProviderError, ProviderInitError};
use async_trait::async_trait;
use snafu::ResultExt;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo rejects requests without a browser-ish user agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; market-data/0.1)";

pub struct YahooChartProvider {
    client: Client,
    limiter: DefaultDirectRateLimiter,
}

impl YahooChartProvider {
    /// Creates a new Yahoo chart provider. No credentials are required.
    pub fn new() -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        // Unauthenticated endpoint; keep well under Yahoo's throttling line.
        let limiter = RateLimiter::direct(Quota::per_second(nonzero!(2u32)));

        Ok(Self { client, limiter })
    }

    async fn fetch_symbol(
        &self,
        symbol: &str,
        params: &BarsRequestParams,
        yahoo: &YahooChartParams,
    ) -> Result<RawBarTable, ProviderError> {
        self.limiter.until_ready().await;

        let query = construct_query(params, yahoo)?;
        let url = format!("{BASE_URL}/{symbol}");
        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let retryable = status.is_server_error() || status.as_u16() == 429;
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api { message, retryable });
        }

        let envelope = response.json::<ChartEnvelope>().await?;

        if let Some(err) = envelope.chart.error {
            return Err(ProviderError::Api {
                message: format!("{}: {}", err.code, err.description),
                retryable: false,
            });
        }

        let mut results = envelope
            .chart
            .result
            .ok_or_else(|| ProviderError::Decode("chart response carried no result".into()))?;
        if results.is_empty() {
            return Err(ProviderError::Decode("chart result array was empty".into()));
        }
        let result = results.remove(0);

        let timestamps = result
            .timestamp
            .iter()
            .map(|&secs| {
                DateTime::<Utc>::from_timestamp(secs, 0)
                    .ok_or_else(|| ProviderError::Decode(format!("invalid unix timestamp {secs}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Decode("chart result carried no quote block".into()))?;

        debug!(symbol, rows = timestamps.len(), "decoded chart response");

        let mut table = RawBarTable::new(symbol, params.timeframe.clone());
        table.timestamps = timestamps;
        table.insert_column("open", quote.open);
        table.insert_column("high", quote.high);
        table.insert_column("low", quote.low);
        table.insert_column("close", quote.close);
        table.insert_column("volume", quote.volume);
        Ok(table)
    }
}

#[async_trait]
impl DataProvider for YahooChartProvider {
    async fn fetch_bars(
        &self,
        params: BarsRequestParams,
    ) -> Result<Vec<RawBarTable>, ProviderError> {
        // Reject unsupported intervals before any network round trip.
        interval_str(&params.timeframe)?;

        let yahoo = match &params.provider_specific {
            ProviderParams::Yahoo(p) => p.clone(),
            ProviderParams::None => YahooChartParams::default(),
        };

        let mut tables = Vec::with_capacity(params.symbols.len());
        for symbol in &params.symbols {
            tables.push(self.fetch_symbol(symbol, &params, &yahoo).await?);
        }
        Ok(tables)
    }
}
