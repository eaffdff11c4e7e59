#![cfg(test)]
use chrono::{Duration, Utc};
use market_data::{
    models::{
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::TimeFrame,
    },
    preprocess::preprocess,
    providers::{DataProvider, yahoo_chart::YahooChartProvider},
};
use serial_test::serial;

#[tokio::test]
#[serial]
#[ignore]
async fn test_yahoo_provider_fetch_bars() {
    // Hits the live Yahoo endpoint; run with --ignored when online.
    let provider = YahooChartProvider::new().expect("Failed to create YahooChartProvider");

    let params = BarsRequestParams {
        symbols: vec!["AAPL".to_string()],
        timeframe: TimeFrame::day(),
        start: Utc::now() - Duration::days(30),
        end: Utc::now() - Duration::days(1),
        provider_specific: ProviderParams::None,
    };

    let result = provider.fetch_bars(params).await;
    assert!(result.is_ok(), "fetch_bars returned an error: {:?}", result.err());

    let tables = result.unwrap();
    assert_eq!(tables.len(), 1, "Expected 1 table for AAPL");
    let table = tables.into_iter().next().unwrap();
    assert_eq!(table.symbol, "AAPL");
    assert!(!table.is_empty(), "Expected at least one row for AAPL");

    // The raw table should normalize cleanly.
    let series = preprocess(table).expect("preprocess failed on live data");
    assert!(series.is_ordered());
    assert!(series.bars.iter().skip(1).all(|b| b.is_complete()));
}

#[tokio::test]
#[serial]
async fn test_yahoo_provider_rejects_unsupported_interval() {
    use market_data::models::timeframe::{TimeFrame, TimeFrameUnit};
    use market_data::providers::ProviderError;

    let provider = YahooChartProvider::new().expect("Failed to create YahooChartProvider");
    let params = BarsRequestParams {
        symbols: vec!["AAPL".to_string()],
        timeframe: TimeFrame::new(45, TimeFrameUnit::Minute).unwrap(),
        start: Utc::now() - Duration::days(5),
        end: Utc::now(),
        provider_specific: ProviderParams::None,
    };

    // Interval validation happens before any network call.
    let err = provider.fetch_bars(params).await.unwrap_err();
    assert!(matches!(err, ProviderError::Validation(_)));
}
