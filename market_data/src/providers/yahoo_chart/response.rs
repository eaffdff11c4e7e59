use serde::Deserialize;

/// Top-level envelope of a v8 chart response.
#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    /// Unix timestamps (seconds) for each candle.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    pub quote: Vec<Quote>,
}

/// OHLCV arrays, parallel to `timestamp`. Individual entries may be null.
#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"currency": "USD", "symbol": "AAPL"},
                "timestamp": [1577923200, 1578009600, 1578268800],
                "indicators": {
                    "quote": [{
                        "open": [74.06, 74.29, null],
                        "high": [75.15, 75.14, 74.99],
                        "low": [73.8, 74.13, 73.19],
                        "close": [75.09, 74.36, 74.57],
                        "volume": [135480400, 146322800, 118387200]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn decodes_sample_payload() {
        let envelope: ChartEnvelope = serde_json::from_str(SAMPLE).unwrap();
        let result = envelope.chart.result.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].timestamp.len(), 3);
        let quote = &result[0].indicators.quote[0];
        assert_eq!(quote.open[2], None);
        assert_eq!(quote.close[0], Some(75.09));
        assert_eq!(quote.volume[1], Some(146322800.0));
    }

    #[test]
    fn decodes_error_payload() {
        let body = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found"}
            }
        }"#;
        let envelope: ChartEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.chart.result.is_none());
        assert_eq!(envelope.chart.error.unwrap().code, "Not Found");
    }
}
