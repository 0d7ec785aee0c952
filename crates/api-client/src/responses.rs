//! Intermediate structs for deserializing the quote API's chart payload.
//!
//! The shape mirrors the v8 chart endpoint: parallel arrays of timestamps
//! and OHLCV quote columns, with `null` holes preserved as `None` so the
//! conversion layer can decide what to drop.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    pub currency: Option<String>,
    pub exchange_name: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    pub quote: Vec<QuoteColumns>,
    pub adjclose: Option<Vec<AdjCloseColumn>>,
}

/// OHLCV columns as parallel arrays; individual entries may be null.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteColumns {
    pub open: Option<Vec<Option<f64>>>,
    pub high: Option<Vec<Option<f64>>>,
    pub low: Option<Vec<Option<f64>>>,
    pub close: Option<Vec<Option<f64>>>,
    pub volume: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
pub struct AdjCloseColumn {
    pub adjclose: Vec<Option<f64>>,
}
