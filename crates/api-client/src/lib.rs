use crate::error::ApiError;
use crate::responses::{ChartResponse, ChartResult};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use configuration::settings::FetchConfig;
use core_types::{PriceBar, PriceSeries, TickerMeta};
use std::time::Duration;

pub mod cache;
pub mod error;
pub mod responses;

// --- Public API ---
pub use cache::{CachedMarketData, QuoteCache};

/// A fetched history: lightweight ticker metadata plus the validated daily
/// price series.
#[derive(Debug, Clone)]
pub struct Quote {
    pub meta: TickerMeta,
    pub series: PriceSeries,
}

/// The generic, abstract interface for a historical market-data source.
/// This trait is the contract the application uses, allowing the underlying
/// implementation (live or mock) to be swapped out.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetches daily OHLCV history for `symbol` over a named range
    /// (e.g. "1y", "5y", "max") at the given interval (e.g. "1d").
    async fn fetch_history(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Quote, ApiError>;
}

/// A concrete [`MarketData`] implementation backed by the public Yahoo
/// Finance v8 chart endpoint.
#[derive(Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_base_delay: Duration,
}

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

impl YahooClient {
    pub fn new(config: &FetchConfig) -> Result<Self, ApiError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Same as [`YahooClient::new`] but pointed at an alternate host, which
    /// also makes the client testable against a local stub server.
    pub fn with_base_url(config: &FetchConfig, base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("riskscope/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        })
    }

    async fn fetch_once(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Quote, ApiError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("range", range),
                ("interval", interval),
                ("includeAdjustedClose", "true"),
                ("events", "div,split"),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16(), text));
        }

        let parsed: ChartResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;

        quote_from_chart(symbol, range, interval, parsed)
    }
}

#[async_trait]
impl MarketData for YahooClient {
    async fn fetch_history(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Quote, ApiError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(symbol, range, interval).await {
                Ok(quote) => return Ok(quote),
                Err(e) if attempt < self.max_retries && e.is_retryable() => {
                    let delay = self.retry_base_delay * 2_u32.pow(attempt);
                    tracing::warn!(
                        %symbol,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "quote fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Converts a parsed chart payload into a validated [`Quote`].
///
/// Rows with a missing timestamp or any missing OHLC component are dropped;
/// adjusted close and volume remain optional per bar.
fn quote_from_chart(
    symbol: &str,
    range: &str,
    interval: &str,
    parsed: ChartResponse,
) -> Result<Quote, ApiError> {
    if let Some(err) = parsed.chart.error {
        return Err(ApiError::Rejected(format!("{}: {}", err.code, err.description)));
    }

    let result: ChartResult = parsed
        .chart
        .result
        .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
        .ok_or_else(|| {
            ApiError::NoData(symbol.to_owned(), range.to_owned(), interval.to_owned())
        })?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = result
        .indicators
        .adjclose
        .and_then(|mut cols| (!cols.is_empty()).then(|| cols.remove(0).adjclose));

    let column = |col: &Option<Vec<Option<f64>>>, i: usize| -> Option<f64> {
        col.as_ref().and_then(|values| values.get(i).copied().flatten())
    };

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let timestamp = Utc
            .timestamp_opt(ts, 0)
            .single()
            .ok_or_else(|| ApiError::InvalidData(format!("invalid timestamp: {ts}")))?;

        let (Some(open), Some(high), Some(low), Some(close)) = (
            column(&quote.open, i),
            column(&quote.high, i),
            column(&quote.low, i),
            column(&quote.close, i),
        ) else {
            continue;
        };

        bars.push(PriceBar {
            timestamp,
            open,
            high,
            low,
            close,
            adj_close: adjclose.as_ref().and_then(|col| col.get(i).copied().flatten()),
            volume: column(&quote.volume, i),
        });
    }

    if bars.is_empty() {
        return Err(ApiError::NoData(
            symbol.to_owned(),
            range.to_owned(),
            interval.to_owned(),
        ));
    }

    let series = PriceSeries::new(bars).map_err(|e| ApiError::InvalidData(e.to_string()))?;

    let meta = TickerMeta {
        symbol: result.meta.symbol,
        name: result.meta.long_name.or(result.meta.short_name),
        currency: result.meta.currency,
        exchange: result.meta.exchange_name,
        last_price: result.meta.regular_market_price,
    };

    Ok(Quote { meta, series })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ChartResponse {
        serde_json::from_str(json).unwrap()
    }

    const FIXTURE: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "symbol": "AAPL",
                    "currency": "USD",
                    "exchangeName": "NMS",
                    "shortName": "Apple Inc.",
                    "regularMarketPrice": 190.5
                },
                "timestamp": [1704153600, 1704240000, 1704326400],
                "indicators": {
                    "quote": [{
                        "open": [184.2, 185.0, null],
                        "high": [186.0, 186.4, 187.0],
                        "low": [183.9, 184.1, 185.2],
                        "close": [185.6, 184.2, 186.1],
                        "volume": [52000000, null, 48000000]
                    }],
                    "adjclose": [{
                        "adjclose": [185.1, 183.7, null]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn converts_chart_rows_into_bars() {
        let quote = quote_from_chart("AAPL", "1y", "1d", parse(FIXTURE)).unwrap();

        // The third row has a null open and is dropped.
        assert_eq!(quote.series.len(), 2);

        let bars = quote.series.bars();
        assert_eq!(bars[0].close, 185.6);
        assert_eq!(bars[0].adj_close, Some(185.1));
        assert_eq!(bars[0].volume, Some(52_000_000.0));
        assert_eq!(bars[1].volume, None);

        assert_eq!(quote.meta.symbol, "AAPL");
        assert_eq!(quote.meta.name.as_deref(), Some("Apple Inc."));
        assert_eq!(quote.meta.currency.as_deref(), Some("USD"));
        assert_eq!(quote.meta.last_price, Some(190.5));
    }

    #[test]
    fn missing_result_is_no_data() {
        let json = r#"{"chart": {"result": null, "error": null}}"#;
        let err = quote_from_chart("NOPE", "1y", "1d", parse(json)).unwrap_err();
        assert!(matches!(err, ApiError::NoData(..)));
    }

    #[test]
    fn api_error_payload_is_a_rejection() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }"#;
        let err = quote_from_chart("NOPE", "1y", "1d", parse(json)).unwrap_err();
        assert!(matches!(err, ApiError::Rejected(_)));
    }

    #[test]
    fn all_rows_unusable_is_no_data() {
        let json = r#"{
            "chart": {
                "result": [{
                    "meta": {"symbol": "X"},
                    "timestamp": [1704153600],
                    "indicators": {"quote": [{"open": [null], "high": [null], "low": [null], "close": [null], "volume": [null]}]}
                }],
                "error": null
            }
        }"#;
        let err = quote_from_chart("X", "1y", "1d", parse(json)).unwrap_err();
        assert!(matches!(err, ApiError::NoData(..)));
    }

    #[test]
    fn retryability_is_limited_to_transient_failures() {
        assert!(ApiError::Status(503, String::new()).is_retryable());
        assert!(ApiError::Status(429, String::new()).is_retryable());
        assert!(!ApiError::Status(404, String::new()).is_retryable());
        assert!(!ApiError::Rejected("bad symbol".into()).is_retryable());
        assert!(!ApiError::NoData("X".into(), "1y".into(), "1d".into()).is_retryable());
    }
}
