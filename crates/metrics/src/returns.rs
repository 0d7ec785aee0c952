use crate::error::MetricsError;
use core_types::{PriceSeries, ReturnPoint, ReturnSeries};

/// Derives a simple-return series from a price series.
///
/// Uses the dividend/split-adjusted close when the bar carries one, the raw
/// close otherwise. Bars whose effective price is non-finite are dropped
/// before differencing, so a gap in the feed shortens the series rather than
/// poisoning it.
///
/// Errors with [`MetricsError::InsufficientData`] when fewer than two usable
/// prices remain: no return can be computed.
pub fn build_return_series(series: &PriceSeries) -> Result<ReturnSeries, MetricsError> {
    let usable: Vec<_> = series
        .bars()
        .iter()
        .filter(|bar| bar.effective_close().is_finite() && bar.effective_close() > 0.0)
        .collect();

    if usable.len() < 2 {
        return Err(MetricsError::InsufficientData(format!(
            "need at least 2 valid prices to derive returns, found {}",
            usable.len()
        )));
    }

    let points = usable
        .windows(2)
        .map(|pair| ReturnPoint {
            timestamp: pair[1].timestamp,
            value: pair[1].effective_close() / pair[0].effective_close() - 1.0,
        })
        .collect();

    Ok(ReturnSeries::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use core_types::PriceBar;

    fn series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1 + i as u32, 0, 0, 0).unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                adj_close: None,
                volume: None,
            })
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    #[test]
    fn derives_one_return_per_consecutive_pair() {
        let returns = build_return_series(&series(&[100.0, 110.0, 90.0, 95.0, 120.0])).unwrap();
        assert_eq!(returns.len(), 4);

        let values = returns.values();
        assert_relative_eq!(values[0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(values[1], -0.18181818181818182, epsilon = 1e-12);
        assert_relative_eq!(values[2], 0.05555555555555558, epsilon = 1e-12);
        assert_relative_eq!(values[3], 0.26315789473684204, epsilon = 1e-12);
    }

    #[test]
    fn return_timestamps_come_from_the_later_bar() {
        let prices = series(&[100.0, 101.0]);
        let returns = build_return_series(&prices).unwrap();
        assert_eq!(returns.points()[0].timestamp, prices.bars()[1].timestamp);
    }

    #[test]
    fn prefers_adjusted_close_when_present() {
        let mut prices = series(&[100.0, 100.0]);
        let mut bars = prices.bars().to_vec();
        bars[1].adj_close = Some(105.0);
        prices = PriceSeries::new(bars).unwrap();

        let returns = build_return_series(&prices).unwrap();
        assert_relative_eq!(returns.values()[0], 0.05, epsilon = 1e-12);
    }

    #[test]
    fn fails_below_two_prices() {
        let err = build_return_series(&series(&[100.0])).unwrap_err();
        assert!(matches!(err, MetricsError::InsufficientData(_)));
    }
}
