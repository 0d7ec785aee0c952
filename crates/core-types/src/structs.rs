use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single daily observation of an instrument's traded price and volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Dividend/split-adjusted close. Not every feed carries an adjusted
    /// column, so consumers fall back to `close` when this is absent.
    pub adj_close: Option<f64>,
    pub volume: Option<f64>,
}

impl PriceBar {
    /// The price used for return derivation and wealth curves: the adjusted
    /// close when present, the raw close otherwise.
    pub fn effective_close(&self) -> f64 {
        match self.adj_close {
            Some(adj) if adj.is_finite() => adj,
            _ => self.close,
        }
    }
}

/// An ordered series of daily bars with strictly increasing timestamps and
/// positive, finite close prices.
///
/// This is the source of truth for return derivation and drawdown; the
/// constructor enforces the ordering and price invariants so downstream
/// calculations never have to re-validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Builds a validated series from raw bars.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, CoreError> {
        for (i, bar) in bars.iter().enumerate() {
            if !(bar.close.is_finite() && bar.close > 0.0) {
                return Err(CoreError::InvalidPrice(i, bar.close));
            }
            if let Some(v) = bar.volume {
                if !(v.is_finite() && v >= 0.0) {
                    return Err(CoreError::InvalidVolume(i, v));
                }
            }
            if i > 0 && bars[i - 1].timestamp >= bar.timestamp {
                return Err(CoreError::UnorderedSeries(i));
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Effective close prices, in timestamp order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(PriceBar::effective_close).collect()
    }

    pub fn first_close(&self) -> Option<f64> {
        self.bars.first().map(PriceBar::effective_close)
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(PriceBar::effective_close)
    }
}

/// One simple return, stamped with the timestamp of the later of the two
/// bars it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// An ordered series of simple returns, one per consecutive price pair.
///
/// Derived, never mutated: immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub fn new(points: Vec<ReturnPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Return values without their timestamps, in order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Lightweight descriptive metadata for a ticker. Display-only: none of
/// these fields ever feed a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerMeta {
    pub symbol: String,
    pub name: Option<String>,
    pub currency: Option<String>,
    pub exchange: Option<String>,
    pub last_price: Option<f64>,
}
