use crate::TRADING_DAYS;
use crate::drawdown::{self, WealthCurve};
use crate::error::MetricsError;
use crate::record::MetricsRecord;
use crate::regression;
use crate::returns;
use crate::shape;
use crate::tail;
use core_types::PriceSeries;

/// Confidence level for the historical VaR/CVaR estimate.
const VAR_CONFIDENCE: f64 = 0.95;

/// Quantiles compared by the tail ratio.
const TAIL_HIGH: f64 = 0.95;
const TAIL_LOW: f64 = 0.05;

/// A stateless calculator that derives the full risk-metrics record for one
/// asset, fanning out to the leaf estimators and merging their results.
#[derive(Debug, Default)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for computing a risk report.
    ///
    /// # Arguments
    ///
    /// * `asset` - Daily bars for the instrument under analysis.
    /// * `benchmark` - Optional daily bars for the market benchmark; absence
    ///   leaves the regression fields empty, it is not an error.
    /// * `rf_annual` - Annual risk-free rate as a decimal (0.03 for 3%).
    ///
    /// # Returns
    ///
    /// The complete [`MetricsRecord`], or [`MetricsError::InsufficientData`]
    /// when no return series can be derived from `asset`. That is the one
    /// hard failure: every other degenerate condition (zero volatility,
    /// short tail sample, zero-variance benchmark) leaves `None` in the
    /// affected fields and the rest of the record intact.
    pub fn compute(
        &self,
        asset: &PriceSeries,
        benchmark: Option<&PriceSeries>,
        rf_annual: f64,
    ) -> Result<MetricsRecord, MetricsError> {
        let asset_returns = returns::build_return_series(asset)?;

        // A benchmark too short to produce returns is treated as absent.
        let bench_returns = benchmark.and_then(|b| returns::build_return_series(b).ok());

        let values = asset_returns.values();
        let closes = asset.closes();

        // Per-period risk-free rate from the annual rate, by compounding.
        let rf_daily = (1.0 + rf_annual).powf(1.0 / TRADING_DAYS) - 1.0;
        let excess_mean = mean(&values) - rf_daily;

        // Geometric annual return from first/last price levels: insensitive
        // to interior rounding, unlike compounding the return series.
        let annual_return = match (closes.first(), closes.last()) {
            (Some(first), Some(last)) if closes.len() >= 2 => {
                Some((last / first).powf(TRADING_DAYS / closes.len() as f64) - 1.0)
            }
            _ => None,
        };

        let annual_vol = (values.len() >= 2).then(|| sample_std(&values) * TRADING_DAYS.sqrt());

        let sharpe = match annual_vol {
            Some(vol) if vol > 0.0 => Some(excess_mean * TRADING_DAYS / vol),
            _ => None,
        };

        // Downside deviation is the lower partial standard deviation vs.
        // MAR = rf_daily, over the full sample (population divisor).
        let shortfall_sq_mean = values
            .iter()
            .map(|r| (r - rf_daily).min(0.0).powi(2))
            .sum::<f64>()
            / values.len() as f64;
        let downside = shortfall_sq_mean.sqrt() * TRADING_DAYS.sqrt();
        let sortino = (downside > 0.0).then(|| excess_mean * TRADING_DAYS / downside);

        let max_drawdown = drawdown::max_drawdown(WealthCurve::PriceLevels(&closes));
        let calmar = annual_return.and_then(|ar| (max_drawdown > 0.0).then(|| ar / max_drawdown));

        let (var_95, cvar_95) = tail::historical_var_cvar(&values, VAR_CONFIDENCE);
        let tail_ratio = tail::tail_ratio(&values, TAIL_HIGH, TAIL_LOW);

        let skew = shape::skewness(&values);
        let excess_kurtosis = shape::excess_kurtosis(&values);

        let (beta, alpha, r2) = match &bench_returns {
            Some(bench) => regression::beta_alpha_r2(&asset_returns, bench),
            None => (None, None, None),
        };

        // Liquidity proxy: average daily traded value over bars that carry
        // volume; 0 when the feed has none.
        let traded: Vec<f64> = asset
            .bars()
            .iter()
            .filter_map(|bar| bar.volume.map(|v| bar.effective_close() * v))
            .collect();
        let avg_daily_dollar_vol = if traded.is_empty() { 0.0 } else { mean(&traded) };

        tracing::debug!(
            returns = values.len(),
            benchmark_returns = bench_returns.as_ref().map_or(0, |b| b.len()),
            "computed risk metrics"
        );

        Ok(MetricsRecord {
            annual_return,
            annual_vol,
            sharpe,
            sortino,
            max_drawdown,
            calmar,
            var_95,
            cvar_95,
            tail_ratio,
            skew,
            excess_kurtosis,
            beta,
            alpha,
            r2,
            avg_daily_dollar_vol,
        })
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected sample standard deviation.
fn sample_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
