use serde::{Deserialize, Serialize};

/// The complete set of computed risk statistics for one asset over one
/// observation window.
///
/// This struct is the final output of the `MetricsEngine` and the data
/// transfer object that rendering and export layers rely on. Fields that can
/// be numerically undefined (insufficient data, zero denominator, missing
/// benchmark) are `Option<f64>`: `None` means "no value", and consumers must
/// render it distinctly, never as 0 and never as NaN.
///
/// Units: returns, volatility, VaR/CVaR, alpha, and max_drawdown are decimal
/// fractions (0.18 = 18%); Sharpe/Sortino/Calmar/beta/tail_ratio/r2 are
/// unitless ratios; avg_daily_dollar_vol is in the asset's currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub annual_return: Option<f64>,
    pub annual_vol: Option<f64>,
    pub sharpe: Option<f64>,
    pub sortino: Option<f64>,
    /// Positive magnitude; 0 for a curve that never declines.
    pub max_drawdown: f64,
    pub calmar: Option<f64>,
    pub var_95: Option<f64>,
    pub cvar_95: Option<f64>,
    pub tail_ratio: Option<f64>,
    pub skew: Option<f64>,
    pub excess_kurtosis: Option<f64>,
    pub beta: Option<f64>,
    pub alpha: Option<f64>,
    pub r2: Option<f64>,
    pub avg_daily_dollar_vol: f64,
}

impl MetricsRecord {
    /// The record as an ordered flat key/value mapping, the exact contract
    /// external formatting/export code relies on: these keys, this order,
    /// nothing else.
    pub fn key_values(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("annual_return", self.annual_return),
            ("annual_vol", self.annual_vol),
            ("sharpe", self.sharpe),
            ("sortino", self.sortino),
            ("max_drawdown", Some(self.max_drawdown)),
            ("calmar", self.calmar),
            ("var_95", self.var_95),
            ("cvar_95", self.cvar_95),
            ("tail_ratio", self.tail_ratio),
            ("skew", self.skew),
            ("excess_kurtosis", self.excess_kurtosis),
            ("beta", self.beta),
            ("alpha", self.alpha),
            ("r2", self.r2),
            ("avg_daily_dollar_vol", Some(self.avg_daily_dollar_vol)),
        ]
    }
}
