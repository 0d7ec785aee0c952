/// Minimum number of return observations for a meaningful empirical tail.
pub const MIN_TAIL_OBSERVATIONS: usize = 100;

/// Historical one-period Value-at-Risk and Conditional VaR (expected
/// shortfall) at confidence `alpha`.
///
/// VaR is the empirical `(1 - alpha)` lower-tail percentile of the return
/// distribution; CVaR is the mean of all returns at or below it. Both are
/// `None` when fewer than [`MIN_TAIL_OBSERVATIONS`] returns are available:
/// an empirical tail estimated from a short sample is noise, not risk.
pub fn historical_var_cvar(returns: &[f64], alpha: f64) -> (Option<f64>, Option<f64>) {
    if returns.len() < MIN_TAIL_OBSERVATIONS {
        return (None, None);
    }

    let var = percentile(returns, (1.0 - alpha) * 100.0);

    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r <= var).collect();
    let cvar = if tail.is_empty() {
        var
    } else {
        tail.iter().sum::<f64>() / tail.len() as f64
    };

    (Some(var), Some(cvar))
}

/// Magnitude of upper-quantile gains relative to lower-quantile losses:
/// `|Q_high| / |Q_low|`. `None` when the lower-quantile magnitude is zero
/// or the series is empty.
pub fn tail_ratio(returns: &[f64], p_high: f64, p_low: f64) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    let high = percentile(returns, p_high * 100.0);
    let low = percentile(returns, p_low * 100.0);
    let denom = low.abs();
    (denom > 0.0).then(|| high.abs() / denom)
}

/// Empirical percentile with linear interpolation between order statistics,
/// `pct` in [0, 100].
pub(crate) fn percentile(values: &[f64], pct: f64) -> f64 {
    debug_assert!(!values.is_empty());

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let idx = (pct / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = idx - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}
