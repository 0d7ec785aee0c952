use crate::TRADING_DAYS;
use core_types::ReturnSeries;

/// Ordinary least-squares regression of asset returns on benchmark returns,
/// specialized to the single-regressor closed form.
///
/// The two series are aligned on common timestamps (inner join: periods
/// present in only one series are discarded). Outputs:
///
/// - `beta`: the regression slope.
/// - `alpha`: the daily intercept annualized by compounding,
///   `(1 + alpha_daily)^252 - 1`.
/// - `r2`: fraction of asset-return variance explained by the benchmark.
///
/// All three are `None` when fewer than 2 aligned points exist or the
/// benchmark has zero variance; `r2` alone is `None` when the asset has
/// zero variance.
pub fn beta_alpha_r2(
    asset: &ReturnSeries,
    bench: &ReturnSeries,
) -> (Option<f64>, Option<f64>, Option<f64>) {
    let (y, x) = align(asset, bench);
    if y.len() < 2 {
        return (None, None, None);
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let ss_x: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();
    if ss_x == 0.0 {
        return (None, None, None);
    }

    let cov_xy: f64 = x
        .iter()
        .zip(&y)
        .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
        .sum();

    let beta = cov_xy / ss_x;
    let alpha_daily = y_mean - beta * x_mean;
    let alpha_annual = (1.0 + alpha_daily).powf(TRADING_DAYS) - 1.0;

    let ss_res: f64 = x
        .iter()
        .zip(&y)
        .map(|(xi, yi)| (yi - (alpha_daily + beta * xi)).powi(2))
        .sum();
    let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let r2 = (ss_tot != 0.0).then(|| 1.0 - ss_res / ss_tot);

    (Some(beta), Some(alpha_annual), r2)
}

/// Inner join of two timestamp-ordered return series, yielding paired
/// (asset, benchmark) values.
fn align(asset: &ReturnSeries, bench: &ReturnSeries) -> (Vec<f64>, Vec<f64>) {
    let mut y = Vec::new();
    let mut x = Vec::new();

    let a = asset.points();
    let b = bench.points();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].timestamp.cmp(&b[j].timestamp) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                y.push(a[i].value);
                x.push(b[j].value);
                i += 1;
                j += 1;
            }
        }
    }

    (y, x)
}
