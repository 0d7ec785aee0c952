//! Distribution shape of a return series: sample skewness and excess
//! kurtosis, using the bias-corrected sample estimators (a normal
//! distribution scores 0 on both).

/// Adjusted Fisher-Pearson sample skewness:
/// `G1 = g1 * sqrt(n(n-1)) / (n-2)` with `g1 = m3 / m2^(3/2)`.
///
/// `None` for fewer than 3 observations or zero variance.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let (m2, m3, _) = central_moments(values);
    if m2 == 0.0 {
        return None;
    }

    let nf = n as f64;
    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0))
}

/// Unbiased sample excess kurtosis (Fisher definition):
/// `G2 = ((n-1) / ((n-2)(n-3))) * ((n+1) g2 + 6)` with `g2 = m4/m2² - 3`.
///
/// `None` for fewer than 4 observations or zero variance.
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 4 {
        return None;
    }
    let (m2, _, m4) = central_moments(values);
    if m2 == 0.0 {
        return None;
    }

    let nf = n as f64;
    let g2 = m4 / (m2 * m2) - 3.0;
    Some((nf - 1.0) / ((nf - 2.0) * (nf - 3.0)) * ((nf + 1.0) * g2 + 6.0))
}

/// Population central moments (m2, m3, m4).
fn central_moments(values: &[f64]) -> (f64, f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let mut m2 = 0.0;
    let mut m3 = 0.0;
    let mut m4 = 0.0;
    for v in values {
        let d = v - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    (m2 / n, m3 / n, m4 / n)
}
