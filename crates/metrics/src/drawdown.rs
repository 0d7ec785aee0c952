/// A wealth curve handed to the drawdown calculation, tagged with how it
/// should be reconstructed. The caller states the series type explicitly;
/// nothing is inferred from the values.
#[derive(Debug, Clone, Copy)]
pub enum WealthCurve<'a> {
    /// Simple per-period returns. Wealth is rebuilt by cumulative
    /// compounding from 1.0.
    Returns(&'a [f64]),
    /// Raw price levels. Wealth is the series normalized by its first value.
    PriceLevels(&'a [f64]),
}

/// Maximum peak-to-trough decline of the wealth curve, as a non-negative
/// magnitude (0.18 means an 18% drawdown). Empty input yields 0.
pub fn max_drawdown(curve: WealthCurve<'_>) -> f64 {
    let mut peak = f64::MIN;
    let mut deepest = 0.0_f64;

    let mut update = |wealth: f64| {
        if wealth > peak {
            peak = wealth;
        }
        if peak > 0.0 {
            let drawdown = (peak - wealth) / peak;
            if drawdown > deepest {
                deepest = drawdown;
            }
        }
    };

    match curve {
        WealthCurve::Returns(returns) => {
            let mut wealth = 1.0;
            for r in returns {
                wealth *= 1.0 + r;
                update(wealth);
            }
        }
        WealthCurve::PriceLevels(prices) => {
            let Some(first) = prices.first().copied() else {
                return 0.0;
            };
            for price in prices {
                update(price / first);
            }
        }
    }

    deepest
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_inputs_yield_zero() {
        assert_eq!(max_drawdown(WealthCurve::Returns(&[])), 0.0);
        assert_eq!(max_drawdown(WealthCurve::PriceLevels(&[])), 0.0);
    }

    #[test]
    fn monotone_growth_has_no_drawdown() {
        assert_eq!(
            max_drawdown(WealthCurve::PriceLevels(&[100.0, 101.0, 105.0, 110.0])),
            0.0
        );
        assert_eq!(max_drawdown(WealthCurve::Returns(&[0.01, 0.0, 0.02])), 0.0);
    }

    #[test]
    fn returns_path_compounds_a_wealth_curve() {
        // Wealth [1.10, 0.90, 0.95, 1.20]; peak holds 1.10 until the final
        // point, so the trough at 0.90 dominates: (1.10 - 0.90) / 1.10.
        let returns = [0.10, -0.18181818181818182, 0.05555555555555558, 0.26315789473684204];
        let mdd = max_drawdown(WealthCurve::Returns(&returns));
        assert_relative_eq!(mdd, 0.18181818181818182, epsilon = 1e-9);
    }

    #[test]
    fn price_path_matches_returns_path() {
        let prices = [100.0, 110.0, 90.0, 95.0, 120.0];
        let mdd = max_drawdown(WealthCurve::PriceLevels(&prices));
        assert_relative_eq!(mdd, 0.18181818181818182, epsilon = 1e-9);
    }

    #[test]
    fn drawdown_from_initial_peak() {
        let mdd = max_drawdown(WealthCurve::PriceLevels(&[100.0, 90.0, 80.0, 120.0, 110.0]));
        assert_relative_eq!(mdd, 0.20, epsilon = 1e-12);
    }

    #[test]
    fn magnitude_is_never_negative() {
        for prices in [&[50.0, 60.0][..], &[60.0, 50.0][..], &[1.0][..]] {
            assert!(max_drawdown(WealthCurve::PriceLevels(prices)) >= 0.0);
        }
    }
}
