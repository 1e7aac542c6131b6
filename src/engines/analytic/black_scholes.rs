//! Black-Scholes-Merton closed-form kernels with continuous dividend yield.
//!
//! These free functions are the only place the BSM formulas live; the
//! dividend-European engine calls them at the escrowed-dividend effective
//! spot. Degenerate inputs never divide by zero: `expiry <= 0` collapses to
//! intrinsic value and `vol <= 0` to deterministic discounted forward
//! intrinsic, with all Greeks clipped to zero on either branch.

use crate::core::OptionType;
use crate::math::{normal_cdf, normal_pdf};

#[inline]
fn intrinsic(option_type: OptionType, spot: f64, strike: f64) -> f64 {
    (option_type.sign() * (spot - strike)).max(0.0)
}

/// The standardized moments `d1` and `d2`.
///
/// Callers must ensure `vol > 0`, `expiry > 0`, `spot > 0`, `strike > 0`.
#[inline]
pub fn bs_d1_d2(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> (f64, f64) {
    let sig_sqrt_t = vol * expiry.sqrt();
    let d1 =
        ((spot / strike).ln() + (rate - dividend_yield + 0.5 * vol * vol) * expiry) / sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

/// Black-Scholes-Merton price.
#[inline]
pub fn bs_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 {
        return intrinsic(option_type, spot, strike);
    }
    let df_r = (-rate * expiry).exp();
    let df_q = (-dividend_yield * expiry).exp();
    if vol <= 0.0 {
        return match option_type {
            OptionType::Call => (spot * df_q - strike * df_r).max(0.0),
            OptionType::Put => (strike * df_r - spot * df_q).max(0.0),
        };
    }

    let (d1, d2) = bs_d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    match option_type {
        OptionType::Call => spot * df_q * normal_cdf(d1) - strike * df_r * normal_cdf(d2),
        OptionType::Put => strike * df_r * normal_cdf(-d2) - spot * df_q * normal_cdf(-d1),
    }
}

/// First derivative of the BSM price to spot.
#[inline]
pub fn bs_delta(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 || vol <= 0.0 || spot <= 0.0 {
        return 0.0;
    }
    let (d1, _) = bs_d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let df_q = (-dividend_yield * expiry).exp();
    match option_type {
        OptionType::Call => df_q * normal_cdf(d1),
        OptionType::Put => df_q * (normal_cdf(d1) - 1.0),
    }
}

/// Second derivative of the BSM price to spot.
#[inline]
pub fn bs_gamma(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 || vol <= 0.0 || spot <= 0.0 {
        return 0.0;
    }
    let (d1, _) = bs_d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let df_q = (-dividend_yield * expiry).exp();
    df_q * normal_pdf(d1) / (spot * vol * expiry.sqrt())
}

/// First derivative of the BSM price to volatility.
#[inline]
pub fn bs_vega(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 || vol <= 0.0 || spot <= 0.0 {
        return 0.0;
    }
    let (d1, _) = bs_d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let df_q = (-dividend_yield * expiry).exp();
    spot * df_q * normal_pdf(d1) * expiry.sqrt()
}

/// First derivative of the BSM price to calendar time.
#[inline]
pub fn bs_theta(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 || vol <= 0.0 || spot <= 0.0 {
        return 0.0;
    }
    let (d1, d2) = bs_d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let sqrt_t = expiry.sqrt();
    let df_q = (-dividend_yield * expiry).exp();
    let df_r = (-rate * expiry).exp();
    match option_type {
        OptionType::Call => {
            -spot * df_q * normal_pdf(d1) * vol / (2.0 * sqrt_t)
                + dividend_yield * spot * df_q * normal_cdf(d1)
                - rate * strike * df_r * normal_cdf(d2)
        }
        OptionType::Put => {
            -spot * df_q * normal_pdf(d1) * vol / (2.0 * sqrt_t)
                - dividend_yield * spot * df_q * normal_cdf(-d1)
                + rate * strike * df_r * normal_cdf(-d2)
        }
    }
}

/// First derivative of the BSM price to the risk-free rate.
#[inline]
pub fn bs_rho(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 || vol <= 0.0 || spot <= 0.0 {
        return 0.0;
    }
    let (_, d2) = bs_d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let df_r = (-rate * expiry).exp();
    match option_type {
        OptionType::Call => strike * expiry * df_r * normal_cdf(d2),
        OptionType::Put => -strike * expiry * df_r * normal_cdf(-d2),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn known_values_without_dividend_yield() {
        let call = bs_price(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
        assert_relative_eq!(call, 10.4506, epsilon = 2e-4);

        let put = bs_price(OptionType::Put, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
        assert_relative_eq!(put, 5.5735, epsilon = 2e-4);
    }

    #[test]
    fn put_call_parity_with_dividend_yield() {
        let (s, k, r, q, v, t) = (100.0, 95.0, 0.03, 0.015, 0.22, 1.4);

        let c = bs_price(OptionType::Call, s, k, r, q, v, t);
        let p = bs_price(OptionType::Put, s, k, r, q, v, t);
        let rhs = s * (-q * t).exp() - k * (-r * t).exp();

        assert_relative_eq!(c - p, rhs, epsilon = 2e-6);
    }

    #[test]
    fn greeks_match_finite_differences() {
        let (s, k, r, q, v, t) = (100.0, 100.0, 0.05, 0.02, 0.2, 1.0);
        let ds = 1e-3;
        let dv = 1e-5;
        let dr = 1e-6;

        let price = |spot: f64, rate: f64, vol: f64| {
            bs_price(OptionType::Call, spot, k, rate, q, vol, t)
        };

        let delta_fd = (price(s + ds, r, v) - price(s - ds, r, v)) / (2.0 * ds);
        let gamma_fd =
            (price(s + ds, r, v) - 2.0 * price(s, r, v) + price(s - ds, r, v)) / (ds * ds);
        let vega_fd = (price(s, r, v + dv) - price(s, r, v - dv)) / (2.0 * dv);
        let rho_fd = (price(s, r + dr, v) - price(s, r - dr, v)) / (2.0 * dr);

        assert_relative_eq!(
            bs_delta(OptionType::Call, s, k, r, q, v, t),
            delta_fd,
            epsilon = 1e-5
        );
        assert_relative_eq!(bs_gamma(s, k, r, q, v, t), gamma_fd, epsilon = 1e-4);
        assert_relative_eq!(bs_vega(s, k, r, q, v, t), vega_fd, epsilon = 1e-4);
        // The CDF approximation's derivative error dominates here (a few
        // 1e-4 absolute on a rho near 50), so compare relatively.
        assert_relative_eq!(
            bs_rho(OptionType::Call, s, k, r, q, v, t),
            rho_fd,
            max_relative = 1e-4
        );
    }

    #[test]
    fn zero_vol_prices_discounted_forward_intrinsic() {
        let call = bs_price(OptionType::Call, 100.0, 90.0, 0.05, 0.0, 0.0, 1.0);
        let expected = 100.0 - 90.0 * (-0.05_f64).exp();
        assert_relative_eq!(call, expected, epsilon = 1e-12);

        assert_eq!(bs_delta(OptionType::Call, 100.0, 90.0, 0.05, 0.0, 0.0, 1.0), 0.0);
        assert_eq!(bs_gamma(100.0, 90.0, 0.05, 0.0, 0.0, 1.0), 0.0);
        assert_eq!(bs_vega(100.0, 90.0, 0.05, 0.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn nonpositive_spot_zeroes_every_greek() {
        for s in [0.0, -100.0] {
            assert_eq!(bs_delta(OptionType::Call, s, 100.0, 0.05, 0.0, 0.2, 1.0), 0.0);
            assert_eq!(bs_delta(OptionType::Put, s, 100.0, 0.05, 0.0, 0.2, 1.0), 0.0);
            assert_eq!(bs_gamma(s, 100.0, 0.05, 0.0, 0.2, 1.0), 0.0);
            assert_eq!(bs_vega(s, 100.0, 0.05, 0.0, 0.2, 1.0), 0.0);
            assert_eq!(bs_theta(OptionType::Call, s, 100.0, 0.05, 0.0, 0.2, 1.0), 0.0);
            assert_eq!(bs_rho(OptionType::Put, s, 100.0, 0.05, 0.0, 0.2, 1.0), 0.0);
        }
    }

    #[test]
    fn expired_option_is_worth_intrinsic() {
        assert_eq!(bs_price(OptionType::Call, 110.0, 100.0, 0.05, 0.0, 0.2, 0.0), 10.0);
        assert_eq!(bs_price(OptionType::Put, 110.0, 100.0, 0.05, 0.0, 0.2, 0.0), 0.0);
    }
}
