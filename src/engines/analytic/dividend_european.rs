//! Analytic engine for European options on discrete-dividend-paying equities.
//!
//! Escrowed-dividend model: the present value of every cash dividend due in
//! `(valuation, maturity]` is subtracted from spot, and the plain
//! Black-Scholes-Merton formulas are applied at that effective spot. Since
//! `d(effective spot)/d(spot) = 1`, delta and gamma carry through unchanged.
//! Theta and rho pick up correction terms because the dividend present value
//! itself moves with the valuation date and the discount rate: a one-day roll
//! shrinks each discounting period, and a rate bump reprices every dividend.

use crate::core::{ExerciseStyle, Greeks, PricingEngine, PricingError, PricingResult};
use crate::engines::analytic::black_scholes::{
    bs_delta, bs_gamma, bs_price, bs_rho, bs_theta, bs_vega,
};
use crate::instruments::DividendVanillaOption;
use crate::market::{DividendSchedule, Market};

/// Spot net of the present value of dividends due in `(valuation, maturity]`.
///
/// The schedule is discounted on the risk-free curve; the continuous dividend
/// yield plays no part in the escrow adjustment.
pub fn effective_spot(market: &Market, dividends: &DividendSchedule) -> f64 {
    market.spot - dividends.present_value(&market.discount_curve())
}

/// Closed-form pricing engine for [`DividendVanillaOption`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticDividendEuropeanEngine;

impl AnalyticDividendEuropeanEngine {
    /// Creates an engine instance.
    pub fn new() -> Self {
        Self
    }
}

impl PricingEngine<DividendVanillaOption> for AnalyticDividendEuropeanEngine {
    fn price(
        &self,
        instrument: &DividendVanillaOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        instrument.validate()?;

        if !matches!(instrument.exercise, ExerciseStyle::European) {
            return Err(PricingError::InvalidInput(format!(
                "AnalyticDividendEuropeanEngine supports European exercise only, got {}",
                instrument.exercise
            )));
        }

        let vol = market
            .vol_surface()
            .black_vol(instrument.maturity, instrument.strike);
        if !vol.is_finite() || vol < 0.0 {
            return Err(PricingError::InvalidInput(
                "volatility must be finite and >= 0".to_string(),
            ));
        }

        let expiry = market.time_to(instrument.maturity);
        if expiry <= 0.0 {
            return Ok(PricingResult {
                price: instrument.payoff(market.spot),
                greeks: Some(Greeks::zero()),
            });
        }

        instrument
            .dividends
            .validate_window(market.valuation_date, instrument.maturity)?;

        let discount = market.discount_curve();
        let spot = effective_spot(market, &instrument.dividends);
        if spot <= 0.0 {
            return Err(PricingError::NumericalError(format!(
                "dividend present value exhausts the spot ({} <= 0)",
                spot
            )));
        }

        let (option_type, strike) = (instrument.option_type, instrument.strike);
        let (rate, div_yield) = (market.rate, market.dividend_yield);

        let price = bs_price(option_type, spot, strike, rate, div_yield, vol, expiry);
        let delta = bs_delta(option_type, spot, strike, rate, div_yield, vol, expiry);
        let gamma = bs_gamma(spot, strike, rate, div_yield, vol, expiry);
        let vega = bs_vega(spot, strike, rate, div_yield, vol, expiry);
        let mut theta = bs_theta(option_type, spot, strike, rate, div_yield, vol, expiry);
        let mut rho = bs_rho(option_type, spot, strike, rate, div_yield, vol, expiry);

        // The escrow PV drifts as time passes and reprices under a rate bump;
        // both effects flow into the option through delta.
        let mut escrow_theta = 0.0;
        let mut escrow_rho = 0.0;
        for event in instrument.dividends.events() {
            let df = discount.discount_factor(event.ex_date);
            let tau = market.time_to(event.ex_date);
            escrow_theta -= event.amount * discount.zero_rate() * df;
            escrow_rho += event.amount * tau * df;
        }
        theta += escrow_theta * delta;
        rho += escrow_rho * delta;

        if !price.is_finite() {
            return Err(PricingError::NumericalError(
                "non-finite price from Black-Scholes kernel".to_string(),
            ));
        }

        Ok(PricingResult {
            price,
            greeks: Some(Greeks {
                delta,
                gamma,
                vega,
                theta,
                rho,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    use super::*;
    use crate::core::OptionType;
    use crate::market::CashDividend;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn market_at(valuation: NaiveDate) -> Market {
        Market::builder()
            .valuation_date(valuation)
            .spot(100.0)
            .rate(0.05)
            .dividend_yield(0.0)
            .flat_vol(0.20)
            .build()
            .unwrap()
    }

    #[test]
    fn dividends_cheapen_calls_and_enrich_puts() {
        let valuation = date(2004, 5, 17);
        let maturity = date(2005, 5, 17);
        let market = market_at(valuation);
        let engine = AnalyticDividendEuropeanEngine::new();

        let schedule =
            DividendSchedule::new(vec![CashDividend::new(date(2004, 11, 17), 2.0).unwrap()])
                .unwrap();

        let plain_call = DividendVanillaOption::european_call(100.0, maturity, DividendSchedule::empty());
        let div_call = DividendVanillaOption::european_call(100.0, maturity, schedule.clone());
        let plain_put = DividendVanillaOption::european_put(100.0, maturity, DividendSchedule::empty());
        let div_put = DividendVanillaOption::european_put(100.0, maturity, schedule);

        let c0 = engine.price(&plain_call, &market).unwrap().price;
        let c1 = engine.price(&div_call, &market).unwrap().price;
        let p0 = engine.price(&plain_put, &market).unwrap().price;
        let p1 = engine.price(&div_put, &market).unwrap().price;

        assert!(c1 < c0);
        assert!(p1 > p0);
    }

    #[test]
    fn matches_kernel_at_the_effective_spot() {
        let valuation = date(2004, 5, 17);
        let maturity = date(2005, 5, 17);
        let market = market_at(valuation);

        let schedule =
            DividendSchedule::new(vec![CashDividend::new(date(2004, 11, 17), 2.0).unwrap()])
                .unwrap();
        let option = DividendVanillaOption::european_call(100.0, maturity, schedule.clone());

        let adjusted = effective_spot(&market, &schedule);
        let expiry = market.time_to(maturity);
        let expected = bs_price(OptionType::Call, adjusted, 100.0, 0.05, 0.0, 0.20, expiry);

        let result = AnalyticDividendEuropeanEngine::new()
            .price(&option, &market)
            .unwrap();
        assert!(adjusted < 100.0 && adjusted > 98.0);
        assert_relative_eq!(result.price, expected, epsilon = 1e-14);
    }

    #[test]
    fn out_of_window_dividend_is_a_domain_error() {
        let valuation = date(2004, 5, 17);
        let maturity = date(2005, 5, 17);
        let market = market_at(valuation);

        let late =
            DividendSchedule::new(vec![CashDividend::new(date(2005, 6, 17), 5.0).unwrap()])
                .unwrap();
        let option = DividendVanillaOption::european_call(100.0, maturity, late);

        let err = AnalyticDividendEuropeanEngine::new()
            .price(&option, &market)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn american_exercise_is_rejected() {
        let valuation = date(2004, 5, 17);
        let market = market_at(valuation);
        let mut option = DividendVanillaOption::european_call(
            100.0,
            date(2005, 5, 17),
            DividendSchedule::empty(),
        );
        option.exercise = ExerciseStyle::American;

        let err = AnalyticDividendEuropeanEngine::new()
            .price(&option, &market)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn zero_vol_returns_deterministic_branch_with_zero_greeks() {
        let valuation = date(2004, 5, 17);
        let maturity = date(2005, 5, 17);
        let market = Market::builder()
            .valuation_date(valuation)
            .spot(100.0)
            .rate(0.05)
            .flat_vol(0.0)
            .build()
            .unwrap();

        let option = DividendVanillaOption::european_call(
            90.0,
            maturity,
            DividendSchedule::empty(),
        );
        let result = AnalyticDividendEuropeanEngine::new()
            .price(&option, &market)
            .unwrap();

        let expiry = market.time_to(maturity);
        let expected = 100.0 - 90.0 * (-0.05 * expiry).exp();
        assert_relative_eq!(result.price, expected, epsilon = 1e-12);
        assert_eq!(result.greeks.unwrap(), Greeks::zero());
    }

    #[test]
    fn dividend_pv_exceeding_spot_is_a_numerical_error() {
        let valuation = date(2004, 5, 17);
        let maturity = date(2005, 5, 17);
        let market = market_at(valuation);

        let huge =
            DividendSchedule::new(vec![CashDividend::new(date(2004, 11, 17), 150.0).unwrap()])
                .unwrap();
        let option = DividendVanillaOption::european_call(100.0, maturity, huge);

        let err = AnalyticDividendEuropeanEngine::new()
            .price(&option, &market)
            .unwrap_err();
        assert!(matches!(err, PricingError::NumericalError(_)));
    }

    #[test]
    fn expired_contract_prices_at_intrinsic() {
        let valuation = date(2005, 5, 17);
        let market = market_at(valuation);
        let option = DividendVanillaOption::european_call(
            90.0,
            valuation,
            DividendSchedule::empty(),
        );

        let result = AnalyticDividendEuropeanEngine::new()
            .price(&option, &market)
            .unwrap();
        assert_eq!(result.price, 10.0);
        assert_eq!(result.greeks.unwrap(), Greeks::zero());
    }
}
