//! Differential testing of analytic Greeks against finite differences.
//!
//! [`FiniteDifferenceValidator`] re-derives every Greek numerically from
//! symmetric perturbations of an immutable [`Market`] snapshot; [`grid`]
//! sweeps a fixed parameter grid and collects every tolerance breach as a
//! structured [`report::ToleranceViolation`].

pub mod grid;
pub mod report;

pub use grid::{GridConfig, GridReport, GridRunner};
pub use report::ToleranceViolation;

use crate::core::{Greeks, Instrument, PricingEngine, PricingError, PricingResult};
use crate::market::Market;
use crate::rates::{add_days, year_fraction};

/// Relative error of `calculated` against `expected`, normalized by
/// `reference_scale` (the current spot), or absolute when the scale is zero.
///
/// Normalizing every Greek by the same spot scale keeps one tolerance
/// meaningful across Greeks of very different magnitudes.
#[inline]
pub fn relative_error(expected: f64, calculated: f64, reference_scale: f64) -> f64 {
    if reference_scale != 0.0 {
        (expected - calculated).abs() / reference_scale
    } else {
        (expected - calculated).abs()
    }
}

/// Central finite-difference estimator for the five analytic Greeks.
///
/// Each estimate prices freshly built snapshots with exactly one field
/// replaced, so nothing has to be restored between comparisons:
/// - `delta  = (NPV(S+dS) - NPV(S-dS)) / 2dS` with `dS = S * spot_bump`
/// - `gamma  = (delta(S+dS) - delta(S-dS)) / 2dS` using the engine's
///   *analytic* delta at the perturbed spots
/// - `rho    = (NPV(r+dr) - NPV(r-dr)) / 2dr` with `dr = r * rate_bump`
/// - `vega   = (NPV(v+dv) - NPV(v-dv)) / 2dv` with `dv = v * vol_bump`
/// - `theta  = (NPV@(t+1d) - NPV@(t-1d)) / yearFraction(t-1d, t+1d)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifferenceValidator {
    /// Relative spot bump.
    pub spot_bump: f64,
    /// Relative rate bump.
    pub rate_bump: f64,
    /// Relative volatility bump.
    pub vol_bump: f64,
    /// Calendar days for the theta valuation-date shift.
    pub date_shift_days: i64,
}

impl Default for FiniteDifferenceValidator {
    fn default() -> Self {
        Self {
            spot_bump: 1.0e-4,
            rate_bump: 1.0e-4,
            vol_bump: 1.0e-4,
            date_shift_days: 1,
        }
    }
}

impl FiniteDifferenceValidator {
    /// Validator with the standard 1e-4 relative bumps and one-day theta shift.
    pub fn new() -> Self {
        Self::default()
    }

    /// Numerically estimates all five Greeks for `instrument` at `market`.
    ///
    /// # Errors
    /// Propagates any [`PricingError`] from the engine, and fails when a bump
    /// degenerates to zero (a zero rate or volatility cannot be perturbed
    /// relatively) or when the engine withholds analytic Greeks, which the
    /// gamma estimate needs.
    pub fn expected_greeks<I, E>(
        &self,
        engine: &E,
        instrument: &I,
        market: &Market,
    ) -> Result<Greeks, PricingError>
    where
        I: Instrument,
        E: PricingEngine<I>,
    {
        let spot = market.spot;
        let du = spot * self.spot_bump;
        let dr = market.rate * self.rate_bump;
        let dv = market.vol * self.vol_bump;
        if du <= 0.0 || dr <= 0.0 || dv <= 0.0 {
            return Err(PricingError::InvalidInput(
                "relative bumps require positive spot, rate, and volatility".to_string(),
            ));
        }

        // Spot perturbation gives delta from prices and gamma from the
        // engine's analytic deltas at the shifted spots.
        let up = engine.price(instrument, &market.with_spot(spot + du))?;
        let down = engine.price(instrument, &market.with_spot(spot - du))?;
        let delta = (up.price - down.price) / (2.0 * du);
        let gamma = (analytic_delta(&up)? - analytic_delta(&down)?) / (2.0 * du);

        let rho_up = engine.price(instrument, &market.with_rate(market.rate + dr))?;
        let rho_down = engine.price(instrument, &market.with_rate(market.rate - dr))?;
        let rho = (rho_up.price - rho_down.price) / (2.0 * dr);

        let vega_up = engine.price(instrument, &market.with_vol(market.vol + dv))?;
        let vega_down = engine.price(instrument, &market.with_vol(market.vol - dv))?;
        let vega = (vega_up.price - vega_down.price) / (2.0 * dv);

        let yesterday = add_days(market.valuation_date, -self.date_shift_days);
        let tomorrow = add_days(market.valuation_date, self.date_shift_days);
        let theta_up = engine.price(instrument, &market.with_valuation_date(tomorrow))?;
        let theta_down = engine.price(instrument, &market.with_valuation_date(yesterday))?;
        let dt = year_fraction(yesterday, tomorrow, market.day_count);
        let theta = (theta_up.price - theta_down.price) / dt;

        Ok(Greeks {
            delta,
            gamma,
            vega,
            theta,
            rho,
        })
    }
}

fn analytic_delta(result: &PricingResult) -> Result<f64, PricingError> {
    result
        .greeks
        .map(|g| g.delta)
        .ok_or_else(|| PricingError::NumericalError("engine returned no analytic Greeks".to_string()))
}
