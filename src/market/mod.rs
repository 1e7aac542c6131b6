//! Market snapshot, flat curve/surface abstractions, and dividend schedules.

pub mod curves;
pub mod dividends;

pub use curves::{FlatCurve, FlatVolatility};
pub use dividends::{CashDividend, DividendSchedule};

use chrono::NaiveDate;

use crate::core::PricingError;
use crate::rates::{year_fraction, DayCountConvention};

/// Immutable market snapshot used by all pricing calls.
///
/// A snapshot is a plain value: perturbing one field for a finite-difference
/// estimate means building a new snapshot with `with_*`, never mutating shared
/// state. Repricing the same snapshot therefore always reproduces the same
/// NPV bit for bit, and grid iterations cannot leak state into one another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Market {
    /// Valuation date all curves and year fractions are anchored to.
    pub valuation_date: NaiveDate,
    /// Spot price.
    pub spot: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Continuously compounded dividend yield.
    pub dividend_yield: f64,
    /// Flat Black volatility.
    pub vol: f64,
    /// Day-count convention for year fractions.
    pub day_count: DayCountConvention,
}

impl Market {
    /// Starts a market builder.
    #[inline]
    pub fn builder() -> MarketBuilder {
        MarketBuilder::default()
    }

    /// Year fraction from the valuation date to `date`.
    #[inline]
    pub fn time_to(&self, date: NaiveDate) -> f64 {
        year_fraction(self.valuation_date, date, self.day_count)
    }

    /// Risk-free discount curve anchored at the valuation date.
    #[inline]
    pub fn discount_curve(&self) -> FlatCurve {
        FlatCurve::new(self.valuation_date, self.rate, self.day_count)
    }

    /// Dividend-yield curve anchored at the valuation date.
    #[inline]
    pub fn dividend_curve(&self) -> FlatCurve {
        FlatCurve::new(self.valuation_date, self.dividend_yield, self.day_count)
    }

    /// Flat Black volatility surface view.
    #[inline]
    pub fn vol_surface(&self) -> FlatVolatility {
        FlatVolatility::new(self.vol)
    }

    /// Copy with the spot replaced.
    #[inline]
    pub fn with_spot(&self, spot: f64) -> Self {
        Self { spot, ..*self }
    }

    /// Copy with the risk-free rate replaced.
    #[inline]
    pub fn with_rate(&self, rate: f64) -> Self {
        Self { rate, ..*self }
    }

    /// Copy with the dividend yield replaced.
    #[inline]
    pub fn with_dividend_yield(&self, dividend_yield: f64) -> Self {
        Self {
            dividend_yield,
            ..*self
        }
    }

    /// Copy with the volatility replaced.
    #[inline]
    pub fn with_vol(&self, vol: f64) -> Self {
        Self { vol, ..*self }
    }

    /// Copy with the valuation date replaced.
    ///
    /// Shifting the date shortens or lengthens every year fraction derived from
    /// the snapshot, which is exactly what the theta day-shift needs.
    #[inline]
    pub fn with_valuation_date(&self, valuation_date: NaiveDate) -> Self {
        Self {
            valuation_date,
            ..*self
        }
    }
}

/// Builder for [`Market`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketBuilder {
    valuation_date: Option<NaiveDate>,
    spot: Option<f64>,
    rate: Option<f64>,
    dividend_yield: Option<f64>,
    flat_vol: Option<f64>,
    day_count: Option<DayCountConvention>,
}

impl MarketBuilder {
    /// Sets the valuation date.
    #[inline]
    pub fn valuation_date(mut self, valuation_date: NaiveDate) -> Self {
        self.valuation_date = Some(valuation_date);
        self
    }

    /// Sets the spot price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the flat risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Sets the flat Black volatility.
    #[inline]
    pub fn flat_vol(mut self, vol: f64) -> Self {
        self.flat_vol = Some(vol);
        self
    }

    /// Sets the day-count convention (defaults to Act/365 Fixed).
    #[inline]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Validates and builds a [`Market`].
    pub fn build(self) -> Result<Market, PricingError> {
        let valuation_date = self.valuation_date.ok_or_else(|| {
            PricingError::MarketDataMissing("market valuation date is required".to_string())
        })?;

        let spot = self
            .spot
            .ok_or_else(|| PricingError::MarketDataMissing("market spot is required".to_string()))?;
        if !spot.is_finite() || spot <= 0.0 {
            return Err(PricingError::InvalidInput(
                "market spot must be finite and > 0".to_string(),
            ));
        }

        let vol = self.flat_vol.ok_or_else(|| {
            PricingError::MarketDataMissing("market flat_vol is required".to_string())
        })?;
        if !vol.is_finite() || vol < 0.0 {
            return Err(PricingError::InvalidInput(
                "market flat_vol must be finite and >= 0".to_string(),
            ));
        }

        let rate = self.rate.unwrap_or(0.0);
        let dividend_yield = self.dividend_yield.unwrap_or(0.0);
        if !rate.is_finite() || !dividend_yield.is_finite() {
            return Err(PricingError::InvalidInput(
                "market rates must be finite".to_string(),
            ));
        }

        Ok(Market {
            valuation_date,
            spot,
            rate,
            dividend_yield,
            vol,
            day_count: self.day_count.unwrap_or_default(),
        })
    }
}
