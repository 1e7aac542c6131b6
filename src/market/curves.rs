//! Flat term-structure and volatility-surface abstractions.
//!
//! Both types answer dated queries from one scalar, which is all the
//! dividend-option harness needs: a flat continuously compounded curve for
//! discounting and a flat Black volatility surface.

use chrono::NaiveDate;

use crate::rates::{year_fraction, DayCountConvention};

/// Flat continuously compounded term structure.
///
/// Returns the same zero rate regardless of the queried date; discount factors
/// are measured from the curve's reference date under its day count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve {
    reference_date: NaiveDate,
    rate: f64,
    day_count: DayCountConvention,
}

impl FlatCurve {
    /// Builds a flat curve anchored at `reference_date`.
    #[inline]
    pub fn new(reference_date: NaiveDate, rate: f64, day_count: DayCountConvention) -> Self {
        Self {
            reference_date,
            rate,
            day_count,
        }
    }

    /// The date discount factors are measured from.
    #[inline]
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// The flat continuously compounded zero rate.
    #[inline]
    pub fn zero_rate(&self) -> f64 {
        self.rate
    }

    /// Discount factor from the reference date to `date`.
    ///
    /// Dates at or before the reference date discount to 1.0.
    pub fn discount_factor(&self, date: NaiveDate) -> f64 {
        let t = year_fraction(self.reference_date, date, self.day_count);
        if t <= 0.0 {
            return 1.0;
        }
        (-self.rate * t).exp()
    }
}

/// Flat Black volatility surface.
///
/// Returns the same volatility regardless of expiry date and strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatVolatility {
    vol: f64,
}

impl FlatVolatility {
    /// Builds a flat surface from one scalar volatility.
    #[inline]
    pub fn new(vol: f64) -> Self {
        Self { vol }
    }

    /// Black volatility for the requested expiry date and strike.
    #[inline]
    pub fn black_vol(&self, _expiry: NaiveDate, _strike: f64) -> f64 {
        self.vol
    }
}
