//! Dated discrete cash-dividend schedules.
//!
//! A schedule is the known list of (ex-date, cash amount) pairs for one
//! contract. The analytic engine subtracts the schedule's present value from
//! spot (escrowed-dividend treatment, Haug-Haug-Lewis 2003), so every ex-date
//! must fall strictly after the valuation date and no later than maturity;
//! anything else is a data-integrity error, not a warning.

use chrono::NaiveDate;

use crate::core::PricingError;
use crate::market::curves::FlatCurve;
use crate::rates::add_months;

/// One known cash dividend.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CashDividend {
    /// Ex-dividend date.
    pub ex_date: NaiveDate,
    /// Cash amount per share.
    pub amount: f64,
}

impl CashDividend {
    /// Builds a validated cash dividend.
    pub fn new(ex_date: NaiveDate, amount: f64) -> Result<Self, PricingError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(PricingError::InvalidInput(
                "cash dividend amount must be finite and >= 0".to_string(),
            ));
        }
        Ok(Self { ex_date, amount })
    }
}

/// Ordered schedule of discrete cash dividends for one contract.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct DividendSchedule {
    events: Vec<CashDividend>,
}

impl DividendSchedule {
    /// Builds a schedule from events, sorting by ex-date and validating amounts
    /// and strictly increasing dates.
    pub fn new(mut events: Vec<CashDividend>) -> Result<Self, PricingError> {
        events.sort_by_key(|ev| ev.ex_date);
        let schedule = Self { events };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Returns an empty schedule.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cash amount `amount` every six months, starting three months after
    /// `valuation_date`, up to but not including `maturity`.
    ///
    /// This is the standard fixture schedule for dividend-option regression
    /// grids; the resulting dates always satisfy the contract window.
    pub fn semiannual(
        valuation_date: NaiveDate,
        maturity: NaiveDate,
        amount: f64,
    ) -> Result<Self, PricingError> {
        let mut events = Vec::new();
        let mut ex_date = add_months(valuation_date, 3);
        while ex_date < maturity {
            events.push(CashDividend::new(ex_date, amount)?);
            ex_date = add_months(ex_date, 6);
        }
        Self::new(events)
    }

    /// Returns `true` when no events are present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// The underlying date-sorted event slice.
    #[inline]
    pub fn events(&self) -> &[CashDividend] {
        &self.events
    }

    /// Validates amounts and strictly increasing ex-dates.
    pub fn validate(&self) -> Result<(), PricingError> {
        let mut prev: Option<NaiveDate> = None;
        for event in &self.events {
            if !event.amount.is_finite() || event.amount < 0.0 {
                return Err(PricingError::InvalidInput(
                    "cash dividend amount must be finite and >= 0".to_string(),
                ));
            }
            if let Some(prev_date) = prev {
                if event.ex_date <= prev_date {
                    return Err(PricingError::InvalidInput(
                        "dividend ex-dates must be strictly increasing".to_string(),
                    ));
                }
            }
            prev = Some(event.ex_date);
        }
        Ok(())
    }

    /// Checks that every ex-date lies in `(valuation_date, maturity]`.
    ///
    /// The escrowed adjustment only makes sense for dividends that are still
    /// owed but paid before (or at) expiry, so a date outside the window is a
    /// domain error for the contract as a whole.
    pub fn validate_window(
        &self,
        valuation_date: NaiveDate,
        maturity: NaiveDate,
    ) -> Result<(), PricingError> {
        for event in &self.events {
            if event.ex_date <= valuation_date || event.ex_date > maturity {
                return Err(PricingError::InvalidInput(format!(
                    "dividend ex-date {} outside ({}, {}]",
                    event.ex_date, valuation_date, maturity
                )));
            }
        }
        Ok(())
    }

    /// Present value of the schedule under a discount curve.
    ///
    /// Events at or before the curve's reference date carry no remaining value
    /// and are excluded.
    pub fn present_value(&self, curve: &FlatCurve) -> f64 {
        self.events
            .iter()
            .filter(|ev| ev.ex_date > curve.reference_date())
            .map(|ev| ev.amount * curve.discount_factor(ev.ex_date))
            .sum()
    }
}
