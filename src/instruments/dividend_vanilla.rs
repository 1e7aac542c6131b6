//! Vanilla option contract with an attached discrete cash-dividend schedule.
//!
//! [`DividendVanillaOption`] stores side, strike, maturity date, exercise
//! rights, and the dividend schedule known at trade time. One contract is
//! built per (type, strike, maturity) tuple and reused across every market
//! snapshot it is priced under.

use chrono::NaiveDate;

use crate::core::{ExerciseStyle, Instrument, OptionType, PricingError};
use crate::market::DividendSchedule;

/// European-style vanilla option on a discrete-dividend-paying underlying.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use divgreeks::core::OptionType;
/// use divgreeks::instruments::DividendVanillaOption;
/// use divgreeks::market::DividendSchedule;
///
/// let maturity = NaiveDate::from_ymd_opt(2005, 5, 17).unwrap();
/// let option =
///     DividendVanillaOption::european_call(100.0, maturity, DividendSchedule::empty());
/// assert_eq!(option.option_type, OptionType::Call);
/// assert!(option.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DividendVanillaOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level.
    pub strike: f64,
    /// Maturity date.
    pub maturity: NaiveDate,
    /// Exercise style.
    pub exercise: ExerciseStyle,
    /// Known discrete cash dividends before expiry.
    pub dividends: DividendSchedule,
}

impl DividendVanillaOption {
    /// Builds a European call with the given dividend schedule.
    pub fn european_call(strike: f64, maturity: NaiveDate, dividends: DividendSchedule) -> Self {
        Self {
            option_type: OptionType::Call,
            strike,
            maturity,
            exercise: ExerciseStyle::European,
            dividends,
        }
    }

    /// Builds a European put with the given dividend schedule.
    pub fn european_put(strike: f64, maturity: NaiveDate, dividends: DividendSchedule) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
            maturity,
            exercise: ExerciseStyle::European,
            dividends,
        }
    }

    /// Terminal payoff at a given underlying level.
    #[inline]
    pub fn payoff(&self, underlying: f64) -> f64 {
        (self.option_type.sign() * (underlying - self.strike)).max(0.0)
    }

    /// Short payoff description used in diagnostics.
    #[inline]
    pub fn payoff_description(&self) -> String {
        format!("plain-vanilla {} @ {}", self.option_type, self.strike)
    }

    /// Validates contract fields.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] when `strike <= 0` or the
    /// dividend schedule itself is malformed. The schedule-versus-dates window
    /// is checked at pricing time because it depends on the valuation date.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(PricingError::InvalidInput(
                "strike must be finite and > 0".to_string(),
            ));
        }
        self.dividends.validate()
    }
}

impl Instrument for DividendVanillaOption {
    fn instrument_type(&self) -> &str {
        "dividend_vanilla_option"
    }
}
