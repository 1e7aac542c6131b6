//! Structured diagnostic records for tolerance breaches.

use chrono::NaiveDate;

use crate::core::{ExerciseStyle, GreekKind, OptionType};

/// One analytic-versus-finite-difference mismatch beyond tolerance.
///
/// The structured fields are the contract; the `Display` rendering is
/// presentation only and carries no control flow.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToleranceViolation {
    /// Exercise style of the offending contract.
    pub exercise: ExerciseStyle,
    /// Call or put.
    pub option_type: OptionType,
    /// Payoff description.
    pub payoff: String,
    /// Spot value of the grid cell.
    pub spot: f64,
    /// Strike.
    pub strike: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
    /// Risk-free rate.
    pub rate: f64,
    /// Valuation date.
    pub valuation_date: NaiveDate,
    /// Maturity date.
    pub maturity: NaiveDate,
    /// Flat volatility.
    pub volatility: f64,
    /// Which Greek broke tolerance.
    pub greek: GreekKind,
    /// Finite-difference estimate.
    pub expected: f64,
    /// Analytic engine value.
    pub calculated: f64,
    /// Spot-normalized relative error.
    pub error: f64,
    /// Tolerance the error exceeded.
    pub tolerance: f64,
}

impl std::fmt::Display for ToleranceViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} {} option with {} payoff:",
            self.exercise, self.option_type, self.payoff
        )?;
        writeln!(f, "    spot value:       {}", self.spot)?;
        writeln!(f, "    strike:           {}", self.strike)?;
        writeln!(f, "    dividend yield:   {}", self.dividend_yield)?;
        writeln!(f, "    risk-free rate:   {}", self.rate)?;
        writeln!(f, "    valuation date:   {}", self.valuation_date)?;
        writeln!(f, "    maturity:         {}", self.maturity)?;
        writeln!(f, "    volatility:       {}", self.volatility)?;
        writeln!(f)?;
        writeln!(f, "    expected   {}: {}", self.greek, self.expected)?;
        writeln!(f, "    calculated {}: {}", self.greek, self.calculated)?;
        writeln!(f, "    error:            {:e}", self.error)?;
        write!(f, "    tolerance:        {:e}", self.tolerance)
    }
}
