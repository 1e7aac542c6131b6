//! Exhaustive parameter-grid sweep comparing analytic and numerical Greeks.
//!
//! The runner iterates the full Cartesian product of option type, strike,
//! maturity, spot, dividend yield, risk-free rate, and volatility. One
//! contract is built per (type, strike, maturity) tuple with a semiannual
//! dividend schedule and reused across every market combination for that
//! maturity. The sweep always runs to completion so that a single run
//! surfaces every mismatch: pricing errors abort only their own tuple, and
//! combinations with numerically negligible value are skipped rather than
//! compared against a meaningless near-zero reference.

use chrono::NaiveDate;

use crate::core::{GreekKind, OptionType, PricingEngine, PricingError};
use crate::engines::analytic::AnalyticDividendEuropeanEngine;
use crate::instruments::DividendVanillaOption;
use crate::market::{DividendSchedule, Market};
use crate::rates::add_years;
use crate::validation::report::ToleranceViolation;
use crate::validation::{relative_error, FiniteDifferenceValidator};

/// Per-Greek tolerance table for spot-normalized relative errors.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GreekTolerances {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub rho: f64,
    pub vega: f64,
}

impl GreekTolerances {
    /// The same tolerance for every Greek.
    pub fn uniform(tolerance: f64) -> Self {
        Self {
            delta: tolerance,
            gamma: tolerance,
            theta: tolerance,
            rho: tolerance,
            vega: tolerance,
        }
    }

    /// Tolerance for one Greek.
    #[inline]
    pub fn get(&self, kind: GreekKind) -> f64 {
        match kind {
            GreekKind::Delta => self.delta,
            GreekKind::Gamma => self.gamma,
            GreekKind::Theta => self.theta,
            GreekKind::Rho => self.rho,
            GreekKind::Vega => self.vega,
        }
    }
}

impl Default for GreekTolerances {
    fn default() -> Self {
        Self::uniform(1.0e-5)
    }
}

/// Fixed parameter grid and comparison thresholds for one sweep.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridConfig {
    /// Option sides to sweep.
    pub option_types: Vec<OptionType>,
    /// Strike levels.
    pub strikes: Vec<f64>,
    /// Contract maturities in whole years from the valuation date.
    pub maturities_years: Vec<i32>,
    /// Spot levels.
    pub underlyings: Vec<f64>,
    /// Continuous dividend yields.
    pub dividend_yields: Vec<f64>,
    /// Risk-free rates.
    pub rates: Vec<f64>,
    /// Flat volatilities.
    pub vols: Vec<f64>,
    /// Cash amount of each semiannual dividend.
    pub dividend_amount: f64,
    /// Per-Greek tolerances on spot-normalized relative error.
    pub tolerances: GreekTolerances,
    /// Baseline NPVs at or below `spot * negligible_npv_factor` are skipped.
    pub negligible_npv_factor: f64,
}

impl Default for GridConfig {
    /// The reference regression fixture: 2 sides x 5 strikes x 2 maturities x
    /// 1 spot x 3 yields x 3 rates x 3 vols, with 5.0 paid semiannually.
    fn default() -> Self {
        Self {
            option_types: vec![OptionType::Call, OptionType::Put],
            strikes: vec![50.0, 99.5, 100.0, 100.5, 150.0],
            maturities_years: vec![1, 2],
            underlyings: vec![100.0],
            dividend_yields: vec![0.00, 0.10, 0.30],
            rates: vec![0.01, 0.05, 0.15],
            vols: vec![0.05, 0.20, 0.70],
            dividend_amount: 5.0,
            tolerances: GreekTolerances::default(),
            negligible_npv_factor: 1.0e-5,
        }
    }
}

/// Outcome of one grid sweep.
#[derive(Debug, Clone, Default)]
pub struct GridReport {
    /// Combinations fully compared against finite differences.
    pub evaluated: usize,
    /// Combinations skipped for negligible baseline NPV. Deliberate: relative
    /// error against a near-zero reference is neither a pass nor a fail.
    pub skipped: usize,
    /// Every tolerance breach found, one record per (combination, Greek).
    pub violations: Vec<ToleranceViolation>,
    /// Pricing failures; each aborted only its own combination.
    pub errors: Vec<GridError>,
}

impl GridReport {
    /// True when the sweep produced neither violations nor errors.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.errors.is_empty()
    }
}

impl std::fmt::Display for GridReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "grid sweep: {} evaluated, {} skipped, {} violations, {} errors",
            self.evaluated,
            self.skipped,
            self.violations.len(),
            self.errors.len()
        )
    }
}

/// A pricing failure at one point of the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct GridError {
    /// Human-readable location of the failing combination.
    pub context: String,
    /// The underlying failure.
    pub error: PricingError,
}

/// Drives the engine and the finite-difference validator across [`GridConfig`].
#[derive(Debug, Clone, Default)]
pub struct GridRunner {
    config: GridConfig,
    engine: AnalyticDividendEuropeanEngine,
    validator: FiniteDifferenceValidator,
}

impl GridRunner {
    /// Runner with the standard validator bumps.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            engine: AnalyticDividendEuropeanEngine::new(),
            validator: FiniteDifferenceValidator::new(),
        }
    }

    /// Runner with custom finite-difference bumps.
    pub fn with_validator(config: GridConfig, validator: FiniteDifferenceValidator) -> Self {
        Self {
            config,
            engine: AnalyticDividendEuropeanEngine::new(),
            validator,
        }
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Sweeps the whole grid from `valuation_date` and reports every mismatch.
    pub fn run(&self, valuation_date: NaiveDate) -> GridReport {
        let mut report = GridReport::default();

        for &option_type in &self.config.option_types {
            for &strike in &self.config.strikes {
                for &years in &self.config.maturities_years {
                    let maturity = add_years(valuation_date, years);
                    let contract_context = format!(
                        "{option_type} K={strike} maturity={maturity}"
                    );

                    let dividends = match DividendSchedule::semiannual(
                        valuation_date,
                        maturity,
                        self.config.dividend_amount,
                    ) {
                        Ok(schedule) => schedule,
                        Err(error) => {
                            report.errors.push(GridError {
                                context: contract_context,
                                error,
                            });
                            continue;
                        }
                    };

                    let option = DividendVanillaOption {
                        option_type,
                        strike,
                        maturity,
                        exercise: crate::core::ExerciseStyle::European,
                        dividends,
                    };

                    self.sweep_markets(valuation_date, &option, &contract_context, &mut report);
                }
            }
        }

        report
    }

    /// Inner spot/yield/rate/vol sweep for one contract.
    fn sweep_markets(
        &self,
        valuation_date: NaiveDate,
        option: &DividendVanillaOption,
        contract_context: &str,
        report: &mut GridReport,
    ) {
        for &spot in &self.config.underlyings {
            for &dividend_yield in &self.config.dividend_yields {
                for &rate in &self.config.rates {
                    for &vol in &self.config.vols {
                        let context = format!(
                            "{contract_context} S={spot} q={dividend_yield} r={rate} v={vol}"
                        );

                        let market = match Market::builder()
                            .valuation_date(valuation_date)
                            .spot(spot)
                            .rate(rate)
                            .dividend_yield(dividend_yield)
                            .flat_vol(vol)
                            .build()
                        {
                            Ok(market) => market,
                            Err(error) => {
                                report.errors.push(GridError { context, error });
                                continue;
                            }
                        };

                        self.compare_cell(option, &market, context, report);
                    }
                }
            }
        }
    }

    /// Prices one grid cell, derives expected Greeks, and records breaches.
    fn compare_cell(
        &self,
        option: &DividendVanillaOption,
        market: &Market,
        context: String,
        report: &mut GridReport,
    ) {
        let result = match self.engine.price(option, market) {
            Ok(result) => result,
            Err(error) => {
                report.errors.push(GridError { context, error });
                return;
            }
        };

        if result.price <= market.spot * self.config.negligible_npv_factor {
            report.skipped += 1;
            return;
        }

        let calculated = match result.greeks {
            Some(greeks) => greeks,
            None => {
                report.errors.push(GridError {
                    context,
                    error: PricingError::NumericalError(
                        "engine returned no analytic Greeks".to_string(),
                    ),
                });
                return;
            }
        };

        let expected = match self
            .validator
            .expected_greeks(&self.engine, option, market)
        {
            Ok(greeks) => greeks,
            Err(error) => {
                report.errors.push(GridError { context, error });
                return;
            }
        };

        report.evaluated += 1;
        for kind in GreekKind::ALL {
            let exp = kind.pick(&expected);
            let calc = kind.pick(&calculated);
            let error = relative_error(exp, calc, market.spot);
            let tolerance = self.config.tolerances.get(kind);
            if error > tolerance {
                report.violations.push(ToleranceViolation {
                    exercise: option.exercise,
                    option_type: option.option_type,
                    payoff: option.payoff_description(),
                    spot: market.spot,
                    strike: option.strike,
                    dividend_yield: market.dividend_yield,
                    rate: market.rate,
                    valuation_date: market.valuation_date,
                    maturity: option.maturity,
                    volatility: market.vol,
                    greek: kind,
                    expected: exp,
                    calculated: calc,
                    error,
                    tolerance,
                });
            }
        }
    }
}
