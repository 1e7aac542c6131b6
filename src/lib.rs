//! Divgreeks prices European options on underlyings that pay known discrete cash
//! dividends and cross-checks the analytic Greeks against central finite
//! differences.
//!
//! The crate has two tightly coupled halves:
//! - an analytic escrowed-dividend Black-Scholes-Merton engine
//!   ([`engines::analytic::AnalyticDividendEuropeanEngine`]) producing NPV plus
//!   delta, gamma, theta, rho, and vega;
//! - a differential-testing harness ([`validation`]) that re-derives every Greek
//!   numerically by symmetric perturbation of an immutable market snapshot and
//!   sweeps a fixed grid of contract and market parameters, collecting every
//!   tolerance breach from one run.
//!
//! References:
//! - Hull, *Options, Futures, and Other Derivatives* (11th ed.), Ch. 13 and 15.
//! - Haug, Haug, Lewis (2003) for the escrowed-dividend spot adjustment.
//!
//! Numerical considerations:
//! - Market snapshots are immutable values; a perturbation builds a new snapshot
//!   with one field replaced, so grid iterations cannot contaminate each other.
//! - Zero volatility is priced on a deterministic discounted-intrinsic branch
//!   with zero Greeks rather than dividing by zero.
//! - Combinations whose baseline NPV is numerically negligible are skipped by
//!   the differential comparison; relative error against a near-zero reference
//!   carries no information.
//!
//! # Quick Start
//! Price a dividend-paying European call:
//! ```rust
//! use chrono::NaiveDate;
//! use divgreeks::core::PricingEngine;
//! use divgreeks::engines::analytic::AnalyticDividendEuropeanEngine;
//! use divgreeks::instruments::DividendVanillaOption;
//! use divgreeks::market::{CashDividend, DividendSchedule, Market};
//!
//! let valuation = NaiveDate::from_ymd_opt(2004, 5, 17).unwrap();
//! let maturity = NaiveDate::from_ymd_opt(2005, 5, 17).unwrap();
//! let ex_date = NaiveDate::from_ymd_opt(2004, 11, 17).unwrap();
//!
//! let dividends = DividendSchedule::new(vec![CashDividend::new(ex_date, 2.0).unwrap()]).unwrap();
//! let option = DividendVanillaOption::european_call(100.0, maturity, dividends);
//! let market = Market::builder()
//!     .valuation_date(valuation)
//!     .spot(100.0)
//!     .rate(0.05)
//!     .dividend_yield(0.0)
//!     .flat_vol(0.20)
//!     .build()
//!     .unwrap();
//!
//! let result = AnalyticDividendEuropeanEngine::new().price(&option, &market).unwrap();
//! assert!(result.price > 0.0 && result.price < 100.0);
//! ```
//!
//! Validate the analytic Greeks over the default parameter grid:
//! ```rust
//! use chrono::NaiveDate;
//! use divgreeks::validation::grid::{GridConfig, GridRunner};
//!
//! let valuation = NaiveDate::from_ymd_opt(2004, 5, 17).unwrap();
//! let report = GridRunner::new(GridConfig::default()).run(valuation);
//! assert!(report.violations.is_empty());
//! ```

pub mod core;
pub mod engines;
pub mod instruments;
pub mod market;
pub mod math;
pub mod rates;
pub mod validation;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::engines::analytic::*;
    pub use crate::instruments::*;
    pub use crate::market::*;
    pub use crate::rates::*;
    pub use crate::validation::*;
}
