//! Closed-form analytic pricing engines.

pub mod black_scholes;
pub mod dividend_european;

pub use black_scholes::{bs_delta, bs_gamma, bs_price, bs_rho, bs_theta, bs_vega};
pub use dividend_european::AnalyticDividendEuropeanEngine;
