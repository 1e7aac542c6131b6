//! Core traits, common domain types, and library-wide result/error structures.

use crate::market::Market;

pub mod types;

pub use types::*;

/// Standardized Greeks container used by engine results.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Greeks {
    /// First derivative to spot.
    pub delta: f64,
    /// Second derivative to spot.
    pub gamma: f64,
    /// First derivative to volatility.
    pub vega: f64,
    /// First derivative to time.
    pub theta: f64,
    /// First derivative to rate.
    pub rho: f64,
}

impl Greeks {
    /// All-zero Greeks, used on degenerate branches (expired or zero-vol contracts).
    #[inline]
    pub fn zero() -> Self {
        Self {
            delta: 0.0,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            rho: 0.0,
        }
    }
}

/// Identifies one Greek in reports and uniform comparison loops.
///
/// A fixed enum rather than a string-keyed map keeps the comparison loop
/// typo-proof while still allowing generic iteration via [`GreekKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GreekKind {
    Delta,
    Gamma,
    Theta,
    Rho,
    Vega,
}

impl GreekKind {
    /// Every Greek the analytic engine produces, in reporting order.
    pub const ALL: [GreekKind; 5] = [
        Self::Delta,
        Self::Gamma,
        Self::Theta,
        Self::Rho,
        Self::Vega,
    ];

    /// Lower-case name used in diagnostics.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delta => "delta",
            Self::Gamma => "gamma",
            Self::Theta => "theta",
            Self::Rho => "rho",
            Self::Vega => "vega",
        }
    }

    /// Reads the matching field out of a [`Greeks`] record.
    #[inline]
    pub fn pick(self, greeks: &Greeks) -> f64 {
        match self {
            Self::Delta => greeks.delta,
            Self::Gamma => greeks.gamma,
            Self::Theta => greeks.theta,
            Self::Rho => greeks.rho,
            Self::Vega => greeks.vega,
        }
    }
}

impl std::fmt::Display for GreekKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait implemented by every priceable instrument.
pub trait Instrument: std::fmt::Debug {
    /// Returns a short type identifier for diagnostics.
    fn instrument_type(&self) -> &str;
}

/// Pricing engine abstraction over an instrument type.
pub trait PricingEngine<I: Instrument> {
    /// Prices an instrument under the provided market snapshot.
    fn price(&self, instrument: &I, market: &Market) -> Result<PricingResult, PricingError>;
}

/// Unified engine result payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingResult {
    /// Present value.
    pub price: f64,
    /// Greeks when available from the engine.
    pub greeks: Option<Greeks>,
}

/// Engine and model errors surfaced by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Input validation error: negative volatility, non-positive strike,
    /// dividend ex-dates outside the contract window, unsupported exercise.
    InvalidInput(String),
    /// Required market datum is unavailable.
    MarketDataMissing(String),
    /// Numerical issue (non-finite intermediate, exhausted effective spot, etc.).
    NumericalError(String),
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::MarketDataMissing(msg) => write!(f, "market data missing: {msg}"),
            Self::NumericalError(msg) => write!(f, "numerical error: {msg}"),
        }
    }
}

impl std::error::Error for PricingError {}
