//! Instrument definitions.

pub mod dividend_vanilla;

pub use dividend_vanilla::DividendVanillaOption;
