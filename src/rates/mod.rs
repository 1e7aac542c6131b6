//! Date arithmetic and day-count conventions used by schedules and pricing.

pub mod calendar;
pub mod day_count;

pub use calendar::{add_days, add_months, add_years};
pub use day_count::{year_fraction, DayCountConvention};
