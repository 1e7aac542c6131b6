//! Day-count conventions converting date pairs to elapsed year fractions.
//!
//! Conventions follow standard market definitions; Act/365 Fixed is the crate
//! default for equity-option time to expiry.

use chrono::{Datelike, NaiveDate};

/// Supported day-count conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum DayCountConvention {
    /// Actual day count over a 360-day year.
    Act360,
    /// Actual day count over a 365-day year.
    #[default]
    Act365Fixed,
    /// ISDA actual/actual convention.
    ActActISDA,
}

/// Computes the year fraction between two dates under a day-count convention.
///
/// Edge cases:
/// - If `start == end`, returns `0.0`.
/// - If `start > end`, the result is negative and antisymmetric.
///
/// # Examples
/// ```rust
/// use chrono::NaiveDate;
/// use divgreeks::rates::{year_fraction, DayCountConvention};
///
/// let s = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let e = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let yf = year_fraction(s, e, DayCountConvention::Act365Fixed);
/// assert!((yf - 1.0).abs() < 1.0e-8);
/// ```
pub fn year_fraction(start: NaiveDate, end: NaiveDate, convention: DayCountConvention) -> f64 {
    if start == end {
        return 0.0;
    }
    if start > end {
        return -year_fraction(end, start, convention);
    }

    match convention {
        DayCountConvention::Act360 => (end - start).num_days() as f64 / 360.0,
        DayCountConvention::Act365Fixed => (end - start).num_days() as f64 / 365.0,
        DayCountConvention::ActActISDA => year_fraction_act_act_isda(start, end),
    }
}

fn year_fraction_act_act_isda(start: NaiveDate, end: NaiveDate) -> f64 {
    if start.year() == end.year() {
        return (end - start).num_days() as f64 / days_in_year(start.year()) as f64;
    }

    let start_of_next_year = NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
        .expect("january 1st is always a valid date");
    let start_of_end_year =
        NaiveDate::from_ymd_opt(end.year(), 1, 1).expect("january 1st is always a valid date");

    let whole_years = (end.year() - start.year() - 1) as f64;
    (start_of_next_year - start).num_days() as f64 / days_in_year(start.year()) as f64
        + whole_years
        + (end - start_of_end_year).num_days() as f64 / days_in_year(end.year()) as f64
}

fn days_in_year(year: i32) -> i32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
