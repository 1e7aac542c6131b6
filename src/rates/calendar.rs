//! Calendar-date arithmetic for schedule generation and valuation-date shifts.

use chrono::{Duration, Months, NaiveDate};

/// Shifts a date by a signed number of calendar days.
///
/// # Examples
/// ```rust
/// use chrono::NaiveDate;
/// use divgreeks::rates::add_days;
///
/// let d = NaiveDate::from_ymd_opt(2004, 5, 17).unwrap();
/// assert_eq!(add_days(d, -1), NaiveDate::from_ymd_opt(2004, 5, 16).unwrap());
/// ```
#[inline]
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Shifts a date by a signed number of calendar months.
///
/// Day-of-month is clamped to the end of the target month, matching market
/// calendar conventions (for example Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new((-months) as u32))
    };
    shifted.expect("month arithmetic stays within chrono's representable range")
}

/// Shifts a date by a signed number of calendar years.
#[inline]
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    add_months(date, 12 * years)
}
