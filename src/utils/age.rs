//! Age in months from calendar dates.
//!
//! Ages are whole calendar months between the two dates plus the difference in
//! day-of-month divided by 30. This is an approximation (months are not all 30
//! days long), but it is the contract the reference tables are read with, so
//! results match other tools using the same convention.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Day count used for the fractional part of a month
pub const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgeError {
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Measurement date {measured} is before birth date {birth}")]
    MeasuredBeforeBirth {
        birth: NaiveDate,
        measured: NaiveDate,
    },
}

/// Parse a `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns `AgeError::InvalidDate` if the string is not a valid date.
pub fn parse_date(s: &str) -> Result<NaiveDate, AgeError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| AgeError::InvalidDate(s.to_string()))
}

/// Age in (fractional) months on `measured` for a child born on `birth`
///
/// # Errors
///
/// Returns `AgeError::MeasuredBeforeBirth` if `measured` precedes `birth`.
pub fn age_in_months(birth: NaiveDate, measured: NaiveDate) -> Result<f64, AgeError> {
    if measured < birth {
        return Err(AgeError::MeasuredBeforeBirth { birth, measured });
    }

    // Month and day components are at most 31, so these casts cannot wrap
    #[allow(clippy::cast_possible_wrap)]
    let (whole_months, day_difference) = (
        (measured.year() - birth.year()) * 12 + measured.month() as i32 - birth.month() as i32,
        measured.day() as i32 - birth.day() as i32,
    );

    Ok(f64::from(whole_months) + f64::from(day_difference) / DAYS_PER_MONTH)
}

/// Convenience wrapper over [`parse_date`] and [`age_in_months`]
///
/// # Errors
///
/// Returns an `AgeError` if either date is invalid or out of order.
pub fn age_in_months_from_str(birth: &str, measured: &str) -> Result<f64, AgeError> {
    age_in_months(parse_date(birth)?, parse_date(measured)?)
}
