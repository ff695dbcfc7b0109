//! Time types for trade booking and cashflow generation.
//!
//! This module provides `Date`, a type-safe wrapper around
//! `chrono::NaiveDate` with the month arithmetic the schedule generator
//! relies on.
//!
//! # Examples
//!
//! ```
//! use engine_core::time::Date;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let next = start.add_months(3).unwrap();
//! assert_eq!(next, Date::from_ymd(2025, 4, 1).unwrap());
//! assert_eq!(next - start, 90);
//! ```

use chrono::{Datelike, Local, Months, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use crate::error::DateError;

/// Type-safe date wrapper around `chrono::NaiveDate`.
///
/// Provides ISO 8601 serialisation, validated construction, and the
/// checked month stepping used when rolling payment schedules forward.
///
/// # Examples
///
/// ```
/// use engine_core::time::Date;
///
/// let date = Date::from_ymd(2025, 6, 15).unwrap();
/// assert_eq!(date.year(), 2025);
///
/// let parsed: Date = "2025-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Month-end is clamped the way payment schedules expect
/// let eom = Date::from_ymd(2025, 1, 31).unwrap();
/// assert_eq!(eom.add_months(1).unwrap(), Date::from_ymd(2025, 2, 28).unwrap());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// Returns `Err(DateError::InvalidDate)` for impossible dates such as
    /// February 30th.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the underlying `NaiveDate` for access to chrono's full API.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day-of-month component.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Advances this date by a whole number of months.
    ///
    /// Day-of-month is clamped to the target month's length (Jan 31st + 1
    /// month = Feb 28th/29th), matching payment-schedule rolling.
    ///
    /// # Examples
    ///
    /// ```
    /// use engine_core::time::Date;
    ///
    /// let d = Date::from_ymd(2025, 1, 1).unwrap();
    /// assert_eq!(d.add_months(12).unwrap(), Date::from_ymd(2026, 1, 1).unwrap());
    /// ```
    pub fn add_months(&self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| DateError::Overflow {
                reason: format!("Adding {} months overflowed", months),
            })
    }

    /// Returns the number of whole days from `earlier` to `self`.
    ///
    /// Negative when `self` precedes `earlier`.
    pub fn days_since(&self, earlier: Date) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

impl Sub for Date {
    type Output = i64;

    fn sub(self, rhs: Date) -> i64 {
        self.days_since(rhs)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}
