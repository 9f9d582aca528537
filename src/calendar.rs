use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// Error returned when (year, month, day) do not name a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Month outside `1..=12`.
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(i64),

    /// Day is zero, negative, or past the end of the month.
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i64, month: u8, day: i64 },
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's within `1..=MAX_MONTH`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` if the value is out of range.
    pub fn new(value: i64) -> Result<Self, CalendarError> {
        u8::try_from(value)
            .ok()
            .filter(|m| *m <= MAX_MONTH)
            .and_then(NonZeroU8::new)
            .map(Self)
            .ok_or(CalendarError::InvalidMonth(value))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the length of `month` in `year`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDay` if the value is not a day of that month.
    pub fn new(value: i64, year: i64, month: Month) -> Result<Self, CalendarError> {
        let max_day = days_in_month(year, month);
        u8::try_from(value)
            .ok()
            .filter(|d| *d <= max_day)
            .and_then(NonZeroU8::new)
            .map(Self)
            .ok_or(CalendarError::InvalidDay {
                year,
                month: month.get(),
                day: value,
            })
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Without year/month context only the longest month applies
        NonZeroU8::new(value)
            .filter(|d| d.get() <= DAYS_IN_MONTH[1])
            .map(Self)
            .ok_or(CalendarError::InvalidDay {
                year: 0,
                month: 0,
                day: i64::from(value),
            })
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A proleptic Gregorian calendar date assembled from validated parts.
///
/// The year is unrestricted in range and sign; month and day are checked
/// against the real calendar, leap years included.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:04}-{:02}-{:02}", "year", "month.get()", "day.get()")]
#[serde(try_from = "RawDate")]
pub struct CalendarDate {
    year:  i64,
    month: Month,
    day:   Day,
}

#[derive(Deserialize)]
struct RawDate {
    year:  i64,
    month: i64,
    day:   i64,
}

impl TryFrom<RawDate> for CalendarDate {
    type Error = CalendarError;

    fn try_from(raw: RawDate) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month, raw.day)
    }
}

impl CalendarDate {
    /// Builds a date from raw integers.
    ///
    /// # Errors
    /// Returns `CalendarError` if the month or day is out of range.
    pub fn new(year: i64, month: i64, day: i64) -> Result<Self, CalendarError> {
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> i64 {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }
}

// Helper functions

pub const fn is_leap_year(year: i64) -> bool {
    let year = year.rem_euclid(GREGORIAN_CYCLE);
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || year == 0
}

pub const fn days_in_month(year: i64, month: Month) -> u8 {
    let month = month.get();
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Whether (year, month, day) name a real calendar date.
pub fn is_valid_date(year: i64, month: i64, day: i64) -> bool {
    CalendarDate::new(year, month, day).is_ok()
}
