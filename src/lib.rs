mod calendar;
mod consts;
mod lookup;
mod prelude;

pub use calendar::{
    CalendarError, CalendarSystem, CalendarValue, ChronoCalendar, LocalCalendar, UtcCalendar,
    is_leap_year,
};
pub use consts::*;
pub use lookup::{RangeError, lookup, lookup_in};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate, NaiveTime};
use log::debug;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A calendar day held as a year/month/day triple.
///
/// Month and day are zero-based (January = 0, first of the month = 0); the
/// text forms are one-based. Fields are stored as given, so a value may name
/// a day that does not exist; see [`CalendarDate::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarDate {
    year:  i32,
    month: i32,
    day:   i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid number in date: {_0}")]
    InvalidNumber(String),
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from zero-based month and day, without validation
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    /// Creates a date from a one-based calendar reading, ignoring time of day
    pub const fn from_calendar_value(value: &CalendarValue) -> Self {
        Self {
            year: value.year,
            month: value.month.saturating_sub(1),
            day: value.day.saturating_sub(1),
        }
    }

    /// Today's date according to the host's local clock
    pub fn today() -> Self {
        Self::today_in(&LocalCalendar::default())
    }

    /// Today's date according to `calendar`
    pub fn today_in<C: CalendarSystem + ?Sized>(calendar: &C) -> Self {
        Self::from_calendar_value(&calendar.now())
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month (January = 0)
    pub const fn month(&self) -> i32 {
        self.month
    }

    /// Zero-based day of month
    pub const fn day(&self) -> i32 {
        self.day
    }

    /// One-based month, as written in the text forms
    pub const fn month_number(&self) -> i32 {
        self.month.saturating_add(1)
    }

    /// One-based day of month, as written in the text forms
    pub const fn day_of_month(&self) -> i32 {
        self.day.saturating_add(1)
    }

    /// Packs the fields as `year << 9 | month << 5 | day`.
    /// Distinct for in-range dates; `Hash` hashes this key.
    pub const fn packed_key(&self) -> i32 {
        (self.year << YEAR_SHIFT) | (self.month << MONTH_SHIFT) | self.day
    }

    /// Renders as `yyyymmdd`
    pub fn to_short_string(&self) -> String {
        format!(
            "{:04}{:02}{:02}",
            self.year,
            self.month_number(),
            self.day_of_month()
        )
    }

    /// Checks the year against `[min_year, max_year]` and the month and day
    /// against the Gregorian calendar.
    pub fn is_valid(&self, min_year: i32, max_year: i32) -> bool {
        self.is_valid_in(&LocalCalendar::default(), min_year, max_year)
    }

    /// `is_valid` with the default year bounds (`DEFAULT_MIN_YEAR..=DEFAULT_MAX_YEAR`)
    pub fn is_valid_default(&self) -> bool {
        self.is_valid(DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR)
    }

    /// Checks the year against `[min_year, max_year]`, then the month and the
    /// one-based day against the ranges `calendar` reports as legal.
    pub fn is_valid_in<C: CalendarSystem + ?Sized>(
        &self,
        calendar: &C,
        min_year: i32,
        max_year: i32,
    ) -> bool {
        if !(min_year..=max_year).contains(&self.year) {
            return false;
        }
        if !calendar.month_range(self.year).contains(&self.month) {
            return false;
        }
        calendar
            .day_range(self.year, self.month)
            .contains(&self.day_of_month())
    }

    /// One-based calendar reading at midnight
    pub const fn to_calendar_value(&self) -> CalendarValue {
        CalendarValue::date(self.year, self.month_number(), self.day_of_month())
    }

    /// One-based calendar reading at `time` on this date
    pub fn to_calendar_value_at(&self, time: NaiveTime) -> CalendarValue {
        self.to_calendar_value().with_time(time)
    }

    /// Milliseconds from the Unix epoch to midnight of this date in the
    /// host's local time zone. The result depends on the ambient zone; use
    /// [`CalendarDate::to_epoch_millis_in`] with a [`UtcCalendar`] for a
    /// zone-independent value.
    ///
    /// # Errors
    /// Returns `CalendarError` if this is not a real date, or if local
    /// midnight does not exist on this date.
    pub fn to_epoch_millis(&self) -> Result<i64, CalendarError> {
        self.to_epoch_millis_in(&LocalCalendar::default())
    }

    /// Milliseconds from the Unix epoch to midnight of this date in `calendar`.
    ///
    /// # Errors
    /// Returns `CalendarError` if `calendar` cannot place midnight of this date.
    pub fn to_epoch_millis_in<C: CalendarSystem + ?Sized>(
        &self,
        calendar: &C,
    ) -> Result<i64, CalendarError> {
        calendar.epoch_millis(&self.to_calendar_value())
    }

    /// Converts to a chrono date, or `None` if this is not a real date
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let month = u32::try_from(self.month_number()).ok()?;
        let day = u32::try_from(self.day_of_month()).ok()?;
        NaiveDate::from_ymd_opt(self.year, month, day)
    }
}

impl From<(i32, i32, i32)> for CalendarDate {
    fn from((year, month, day): (i32, i32, i32)) -> Self {
        Self::new(year, month, day)
    }
}

// month0 and day0 are at most 30, so the casts cannot wrap
#[allow(clippy::cast_possible_wrap)]
impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0() as i32, date.day0() as i32)
    }
}

impl Hash for CalendarDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.packed_key().hash(state);
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{:02}",
            self.year,
            self.month_number(),
            self.day_of_month()
        )
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses `yyyymmdd` or `yyyy-mm-dd`. Month and day are converted to
    /// zero-based but not range checked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let separator_width = match (s.is_ascii(), s.len()) {
            (true, SHORT_FORMAT_LEN) => 0,
            (true, LONG_FORMAT_LEN) => DATE_SEPARATOR.len_utf8(),
            _ => {
                debug!("rejecting date {s:?}: wrong length");
                return Err(ParseError::InvalidFormat(format!(
                    "expected {SHORT_FORMAT_LEN} or {LONG_FORMAT_LEN} ASCII characters: {s}"
                )));
            }
        };

        let month_start = YEAR_DIGITS + separator_width;
        let day_start = month_start + FIELD_DIGITS + separator_width;

        if separator_width > 0
            && !(s[YEAR_DIGITS..].starts_with(DATE_SEPARATOR)
                && s[month_start + FIELD_DIGITS..].starts_with(DATE_SEPARATOR))
        {
            debug!("rejecting date {s:?}: missing separator");
            return Err(ParseError::InvalidFormat(format!(
                "expected '{DATE_SEPARATOR}' after year and month: {s}"
            )));
        }

        let year = Self::parse_field(&s[..YEAR_DIGITS])?;
        let month = Self::parse_field(&s[month_start..month_start + FIELD_DIGITS])?;
        let day = Self::parse_field(&s[day_start..day_start + FIELD_DIGITS])?;

        Ok(Self::new(year, month - 1, day - 1))
    }
}

impl CalendarDate {
    /// Parses an unsigned decimal field; signs and spaces are rejected
    fn parse_field(s: &str) -> Result<i32, ParseError> {
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            debug!("rejecting date field {s:?}: not a decimal number");
            return Err(ParseError::InvalidNumber(s.to_owned()));
        }
        s.parse::<i32>()
            .map_err(|_| ParseError::InvalidNumber(s.to_owned()))
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
