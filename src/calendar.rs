use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    JANUARY, LEAP_YEAR_CYCLE, MIN_DAY,
};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A reading of a calendar/clock in one-based form.
///
/// Month and day are one-based (January = 1). The date fields are signed and
/// unchecked so an unnormalized `CalendarDate` can still be expressed; they
/// are validated only when converted to a concrete instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarValue {
    pub year:   i32,
    pub month:  i32,
    pub day:    i32,
    pub hour:   u32,
    pub minute: u32,
    pub second: u32,
}

/// Error type for converting calendar values into concrete instants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The year/month/day triple does not name a real calendar day.
    #[error("Invalid calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: i32, day: i32 },

    /// The time of day is out of range.
    #[error("Invalid time of day: {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    /// The wall-clock time falls in a gap of the time zone (e.g. a DST jump).
    #[error("Local time {0} does not exist in this time zone")]
    NonexistentLocalTime(NaiveDateTime),
}

impl CalendarValue {
    /// Creates a reading at midnight of the given one-based date
    pub const fn date(year: i32, month: i32, day: i32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    /// Returns the same date with the time of day taken from `time`
    #[must_use]
    pub fn with_time(self, time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            ..self
        }
    }

    /// Converts to a chrono wall-clock date and time.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the date fields do not name a real day,
    /// or `CalendarError::InvalidTime` if the time of day is out of range.
    pub fn to_naive_datetime(&self) -> Result<NaiveDateTime, CalendarError> {
        let invalid_date = || CalendarError::InvalidDate {
            year: self.year,
            month: self.month,
            day: self.day,
        };
        let month = u32::try_from(self.month).map_err(|_| invalid_date())?;
        let day = u32::try_from(self.day).map_err(|_| invalid_date())?;
        let date = NaiveDate::from_ymd_opt(self.year, month, day).ok_or_else(invalid_date)?;
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, self.second).ok_or(
            CalendarError::InvalidTime {
                hour: self.hour,
                minute: self.minute,
                second: self.second,
            },
        )?;
        Ok(date.and_time(time))
    }
}

// chrono months and days are at most 31, so the casts cannot wrap
#[allow(clippy::cast_possible_wrap)]
impl From<NaiveDateTime> for CalendarValue {
    fn from(value: NaiveDateTime) -> Self {
        Self {
            year: value.year(),
            month: value.month() as i32,
            day: value.day() as i32,
            hour: value.hour(),
            minute: value.minute(),
            second: value.second(),
        }
    }
}

/// The host calendar and clock as seen by `CalendarDate`.
///
/// Implementations answer which months and days are legal (so month lengths
/// and leap years live here), read the current time, and place a wall-clock
/// reading on the epoch time line.
pub trait CalendarSystem: Send + Sync {
    /// Legal zero-based months of `year`.
    fn month_range(&self, _year: i32) -> RangeInclusive<i32> {
        JANUARY..=DECEMBER
    }

    /// Legal one-based days of the zero-based `month` of `year`.
    /// Returns an empty range if `month` itself is not legal.
    fn day_range(&self, year: i32, month: i32) -> RangeInclusive<i32>;

    /// Current date and time of day.
    fn now(&self) -> CalendarValue;

    /// Milliseconds from the Unix epoch to `value`, read as wall-clock time
    /// in this calendar's time zone.
    ///
    /// # Errors
    /// Returns `CalendarError` if `value` is not a real date and time in this calendar.
    fn epoch_millis(&self, value: &CalendarValue) -> Result<i64, CalendarError>;
}

/// Proleptic Gregorian calendar backed by chrono, reading wall-clock time in `Tz`.
#[derive(Debug, Clone, Copy)]
pub struct ChronoCalendar<Tz> {
    tz: Tz,
}

/// The host's local calendar and time zone.
pub type LocalCalendar = ChronoCalendar<Local>;

/// A Gregorian calendar pinned to UTC.
pub type UtcCalendar = ChronoCalendar<Utc>;

impl<Tz: TimeZone> ChronoCalendar<Tz> {
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Returns the time zone used for clock readings and epoch conversion
    pub const fn time_zone(&self) -> &Tz {
        &self.tz
    }
}

impl ChronoCalendar<Local> {
    pub const fn local() -> Self {
        Self::new(Local)
    }
}

impl ChronoCalendar<Utc> {
    pub const fn utc() -> Self {
        Self::new(Utc)
    }
}

impl Default for ChronoCalendar<Local> {
    fn default() -> Self {
        Self::local()
    }
}

impl Default for ChronoCalendar<Utc> {
    fn default() -> Self {
        Self::utc()
    }
}

impl<Tz> CalendarSystem for ChronoCalendar<Tz>
where
    Tz: TimeZone + Send + Sync,
{
    fn day_range(&self, year: i32, month: i32) -> RangeInclusive<i32> {
        if self.month_range(year).contains(&month) {
            MIN_DAY..=days_in_month(year, month)
        } else {
            // empty
            MIN_DAY..=0
        }
    }

    fn now(&self) -> CalendarValue {
        CalendarValue::from(Utc::now().with_timezone(&self.tz).naive_local())
    }

    fn epoch_millis(&self, value: &CalendarValue) -> Result<i64, CalendarError> {
        let naive = value.to_naive_datetime().inspect_err(|err| {
            debug!("rejecting calendar value {value:?}: {err}");
        })?;
        self.tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|instant| instant.timestamp_millis())
            .ok_or_else(|| {
                debug!("local time {naive} falls in a time zone gap");
                CalendarError::NonexistentLocalTime(naive)
            })
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in the zero-based `month` of `year`, or 0 if `month` is
/// not a legal month.
#[allow(clippy::cast_sign_loss)]
pub(crate) const fn days_in_month(year: i32, month: i32) -> i32 {
    if month < JANUARY || month > DECEMBER {
        0
    } else if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
