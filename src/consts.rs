/// Date component separator in the long text form (`yyyy-mm-dd`)
pub const DATE_SEPARATOR: char = '-';

/// Length of the compact text form `yyyymmdd`
pub const SHORT_FORMAT_LEN: usize = 8;

/// Length of the separated text form `yyyy-mm-dd`
pub const LONG_FORMAT_LEN: usize = 10;

/// Digits in the year field of either text form
pub const YEAR_DIGITS: usize = 4;
/// Digits in the month and day fields of either text form
pub const FIELD_DIGITS: usize = 2;

/// Lower year bound used by `CalendarDate::is_valid_default`
pub const DEFAULT_MIN_YEAR: i32 = 1;
/// Upper year bound used by `CalendarDate::is_valid_default`
pub const DEFAULT_MAX_YEAR: i32 = 9999;

/// Zero-based index of January
pub const JANUARY: i32 = 0;
/// Zero-based index of February
pub const FEBRUARY: i32 = 1;
/// Zero-based index of December
pub const DECEMBER: i32 = 11;

/// First day of month, one-based
pub const MIN_DAY: i32 = 1;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: i32 = 29;

/// Days in each month, indexed by zero-based month.
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [i32; 12] = [
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Bit offset of the year in `CalendarDate::packed_key`
pub(crate) const YEAR_SHIFT: u32 = 9;
/// Bit offset of the month in `CalendarDate::packed_key`
pub(crate) const MONTH_SHIFT: u32 = 5;
