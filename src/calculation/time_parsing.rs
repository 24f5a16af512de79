//! Parsing and formatting of wall-clock times and calendar dates.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::error::{BookingError, BookingResult};

/// Parses a wall-clock time given as `HH:MM` (or `HH:MM:SS`).
///
/// # Example
///
/// ```
/// use playrent_pricing::calculation::parse_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time("19:30").unwrap(), NaiveTime::from_hms_opt(19, 30, 0).unwrap());
/// assert!(parse_time("7pm").is_err());
/// ```
pub fn parse_time(value: &str) -> BookingResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| BookingError::InvalidTimeFormat {
            value: value.to_string(),
        })
}

/// Parses an ISO `yyyy-mm-dd` calendar date.
///
/// # Example
///
/// ```
/// use playrent_pricing::calculation::parse_date;
///
/// assert!(parse_date("2024-02-29").is_ok());
/// assert!(parse_date("2023-02-29").is_err());
/// ```
pub fn parse_date(value: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| BookingError::InvalidDate {
        value: value.to_string(),
    })
}

/// Minutes elapsed since midnight, ignoring seconds.
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Minutes since midnight of a window's end.
///
/// A `00:00` end after a later start is read as the following midnight.
pub fn closing_minutes(start_minutes: u32, end: NaiveTime) -> u32 {
    match minutes_since_midnight(end) {
        0 if start_minutes > 0 => 24 * 60,
        minutes => minutes,
    }
}

/// Formats minutes since midnight as zero-padded `HH:MM`.
///
/// # Example
///
/// ```
/// use playrent_pricing::calculation::minutes_to_time;
///
/// assert_eq!(minutes_to_time(545), "09:05");
/// assert_eq!(minutes_to_time(1440), "24:00");
/// ```
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
