//! Same-day time window overlap checks.
//!
//! Windows are half-open, `[start, end)`, so a booking ending at 11:00 does
//! not collide with one starting at 11:00. Windows crossing midnight are not
//! supported.

use chrono::NaiveTime;

use crate::error::BookingResult;

use super::{minutes_since_midnight, parse_time};

/// Returns true if two `[start, end)` minute windows intersect.
pub fn minutes_overlap(start1: u32, end1: u32, start2: u32, end2: u32) -> bool {
    start1 < end2 && start2 < end1
}

/// Returns true if two same-day time windows intersect.
pub fn intervals_overlap(
    start1: NaiveTime,
    end1: NaiveTime,
    start2: NaiveTime,
    end2: NaiveTime,
) -> bool {
    minutes_overlap(
        minutes_since_midnight(start1),
        minutes_since_midnight(end1),
        minutes_since_midnight(start2),
        minutes_since_midnight(end2),
    )
}

/// Checks whether two `HH:MM` windows on the same day overlap.
///
/// # Errors
///
/// Returns `InvalidTimeFormat` if any input is not a valid `HH:MM` time.
///
/// # Example
///
/// ```
/// use playrent_pricing::calculation::has_time_overlap;
///
/// assert!(has_time_overlap("10:00", "11:00", "10:30", "11:30").unwrap());
/// assert!(!has_time_overlap("10:00", "11:00", "11:00", "12:00").unwrap());
/// ```
pub fn has_time_overlap(start1: &str, end1: &str, start2: &str, end2: &str) -> BookingResult<bool> {
    Ok(intervals_overlap(
        parse_time(start1)?,
        parse_time(end1)?,
        parse_time(start2)?,
        parse_time(end2)?,
    ))
}
