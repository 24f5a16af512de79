//! Booking request models.
//!
//! This module defines the inputs to the price calculator: the single
//! [`BookingRequest`], its optional [`AddOns`], the [`SeriesRequest`] used
//! for recurring bookings, and the [`BookedSlot`]s a series is checked
//! against.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{closing_minutes, minutes_since_midnight};
use crate::error::{BookingError, BookingResult};

use super::{RecurrenceRule, wall_clock};

/// Minutes in a day; a booking window may end exactly at midnight.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Optional paid extras attached to a booking.
///
/// # Example
///
/// ```
/// use playrent_pricing::models::AddOns;
///
/// let add_ons: AddOns = serde_json::from_str(r#"{"equipmentPack": true}"#).unwrap();
/// assert!(add_ons.equipment_pack);
/// assert!(!add_ons.coach);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOns {
    /// Floodlights requested regardless of start time.
    #[serde(default)]
    pub lights: bool,
    /// Balls, bibs and cones.
    #[serde(default, alias = "equipmentPack")]
    pub equipment_pack: bool,
    /// A coach for the session.
    #[serde(default)]
    pub coach: bool,
}

/// A single booking to be priced.
///
/// # Example
///
/// ```
/// use playrent_pricing::models::{AddOns, BookingRequest};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let request = BookingRequest {
///     base_price_per_hour: Decimal::new(100, 0),
///     duration_minutes: 90,
///     date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
///     start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
///     add_ons: AddOns::default(),
/// };
/// assert_eq!(request.end_minutes().unwrap(), 11 * 60 + 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// The field's hourly rate.
    pub base_price_per_hour: Decimal,
    /// Length of the booking in minutes.
    pub duration_minutes: u32,
    /// The calendar date of the booking.
    pub date: NaiveDate,
    /// Wall-clock start time.
    #[serde(with = "wall_clock")]
    pub start_time: NaiveTime,
    /// Paid extras.
    #[serde(default)]
    pub add_ons: AddOns,
}

impl BookingRequest {
    /// Rejects negative prices, empty durations and durations over a day.
    pub fn validate(&self) -> BookingResult<()> {
        if self.base_price_per_hour.is_sign_negative() && !self.base_price_per_hour.is_zero() {
            return Err(BookingError::invalid_booking(
                "base_price_per_hour",
                "must not be negative",
            ));
        }
        if self.duration_minutes == 0 {
            return Err(BookingError::invalid_booking(
                "duration_minutes",
                "must be positive",
            ));
        }
        if self.duration_minutes > MINUTES_PER_DAY {
            return Err(BookingError::invalid_booking(
                "duration_minutes",
                "must not exceed one day",
            ));
        }
        Ok(())
    }

    /// Minutes since midnight at which the booking starts.
    pub fn start_minutes(&self) -> u32 {
        minutes_since_midnight(self.start_time)
    }

    /// Minutes since midnight at which the booking ends.
    ///
    /// Fails when the booking would run past midnight.
    pub fn end_minutes(&self) -> BookingResult<u32> {
        self.start_minutes()
            .checked_add(self.duration_minutes)
            .filter(|&end| end <= MINUTES_PER_DAY)
            .ok_or_else(|| {
                BookingError::invalid_booking("duration_minutes", "booking must end by midnight")
            })
    }
}

/// A recurring booking: the anchor booking plus the rule that repeats it.
///
/// The hourly rate is not part of the request; it comes from the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRequest {
    /// Anchor date of the series.
    pub date: NaiveDate,
    /// Wall-clock start time of every occurrence.
    #[serde(with = "wall_clock")]
    pub start_time: NaiveTime,
    /// Length of every occurrence in minutes.
    pub duration_minutes: u32,
    /// Paid extras applied to every occurrence.
    #[serde(default)]
    pub add_ons: AddOns,
    /// How the booking repeats.
    pub recurrence: RecurrenceRule,
}

impl SeriesRequest {
    /// Builds the single booking for one occurrence date.
    pub fn booking_on(&self, date: NaiveDate, base_price_per_hour: Decimal) -> BookingRequest {
        BookingRequest {
            base_price_per_hour,
            duration_minutes: self.duration_minutes,
            date,
            start_time: self.start_time,
            add_ons: self.add_ons,
        }
    }
}

/// An existing reservation on a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    /// The reserved date.
    pub date: NaiveDate,
    /// Reservation start.
    #[serde(with = "wall_clock")]
    pub start: NaiveTime,
    /// Reservation end; `00:00` after a later start means midnight.
    #[serde(with = "wall_clock")]
    pub end: NaiveTime,
}

impl BookedSlot {
    /// Rejects a slot whose end comes before its start.
    ///
    /// An end of `00:00` is midnight and always valid.
    pub fn validate(&self) -> BookingResult<()> {
        let (start, end) = self.window();
        if end < start {
            return Err(BookingError::invalid_booking(
                "booked",
                format!(
                    "slot on {} ends at {} before it starts at {}",
                    self.date,
                    self.end.format("%H:%M"),
                    self.start.format("%H:%M")
                ),
            ));
        }
        Ok(())
    }

    /// The slot as a `[start, end)` window in minutes since midnight.
    pub fn window(&self) -> (u32, u32) {
        let start = minutes_since_midnight(self.start);
        (start, closing_minutes(start, self.end))
    }
}
