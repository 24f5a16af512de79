//! Request types for the pricing API.
//!
//! Dates and times arrive as plain strings and are parsed by the calculation
//! helpers, so a malformed value maps to `INVALID_DATE` or
//! `INVALID_TIME_FORMAT` instead of a generic JSON rejection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{parse_date, parse_time};
use crate::config::ConfigLoader;
use crate::error::{BookingError, BookingResult};
use crate::models::{AddOns, BookedSlot, BookingRequest, RecurrenceRule, SeriesRequest};

/// Request body for `POST /quote`.
///
/// The hourly rate is either given directly or taken from the field
/// catalog; an explicit `base_price_per_hour` wins over `field_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Catalog field whose hourly rate should be used.
    #[serde(default)]
    pub field_id: Option<u32>,
    /// Explicit hourly rate.
    #[serde(default)]
    pub base_price_per_hour: Option<Decimal>,
    /// Length of the booking in minutes.
    pub duration_minutes: u32,
    /// Booking date, `yyyy-mm-dd`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub start_time: String,
    /// Paid extras.
    #[serde(default)]
    pub add_ons: AddOns,
}

impl QuoteRequest {
    /// Parses the request into a booking priced at `base_price_per_hour`.
    pub fn into_booking(self, base_price_per_hour: Decimal) -> BookingResult<BookingRequest> {
        Ok(BookingRequest {
            base_price_per_hour,
            duration_minutes: self.duration_minutes,
            date: parse_date(&self.date)?,
            start_time: parse_time(&self.start_time)?,
            add_ons: self.add_ons,
        })
    }

    /// Resolves the hourly rate from the request or the field catalog.
    pub fn hourly_rate(&self, config: &ConfigLoader) -> BookingResult<Decimal> {
        match (self.base_price_per_hour, self.field_id) {
            (Some(rate), _) => Ok(rate),
            (None, Some(id)) => Ok(config.get_field(id)?.base_price_per_hour),
            (None, None) => Err(BookingError::invalid_booking(
                "base_price_per_hour",
                "either base_price_per_hour or field_id is required",
            )),
        }
    }
}

/// Request body for `POST /occurrences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccurrencesRequest {
    /// First date of the series, `yyyy-mm-dd`.
    pub anchor_date: String,
    /// How the booking repeats.
    #[serde(default)]
    pub rule: RecurrenceRule,
}

/// Request body for `POST /overlap`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlapRequest {
    /// Start of the first window.
    pub start1: String,
    /// End of the first window.
    pub end1: String,
    /// Start of the second window.
    pub start2: String,
    /// End of the second window.
    pub end2: String,
}

/// Request body for `POST /series-quote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesQuoteRequest {
    /// Catalog field being booked.
    pub field_id: u32,
    /// Anchor date, `yyyy-mm-dd`.
    pub date: String,
    /// Start time of every occurrence, `HH:MM`.
    pub start_time: String,
    /// Length of every occurrence in minutes.
    pub duration_minutes: u32,
    /// Paid extras applied to every occurrence.
    #[serde(default)]
    pub add_ons: AddOns,
    /// How the booking repeats.
    #[serde(default)]
    pub recurrence: RecurrenceRule,
    /// Existing reservations on the field.
    #[serde(default)]
    pub booked: Vec<BookedSlot>,
}

impl SeriesQuoteRequest {
    /// Splits the body into the parsed series and the booked slots.
    pub fn into_parts(self) -> BookingResult<(SeriesRequest, Vec<BookedSlot>)> {
        let series = SeriesRequest {
            date: parse_date(&self.date)?,
            start_time: parse_time(&self.start_time)?,
            duration_minutes: self.duration_minutes,
            add_ons: self.add_ons,
            recurrence: self.recurrence,
        };
        Ok((series, self.booked))
    }
}
