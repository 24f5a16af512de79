//! Quoting of recurring bookings.
//!
//! A series quote expands the recurrence rule from the anchor date, prices
//! every occurrence at the field's hourly rate and flags occurrences that
//! cannot be booked.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PricingConfig;
use crate::error::BookingResult;
use crate::models::{BookedSlot, Conflict, Field, OccurrenceQuote, SeriesQuote, SeriesRequest};

use super::price::amount_too_large;
use super::{expand_recurrence, format_currency, minutes_overlap, minutes_to_time, price_booking};

/// Prices every occurrence of a recurring booking on `field`.
///
/// Conflicts are checked in order: blackout date, opening hours, overlap
/// with an existing reservation on the same date. The series total only
/// includes occurrences without a conflict.
///
/// # Errors
///
/// Returns `InvalidBooking` when the duration is zero, the booking would
/// run past midnight, a booked slot ends before it starts, or the series
/// total does not fit a `Decimal`.
pub fn quote_series(
    field: &Field,
    request: &SeriesRequest,
    booked: &[BookedSlot],
    config: &PricingConfig,
) -> BookingResult<SeriesQuote> {
    let anchor_booking = request.booking_on(request.date, field.base_price_per_hour);
    anchor_booking.validate()?;
    let start = anchor_booking.start_minutes();
    let end = anchor_booking.end_minutes()?;
    for slot in booked {
        slot.validate()?;
    }

    let expansion = expand_recurrence(request.date, &request.recurrence, &config.recurrence);

    let mut occurrences = Vec::with_capacity(expansion.occurrences.len());
    for &date in &expansion.occurrences {
        let quote = price_booking(&request.booking_on(date, field.base_price_per_hour), config)?;
        occurrences.push(OccurrenceQuote {
            date,
            start: minutes_to_time(start),
            end: minutes_to_time(end),
            total: quote.total,
            conflict: find_conflict(field, date, start, end, booked),
        });
    }

    let total = occurrences
        .iter()
        .filter(|o| o.conflict.is_none())
        .try_fold(Decimal::ZERO, |acc, o| acc.checked_add(o.total))
        .ok_or_else(amount_too_large)?;
    let conflict_count = occurrences.iter().filter(|o| o.conflict.is_some()).count();

    debug!(
        field_id = field.id,
        occurrences = occurrences.len(),
        skipped = expansion.skipped.len(),
        conflicts = conflict_count,
        total = %total,
        "Quoted booking series"
    );

    Ok(SeriesQuote {
        field_id: field.id,
        occurrences,
        skipped: expansion.skipped,
        total,
        formatted_total: format_currency(total, &config.currency),
        conflict_count,
    })
}

/// Returns the first reason `[start, end)` on `date` cannot be booked.
pub fn find_conflict(
    field: &Field,
    date: NaiveDate,
    start: u32,
    end: u32,
    booked: &[BookedSlot],
) -> Option<Conflict> {
    if field.is_blacked_out(date) {
        return Some(Conflict::Blackout);
    }

    if !field.is_open_for(start, end) {
        let (open, close) = field.opening_window();
        return Some(Conflict::OutsideOpeningHours {
            open: minutes_to_time(open),
            close: minutes_to_time(close),
        });
    }

    booked
        .iter()
        .filter(|slot| slot.date == date)
        .map(BookedSlot::window)
        .find(|&(slot_start, slot_end)| minutes_overlap(start, end, slot_start, slot_end))
        .map(|(slot_start, slot_end)| Conflict::Overlap {
            start: minutes_to_time(slot_start),
            end: minutes_to_time(slot_end),
        })
}
