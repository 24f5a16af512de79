//! Quote models for the pricing engine.
//!
//! This module contains the [`PriceQuote`] produced for a single booking and
//! the [`SeriesQuote`] produced for a recurring one, together with their
//! itemised [`PriceLine`]s and the [`AuditStep`]s recording each rule applied.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SkippedOccurrence;

/// The category of a price line.
///
/// # Example
///
/// ```
/// use playrent_pricing::models::PriceCategory;
///
/// let json = serde_json::to_string(&PriceCategory::EquipmentPack).unwrap();
/// assert_eq!(json, "\"equipment_pack\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceCategory {
    /// Hourly rate times duration.
    Base,
    /// Saturday/Sunday uplift on the base cost.
    Weekend,
    /// Flat lighting fee, for evening starts or on request.
    Lights,
    /// Flat equipment pack fee.
    EquipmentPack,
    /// Flat coaching fee.
    Coach,
}

/// A single line item of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    /// What the line charges for.
    pub category: PriceCategory,
    /// Human-readable description.
    pub description: String,
    /// Unrounded amount.
    pub amount: Decimal,
}

/// A record of one pricing rule being evaluated.
///
/// Steps are kept even when the rule did not apply, so a quote explains
/// both what was charged and what was not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// Sequence number within the quote, starting at 1.
    pub step_number: u32,
    /// Machine identifier of the rule.
    pub rule_id: String,
    /// Human-readable name of the rule.
    pub rule_name: String,
    /// Inputs the rule saw.
    pub input: serde_json::Value,
    /// What the rule produced.
    pub output: serde_json::Value,
    /// One-line explanation.
    pub reasoning: String,
}

/// The price of a single booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// The booking date.
    pub date: NaiveDate,
    /// Booking start, `HH:MM`.
    pub start_time: String,
    /// Booking length in minutes.
    pub duration_minutes: u32,
    /// Itemised charges.
    pub lines: Vec<PriceLine>,
    /// Sum of the line amounts before rounding.
    pub subtotal: Decimal,
    /// The amount to charge, rounded to cents.
    pub total: Decimal,
    /// `total` formatted in the configured currency, e.g. `$1,234.50`.
    pub formatted_total: String,
    /// Rules evaluated, in order.
    pub audit_steps: Vec<AuditStep>,
}

impl PriceQuote {
    /// Returns the line for `category`, if it was charged.
    pub fn line(&self, category: PriceCategory) -> Option<&PriceLine> {
        self.lines.iter().find(|line| line.category == category)
    }
}

/// Why an occurrence of a series cannot be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// The field is closed all day.
    Blackout,
    /// The booking window falls outside the field's opening hours.
    OutsideOpeningHours {
        /// Opening time, `HH:MM`.
        open: String,
        /// Closing time, `HH:MM`.
        close: String,
    },
    /// The booking window overlaps an existing reservation.
    Overlap {
        /// Start of the existing reservation, `HH:MM`.
        start: String,
        /// End of the existing reservation, `HH:MM`.
        end: String,
    },
}

/// One priced occurrence of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceQuote {
    /// Occurrence date.
    pub date: NaiveDate,
    /// Start, `HH:MM`.
    pub start: String,
    /// End, `HH:MM` (`24:00` for midnight).
    pub end: String,
    /// Price of this occurrence.
    pub total: Decimal,
    /// Set when the occurrence cannot be booked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<Conflict>,
}

/// The price of a recurring booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesQuote {
    /// The field being booked.
    pub field_id: u32,
    /// Every generated occurrence, conflicting or not.
    pub occurrences: Vec<OccurrenceQuote>,
    /// Recurrence steps that produced no date.
    pub skipped: Vec<SkippedOccurrence>,
    /// Sum of the bookable occurrences.
    pub total: Decimal,
    /// `total` formatted in the configured currency.
    pub formatted_total: String,
    /// Number of occurrences with a conflict.
    pub conflict_count: usize,
}

impl SeriesQuote {
    /// Occurrences that can be booked.
    pub fn bookable(&self) -> impl Iterator<Item = &OccurrenceQuote> {
        self.occurrences.iter().filter(|o| o.conflict.is_none())
    }
}
