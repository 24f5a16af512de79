//! Core data models for the pricing engine.
//!
//! This module contains all the domain models used throughout the engine.

mod booking;
mod field;
mod quote;
mod recurrence;
pub mod wall_clock;

pub use booking::{AddOns, BookedSlot, BookingRequest, MINUTES_PER_DAY, SeriesRequest};
pub use field::{Field, Sport, Surface};
pub use quote::{
    AuditStep, Conflict, OccurrenceQuote, PriceCategory, PriceLine, PriceQuote, SeriesQuote,
};
pub use recurrence::{
    Frequency, MissingDayPolicy, RecurrenceExpansion, RecurrenceRule, SkipReason,
    SkippedOccurrence,
};
