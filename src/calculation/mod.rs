//! Calculation logic for the pricing engine.
//!
//! This module contains the booking price calculator, the same-day overlap
//! check, recurrence expansion for repeating bookings, series quoting, and
//! the time/date parsing and currency formatting helpers they share.

mod currency;
mod day_type;
mod overlap;
mod price;
mod recurrence;
mod series;
mod time_parsing;

pub use currency::format_currency;
pub use day_type::{DayType, get_day_type};
pub use overlap::{has_time_overlap, intervals_overlap, minutes_overlap};
pub use price::{calculate_price, price_booking, round_money};
pub use recurrence::{expand_recurrence, generate_recurrence_occurrences};
pub use series::{find_conflict, quote_series};
pub use time_parsing::{
    closing_minutes, minutes_since_midnight, minutes_to_time, parse_date, parse_time,
};
