//! Field catalog model.
//!
//! A [`Field`] is a rentable playing surface with an hourly rate, opening
//! hours and blackout dates.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{closing_minutes, minutes_since_midnight};

use super::wall_clock;

/// A sport a field can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    /// Football.
    Football,
    /// Basketball.
    Basketball,
    /// Tennis.
    Tennis,
}

/// Playing surface of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Artificial turf.
    Turf,
    /// Natural grass.
    Grass,
    /// Hard court.
    Court,
}

/// A rentable field.
///
/// # Example
///
/// ```
/// use playrent_pricing::models::Field;
///
/// let yaml = r#"
/// id: 1
/// name: Main Pitch
/// sports: [football]
/// base_price_per_hour: "100.00"
/// open_hour: "08:00"
/// close_hour: "22:00"
/// "#;
/// let field: Field = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(field.opening_window(), (8 * 60, 22 * 60));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Catalog identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Sports the field can host.
    pub sports: Vec<Sport>,
    /// Human-readable location.
    #[serde(default)]
    pub location: String,
    /// Playing surface, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<Surface>,
    /// Hourly rate before surcharges.
    pub base_price_per_hour: Decimal,
    /// Opening time.
    #[serde(with = "wall_clock")]
    pub open_hour: NaiveTime,
    /// Closing time; `00:00` means midnight.
    #[serde(with = "wall_clock")]
    pub close_hour: NaiveTime,
    /// Dates on which the field cannot be booked.
    #[serde(default)]
    pub blackout_dates: Vec<NaiveDate>,
}

impl Field {
    /// Returns true when the field is closed for the whole of `date`.
    pub fn is_blacked_out(&self, date: NaiveDate) -> bool {
        self.blackout_dates.contains(&date)
    }

    /// Opening hours as a `[open, close)` window in minutes since midnight.
    pub fn opening_window(&self) -> (u32, u32) {
        let open = minutes_since_midnight(self.open_hour);
        (open, closing_minutes(open, self.close_hour))
    }

    /// Returns true when `[start, end)` lies inside the opening hours.
    pub fn is_open_for(&self, start: u32, end: u32) -> bool {
        let (open, close) = self.opening_window();
        start >= open && end <= close
    }
}
