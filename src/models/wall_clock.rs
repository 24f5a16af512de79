//! Serde helpers for wall-clock times.
//!
//! Times travel as `HH:MM` strings. Deserialization goes through
//! [`parse_time`](crate::calculation::parse_time), so `HH:MM:SS` is accepted
//! as well.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

use crate::calculation::parse_time;

/// Serializes a time as `HH:MM`.
pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.format("%H:%M").to_string())
}

/// Deserializes a time from `HH:MM` or `HH:MM:SS`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Slot {
        #[serde(with = "crate::models::wall_clock")]
        start: NaiveTime,
    }

    #[test]
    fn test_serializes_without_seconds() {
        let slot = Slot {
            start: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
        };
        assert_eq!(serde_json::to_string(&slot).unwrap(), r#"{"start":"18:30"}"#);
    }

    #[test]
    fn test_accepts_seconds_from_backend() {
        let slot: Slot = serde_json::from_str(r#"{"start":"08:00:00"}"#).unwrap();
        assert_eq!(slot.start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    }

    #[test]
    fn test_rejects_garbage() {
        let result: Result<Slot, _> = serde_json::from_str(r#"{"start":"late"}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Invalid time 'late'"));
    }
}
