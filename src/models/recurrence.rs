//! Recurrence rule and expansion models.
//!
//! A [`RecurrenceRule`] describes how a booking repeats. Expanding it yields a
//! [`RecurrenceExpansion`]: the concrete occurrence dates plus every step that
//! produced no occurrence, tagged with the reason.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often a booking repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// A one-off booking.
    #[default]
    None,
    /// Same day of month, every month.
    Monthly,
    /// Same date, every year.
    Yearly,
}

/// What to do when the anchor's day of month does not exist in a target month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissingDayPolicy {
    /// Produce no occurrence for that month.
    #[default]
    #[serde(rename = "skip")]
    Skip,
    /// Use the last day of that month instead.
    #[serde(rename = "last-day", alias = "last_day")]
    LastDay,
}

/// A repetition rule for a booking series.
///
/// Field names follow snake_case; the booking form's camelCase names
/// (`freq`, `count`, `until`, `handleMissingDay`) are accepted as aliases.
///
/// # Example
///
/// ```
/// use playrent_pricing::models::{Frequency, MissingDayPolicy, RecurrenceRule};
///
/// let rule: RecurrenceRule = serde_json::from_str(
///     r#"{"freq": "monthly", "count": 3, "handleMissingDay": "last-day"}"#,
/// ).unwrap();
/// assert_eq!(rule.frequency, Frequency::Monthly);
/// assert_eq!(rule.occurrence_count, Some(3));
/// assert_eq!(rule.missing_day_policy, Some(MissingDayPolicy::LastDay));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// Repetition frequency.
    #[serde(alias = "freq")]
    pub frequency: Frequency,
    /// Number of steps to take, including the anchor.
    #[serde(default, alias = "count", skip_serializing_if = "Option::is_none")]
    pub occurrence_count: Option<u32>,
    /// Last date an occurrence may fall on (inclusive).
    #[serde(default, alias = "until", skip_serializing_if = "Option::is_none")]
    pub until_date: Option<NaiveDate>,
    /// Handling of days missing from shorter months.
    #[serde(
        default,
        alias = "handleMissingDay",
        skip_serializing_if = "Option::is_none"
    )]
    pub missing_day_policy: Option<MissingDayPolicy>,
}

impl RecurrenceRule {
    /// A rule that never repeats.
    pub fn once() -> Self {
        Self::default()
    }

    /// A monthly rule with the given step count.
    pub fn monthly(occurrence_count: u32) -> Self {
        Self {
            frequency: Frequency::Monthly,
            occurrence_count: Some(occurrence_count),
            ..Self::default()
        }
    }

    /// A yearly rule with the given step count.
    pub fn yearly(occurrence_count: u32) -> Self {
        Self {
            frequency: Frequency::Yearly,
            occurrence_count: Some(occurrence_count),
            ..Self::default()
        }
    }

    /// Sets the inclusive end date.
    pub fn until(mut self, date: NaiveDate) -> Self {
        self.until_date = Some(date);
        self
    }

    /// Sets the missing-day policy.
    pub fn with_policy(mut self, policy: MissingDayPolicy) -> Self {
        self.missing_day_policy = Some(policy);
        self
    }
}

/// Why a recurrence step produced no occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The anchor's day of month does not exist in the target month.
    MissingDay,
    /// The target date is outside the representable calendar range.
    OutOfRange,
}

/// A recurrence step that was consumed without producing an occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedOccurrence {
    /// Zero-based step index; step 0 is the anchor.
    pub step: u32,
    /// First day of the target month, when representable.
    pub period_start: Option<NaiveDate>,
    /// Why the step was skipped.
    pub reason: SkipReason,
}

/// The result of expanding a recurrence rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceExpansion {
    /// Occurrence dates in chronological order.
    pub occurrences: Vec<NaiveDate>,
    /// Steps that produced no occurrence.
    pub skipped: Vec<SkippedOccurrence>,
}

impl RecurrenceExpansion {
    /// An expansion consisting of the anchor date alone.
    pub fn single(anchor: NaiveDate) -> Self {
        Self {
            occurrences: vec![anchor],
            skipped: Vec::new(),
        }
    }
}
