//! Recurrence expansion for repeating bookings.
//!
//! Every step is computed from the anchor date rather than from the previous
//! occurrence, so a series anchored on the 31st returns to the 31st after a
//! short month.

use chrono::{Datelike, NaiveDate};

use crate::config::{MAX_SERIES_OCCURRENCES, RecurrenceLimits};
use crate::models::{
    Frequency, MissingDayPolicy, RecurrenceExpansion, RecurrenceRule, SkipReason,
    SkippedOccurrence,
};

/// Generates the occurrence dates of a recurring booking.
///
/// Uses the default limits: 12 steps when the rule gives no count, never more
/// than 52 occurrences.
///
/// # Example
///
/// ```
/// use playrent_pricing::calculation::generate_recurrence_occurrences;
/// use playrent_pricing::models::{MissingDayPolicy, RecurrenceRule};
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let rule = RecurrenceRule::monthly(3).with_policy(MissingDayPolicy::LastDay);
/// let dates: Vec<String> = generate_recurrence_occurrences(anchor, &rule)
///     .iter()
///     .map(|d| d.to_string())
///     .collect();
/// assert_eq!(dates, ["2024-01-31", "2024-02-29", "2024-03-31"]);
/// ```
pub fn generate_recurrence_occurrences(anchor: NaiveDate, rule: &RecurrenceRule) -> Vec<NaiveDate> {
    expand_recurrence(anchor, rule, &RecurrenceLimits::default()).occurrences
}

/// Expands a recurrence rule, reporting skipped steps alongside the dates.
///
/// - `none` yields the anchor alone, whatever else the rule says.
/// - Otherwise up to `occurrence_count` steps are taken (the configured
///   default when unset or zero), stopping once `max_occurrences` dates exist.
/// - A step whose date falls after `until_date` ends the expansion.
/// - Monthly steps landing on a missing day follow the rule's
///   [`MissingDayPolicy`]; a skipped month still uses up a step.
/// - Yearly steps landing on a missing day (29 February) fall back to the
///   last day of the month.
pub fn expand_recurrence(
    anchor: NaiveDate,
    rule: &RecurrenceRule,
    limits: &RecurrenceLimits,
) -> RecurrenceExpansion {
    let months_per_step = match rule.frequency {
        Frequency::None => return RecurrenceExpansion::single(anchor),
        Frequency::Monthly => 1,
        Frequency::Yearly => 12,
    };

    let requested = rule
        .occurrence_count
        .filter(|&count| count > 0)
        .unwrap_or(limits.default_occurrence_count);
    let cap = limits.max_occurrences.min(MAX_SERIES_OCCURRENCES);
    let policy = match rule.frequency {
        Frequency::Monthly => rule.missing_day_policy.unwrap_or_default(),
        _ => MissingDayPolicy::LastDay,
    };

    let mut expansion = RecurrenceExpansion::default();

    for step in 0..requested {
        if expansion.occurrences.len() >= cap {
            break;
        }

        let Some((period_start, last_day)) = target_month(anchor, i64::from(step) * months_per_step)
        else {
            expansion.skipped.push(SkippedOccurrence {
                step,
                period_start: None,
                reason: SkipReason::OutOfRange,
            });
            break;
        };

        let day_missing = anchor.day() > last_day;
        let Some(candidate) = period_start.with_day(anchor.day().min(last_day)) else {
            expansion.skipped.push(SkippedOccurrence {
                step,
                period_start: Some(period_start),
                reason: SkipReason::OutOfRange,
            });
            continue;
        };

        if rule.until_date.is_some_and(|until| candidate > until) {
            break;
        }

        if day_missing && policy == MissingDayPolicy::Skip {
            expansion.skipped.push(SkippedOccurrence {
                step,
                period_start: Some(period_start),
                reason: SkipReason::MissingDay,
            });
            continue;
        }

        expansion.occurrences.push(candidate);
    }

    expansion
}

/// First day and length of the month `offset` months after `anchor`'s month.
fn target_month(anchor: NaiveDate, offset: i64) -> Option<(NaiveDate, u32)> {
    let month_index = i64::from(anchor.year()) * 12 + i64::from(anchor.month0()) + offset;
    let year = i32::try_from(month_index.div_euclid(12)).ok()?;
    let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;

    let period_start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())?;
    Some((period_start, last_day))
}
