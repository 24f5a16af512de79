//! Booking price calculation.
//!
//! The price of a booking is built up in a fixed order:
//!
//! 1. Base cost: hourly rate times duration.
//! 2. Weekend multiplier on the base cost (Saturday and Sunday only).
//! 3. Flat lighting fee for evening starts or when lights are requested.
//! 4. Flat add-on fees for the equipment pack and the coach.
//! 5. Rounding to cents, half away from zero.
//!
//! Flat fees are never multiplied by the weekend factor.

use chrono::{NaiveDate, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::PricingConfig;
use crate::error::{BookingError, BookingResult};
use crate::models::{AddOns, AuditStep, BookingRequest, PriceCategory, PriceLine, PriceQuote};

use super::{format_currency, get_day_type, parse_date, parse_time};

/// Rounds a monetary amount to cents, half away from zero.
///
/// The result always carries exactly two decimal places.
///
/// # Example
///
/// ```
/// use playrent_pricing::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// assert_eq!(round_money(Decimal::from_str("10.004").unwrap()), Decimal::from_str("10.00").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Error for an amount that no longer fits a `Decimal`.
pub(super) fn amount_too_large() -> BookingError {
    BookingError::invalid_booking("base_price_per_hour", "amount too large")
}

/// Calculates the total price of a booking from raw form inputs.
///
/// Uses the default surcharges: ×1.15 on weekends, 25 for lights, 15 for the
/// equipment pack and 50 for a coach.
///
/// # Errors
///
/// Returns `InvalidDate` or `InvalidTimeFormat` for unparseable inputs and
/// `InvalidBooking` for a negative price or a zero duration.
///
/// # Example
///
/// ```
/// use playrent_pricing::calculation::calculate_price;
/// use playrent_pricing::models::AddOns;
/// use rust_decimal::Decimal;
///
/// let add_ons = AddOns { equipment_pack: true, coach: true, ..AddOns::default() };
/// let total = calculate_price(Decimal::new(50, 0), 120, "2024-01-06", "19:00", Some(&add_ons)).unwrap();
/// // (50 * 2) * 1.15 + 25 + 15 + 50
/// assert_eq!(total, Decimal::new(20500, 2));
/// ```
pub fn calculate_price(
    base_price_per_hour: Decimal,
    duration_minutes: u32,
    date: &str,
    start_time: &str,
    add_ons: Option<&AddOns>,
) -> BookingResult<Decimal> {
    let request = BookingRequest {
        base_price_per_hour,
        duration_minutes,
        date: parse_date(date)?,
        start_time: parse_time(start_time)?,
        add_ons: add_ons.copied().unwrap_or_default(),
    };
    Ok(price_booking(&request, &PricingConfig::default())?.total)
}

/// Prices a booking, returning the itemised quote.
pub fn price_booking(request: &BookingRequest, config: &PricingConfig) -> BookingResult<PriceQuote> {
    request.validate()?;

    let mut lines = Vec::new();
    let mut steps = Vec::new();

    let base_cost = request
        .base_price_per_hour
        .checked_mul(Decimal::from(request.duration_minutes))
        .and_then(|amount| amount.checked_div(Decimal::from(60)))
        .ok_or_else(amount_too_large)?;
    lines.push(PriceLine {
        category: PriceCategory::Base,
        description: format!(
            "{} min at {} per hour",
            request.duration_minutes,
            request.base_price_per_hour.normalize()
        ),
        amount: base_cost,
    });
    steps.push(AuditStep {
        step_number: 1,
        rule_id: "base_cost".to_string(),
        rule_name: "Base Cost".to_string(),
        input: serde_json::json!({
            "base_price_per_hour": request.base_price_per_hour.normalize().to_string(),
            "duration_minutes": request.duration_minutes,
        }),
        output: serde_json::json!({ "amount": base_cost.normalize().to_string() }),
        reasoning: format!(
            "{} × {} min / 60 = {}",
            request.base_price_per_hour.normalize(),
            request.duration_minutes,
            base_cost.normalize()
        ),
    });

    steps.push(weekend_step(request.date, base_cost, config, &mut lines)?);
    steps.push(lights_step(request, config, &mut lines));
    steps.push(add_ons_step(&request.add_ons, config, &mut lines));

    let subtotal = lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.amount))
        .ok_or_else(amount_too_large)?;
    let total = round_money(subtotal);
    steps.push(AuditStep {
        step_number: 5,
        rule_id: "rounding".to_string(),
        rule_name: "Round To Cents".to_string(),
        input: serde_json::json!({ "subtotal": subtotal.normalize().to_string() }),
        output: serde_json::json!({ "total": total.to_string() }),
        reasoning: format!("{} rounded half away from zero = {}", subtotal.normalize(), total),
    });

    Ok(PriceQuote {
        date: request.date,
        start_time: request.start_time.format("%H:%M").to_string(),
        duration_minutes: request.duration_minutes,
        lines,
        subtotal,
        total,
        formatted_total: format_currency(total, &config.currency),
        audit_steps: steps,
    })
}

fn weekend_step(
    date: NaiveDate,
    base_cost: Decimal,
    config: &PricingConfig,
    lines: &mut Vec<PriceLine>,
) -> BookingResult<AuditStep> {
    let day_type = get_day_type(date);
    let surcharge = if day_type.is_weekend() {
        base_cost
            .checked_mul(config.weekend_multiplier)
            .ok_or_else(amount_too_large)?
            - base_cost
    } else {
        Decimal::ZERO
    };

    if day_type.is_weekend() {
        lines.push(PriceLine {
            category: PriceCategory::Weekend,
            description: format!(
                "{} rate ×{}",
                day_type,
                config.weekend_multiplier.normalize()
            ),
            amount: surcharge,
        });
    }

    Ok(AuditStep {
        step_number: 2,
        rule_id: "weekend_multiplier".to_string(),
        rule_name: "Weekend Multiplier".to_string(),
        input: serde_json::json!({
            "date": date.to_string(),
            "day_type": day_type,
        }),
        output: serde_json::json!({
            "applied": day_type.is_weekend(),
            "multiplier": config.weekend_multiplier.normalize().to_string(),
            "surcharge": surcharge.normalize().to_string(),
        }),
        reasoning: if day_type.is_weekend() {
            format!(
                "{} booking: base cost ×{}",
                day_type,
                config.weekend_multiplier.normalize()
            )
        } else {
            "Weekday booking: no weekend multiplier".to_string()
        },
    })
}

fn lights_step(request: &BookingRequest, config: &PricingConfig, lines: &mut Vec<PriceLine>) -> AuditStep {
    let start_hour = request.start_time.hour();
    let evening = start_hour >= config.evening_start_hour;
    let applied = evening || request.add_ons.lights;

    if applied {
        lines.push(PriceLine {
            category: PriceCategory::Lights,
            description: if evening {
                format!("Evening lighting (start {}:00 or later)", config.evening_start_hour)
            } else {
                "Lights requested".to_string()
            },
            amount: config.fees.lights,
        });
    }

    AuditStep {
        step_number: 3,
        rule_id: "lights_fee".to_string(),
        rule_name: "Evening / Lights Fee".to_string(),
        input: serde_json::json!({
            "start_hour": start_hour,
            "evening_start_hour": config.evening_start_hour,
            "lights_requested": request.add_ons.lights,
        }),
        output: serde_json::json!({
            "applied": applied,
            "fee": if applied { config.fees.lights.normalize().to_string() } else { "0".to_string() },
        }),
        reasoning: match (evening, request.add_ons.lights) {
            (true, _) => format!(
                "Start hour {} is at or after {}: lights fee {}",
                start_hour,
                config.evening_start_hour,
                config.fees.lights.normalize()
            ),
            (false, true) => format!("Lights requested: fee {}", config.fees.lights.normalize()),
            (false, false) => "Daytime booking without lights: no fee".to_string(),
        },
    }
}

fn add_ons_step(add_ons: &AddOns, config: &PricingConfig, lines: &mut Vec<PriceLine>) -> AuditStep {
    let mut charged = Decimal::ZERO;

    if add_ons.equipment_pack {
        lines.push(PriceLine {
            category: PriceCategory::EquipmentPack,
            description: "Equipment pack".to_string(),
            amount: config.fees.equipment_pack,
        });
        charged += config.fees.equipment_pack;
    }
    if add_ons.coach {
        lines.push(PriceLine {
            category: PriceCategory::Coach,
            description: "Coach".to_string(),
            amount: config.fees.coach,
        });
        charged += config.fees.coach;
    }

    AuditStep {
        step_number: 4,
        rule_id: "add_on_fees".to_string(),
        rule_name: "Add-on Fees".to_string(),
        input: serde_json::json!({
            "equipment_pack": add_ons.equipment_pack,
            "coach": add_ons.coach,
        }),
        output: serde_json::json!({ "amount": charged.normalize().to_string() }),
        reasoning: format!("Add-on fees total {}", charged.normalize()),
    }
}
