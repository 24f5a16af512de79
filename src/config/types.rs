//! Configuration types for the pricing engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Field;

/// Absolute ceiling on the number of occurrences a series may produce.
pub const MAX_SERIES_OCCURRENCES: usize = 52;

/// Flat fees added after the weekend multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeFees {
    /// Lighting fee for evening starts or on request.
    pub lights: Decimal,
    /// Equipment pack fee.
    pub equipment_pack: Decimal,
    /// Coaching fee.
    pub coach: Decimal,
}

impl Default for SurchargeFees {
    fn default() -> Self {
        Self {
            lights: Decimal::new(25, 0),
            equipment_pack: Decimal::new(15, 0),
            coach: Decimal::new(50, 0),
        }
    }
}

/// Bounds applied when expanding a recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceLimits {
    /// Steps taken when the rule gives no count.
    pub default_occurrence_count: u32,
    /// Maximum number of occurrences produced.
    pub max_occurrences: usize,
}

impl Default for RecurrenceLimits {
    fn default() -> Self {
        Self {
            default_occurrence_count: 12,
            max_occurrences: MAX_SERIES_OCCURRENCES,
        }
    }
}

/// Pricing configuration from pricing.yaml.
///
/// # Example
///
/// ```
/// use playrent_pricing::config::PricingConfig;
/// use rust_decimal::Decimal;
///
/// let config = PricingConfig::default();
/// assert_eq!(config.weekend_multiplier, Decimal::new(115, 2));
/// assert_eq!(config.evening_start_hour, 18);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// ISO currency code used when formatting amounts.
    pub currency: String,
    /// Multiplier applied to the base cost on Saturdays and Sundays.
    pub weekend_multiplier: Decimal,
    /// Bookings starting at or after this hour pay the lighting fee.
    pub evening_start_hour: u32,
    /// Flat fees.
    pub fees: SurchargeFees,
    /// Recurrence bounds.
    #[serde(default)]
    pub recurrence: RecurrenceLimits,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            weekend_multiplier: Decimal::new(115, 2),
            evening_start_hour: 18,
            fees: SurchargeFees::default(),
            recurrence: RecurrenceLimits::default(),
        }
    }
}

/// Field catalog file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldsConfig {
    /// All rentable fields.
    pub fields: Vec<Field>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Pricing constants.
    pricing: PricingConfig,
    /// Field catalog, sorted by id.
    fields: Vec<Field>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(pricing: PricingConfig, fields: Vec<Field>) -> Self {
        let mut sorted_fields = fields;
        sorted_fields.sort_by_key(|field| field.id);
        Self {
            pricing,
            fields: sorted_fields,
        }
    }

    /// Returns the pricing configuration.
    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Returns all fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}
