//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pricing
//! constants and the field catalog from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{BookingError, BookingResult};
use crate::models::Field;

use super::types::{EngineConfig, FieldsConfig, MAX_SERIES_OCCURRENCES, PricingConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/playrent/
/// ├── pricing.yaml   # Surcharges, fees and recurrence limits
/// └── fields.yaml    # Field catalog
/// ```
///
/// # Example
///
/// ```no_run
/// use playrent_pricing::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/playrent").unwrap();
/// let field = loader.get_field(1).unwrap();
/// println!("{} costs {} per hour", field.name, field.base_price_per_hour);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML,
    /// or holds values the engine cannot work with.
    pub fn load<P: AsRef<Path>>(path: P) -> BookingResult<Self> {
        let path = path.as_ref();

        let pricing_path = path.join("pricing.yaml");
        let pricing = Self::load_yaml::<PricingConfig>(&pricing_path)?;
        Self::validate_pricing(&pricing, &pricing_path)?;

        let fields_path = path.join("fields.yaml");
        let fields = Self::load_yaml::<FieldsConfig>(&fields_path)?.fields;
        Self::validate_fields(&fields, &fields_path)?;

        debug!(
            path = %path.display(),
            fields = fields.len(),
            "Loaded pricing configuration"
        );

        Ok(Self::from_config(EngineConfig::new(pricing, fields)))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> BookingResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| BookingError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| BookingError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_pricing(pricing: &PricingConfig, path: &Path) -> BookingResult<()> {
        let fail = |message: String| BookingError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        if pricing.weekend_multiplier < Decimal::ONE {
            return Err(fail(format!(
                "weekend_multiplier must be at least 1, got {}",
                pricing.weekend_multiplier
            )));
        }
        if pricing.evening_start_hour > 23 {
            return Err(fail(format!(
                "evening_start_hour must be between 0 and 23, got {}",
                pricing.evening_start_hour
            )));
        }
        let fees = &pricing.fees;
        if [fees.lights, fees.equipment_pack, fees.coach]
            .iter()
            .any(|fee| fee.is_sign_negative() && !fee.is_zero())
        {
            return Err(fail("fees must not be negative".to_string()));
        }
        let limits = &pricing.recurrence;
        if limits.max_occurrences == 0 || limits.max_occurrences > MAX_SERIES_OCCURRENCES {
            return Err(fail(format!(
                "recurrence.max_occurrences must be between 1 and {}, got {}",
                MAX_SERIES_OCCURRENCES, limits.max_occurrences
            )));
        }
        Ok(())
    }

    fn validate_fields(fields: &[Field], path: &Path) -> BookingResult<()> {
        let mut seen = HashSet::new();
        for field in fields {
            if !seen.insert(field.id) {
                return Err(BookingError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate field id {}", field.id),
                });
            }
            if field.base_price_per_hour.is_sign_negative() && !field.base_price_per_hour.is_zero()
            {
                return Err(BookingError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("field {} has a negative base price", field.id),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the pricing configuration.
    pub fn pricing(&self) -> &PricingConfig {
        self.config.pricing()
    }

    /// Returns the field catalog.
    pub fn fields(&self) -> &[Field] {
        self.config.fields()
    }

    /// Gets a field by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use playrent_pricing::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/playrent")?;
    /// let field = loader.get_field(1)?;
    /// println!("Field: {}", field.name);
    /// # Ok::<(), playrent_pricing::error::BookingError>(())
    /// ```
    pub fn get_field(&self, id: u32) -> BookingResult<&Field> {
        self.config
            .fields()
            .iter()
            .find(|field| field.id == id)
            .ok_or(BookingError::FieldNotFound { id })
    }
}
