//! Configuration loading and management for the pricing engine.
//!
//! This module loads pricing constants and the field catalog from YAML
//! files in a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use playrent_pricing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/playrent").unwrap();
//! println!("Fields on offer: {}", config.fields().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, FieldsConfig, MAX_SERIES_OCCURRENCES, PricingConfig, RecurrenceLimits,
    SurchargeFees,
};
