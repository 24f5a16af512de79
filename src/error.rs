//! Error types for the PlayRent pricing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while pricing a booking.

use thiserror::Error;

/// The main error type for the pricing engine.
///
/// Malformed times and dates are rejected up front instead of flowing
/// through the arithmetic as garbage values.
///
/// # Example
///
/// ```
/// use playrent_pricing::error::BookingError;
///
/// let error = BookingError::InvalidTimeFormat {
///     value: "25:99".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time '25:99': expected HH:MM");
/// ```
#[derive(Debug, Error)]
pub enum BookingError {
    /// A wall-clock time could not be parsed as `HH:MM`.
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTimeFormat {
        /// The rejected input.
        value: String,
    },

    /// A calendar date could not be parsed as `yyyy-mm-dd`.
    #[error("Invalid date '{value}': expected yyyy-mm-dd")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// A booking request was well-formed but semantically invalid.
    #[error("Invalid booking field '{field}': {message}")]
    InvalidBooking {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No field with the given id exists in the catalog.
    #[error("Field not found: {id}")]
    FieldNotFound {
        /// The requested field id.
        id: u32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl BookingError {
    /// Shorthand for an [`BookingError::InvalidBooking`] error.
    pub fn invalid_booking(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidBooking {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return BookingError.
pub type BookingResult<T> = Result<T, BookingError>;
