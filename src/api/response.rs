//! Response types for the pricing API.
//!
//! This module defines the quote envelope, the error body and the mapping
//! from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BookingError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<BookingError> for ApiErrorResponse {
    fn from(error: BookingError) -> Self {
        let message = error.to_string();
        match error {
            BookingError::InvalidTimeFormat { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details("INVALID_TIME_FORMAT", message, "Times must be HH:MM"),
            ),
            BookingError::InvalidDate { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details("INVALID_DATE", message, "Dates must be yyyy-mm-dd"),
            ),
            BookingError::InvalidBooking { field, .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_BOOKING",
                    message,
                    format!("Check the '{}' field of the request", field),
                ))
            }
            BookingError::FieldNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "FIELD_NOT_FOUND",
                    message,
                    format!("No field with id {} exists in the catalog", id),
                ),
            },
            BookingError::ConfigNotFound { .. } | BookingError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
        }
    }
}

/// Wraps a computed result with the metadata every quote carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteEnvelope<T> {
    /// Unique id of this quote.
    pub quote_id: Uuid,
    /// When the quote was produced.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced it.
    pub engine_version: String,
    /// The quote itself, flattened into the envelope.
    #[serde(flatten)]
    pub quote: T,
}

impl<T> QuoteEnvelope<T> {
    /// Stamps `quote` with a fresh id and the current time.
    pub fn new(quote: T) -> Self {
        Self {
            quote_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            quote,
        }
    }
}

/// Response body for `POST /overlap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapResponse {
    /// Whether the two windows share at least one minute.
    pub overlap: bool,
}
