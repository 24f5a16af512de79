//! HTTP request handlers for the pricing API.
//!
//! This module contains the router and the handler functions for all
//! endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    expand_recurrence, has_time_overlap, parse_date, price_booking, quote_series,
};
use crate::config::ConfigLoader;
use crate::error::{BookingError, BookingResult};
use crate::models::{PriceQuote, RecurrenceExpansion, SeriesQuote};

use super::request::{OccurrencesRequest, OverlapRequest, QuoteRequest, SeriesQuoteRequest};
use super::response::{ApiError, ApiErrorResponse, OverlapResponse, QuoteEnvelope};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/fields", get(fields_handler))
        .route("/quote", post(quote_handler))
        .route("/occurrences", post(occurrences_handler))
        .route("/overlap", post(overlap_handler))
        .route("/series-quote", post(series_quote_handler))
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for GET /fields: the field catalog.
async fn fields_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    ok_json(json!({
        "currency": config.pricing().currency,
        "fields": config.fields(),
    }))
}

/// Handler for POST /quote.
///
/// Prices a single booking at either the given hourly rate or the rate of
/// the named field.
async fn quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    match build_quote(state.config(), request) {
        Ok(quote) => {
            info!(
                correlation_id = %correlation_id,
                date = %quote.date,
                total = %quote.total,
                duration_us = started.elapsed().as_micros() as u64,
                "Quote completed"
            );
            ok_json(QuoteEnvelope::new(quote))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn build_quote(config: &ConfigLoader, request: QuoteRequest) -> BookingResult<PriceQuote> {
    let rate = request.hourly_rate(config)?;
    let booking = request.into_booking(rate)?;
    price_booking(&booking, config.pricing())
}

/// Handler for POST /occurrences: expands a recurrence rule.
async fn occurrences_handler(
    State(state): State<AppState>,
    payload: Result<Json<OccurrencesRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match expand(state.config(), &request) {
        Ok(expansion) => {
            info!(
                correlation_id = %correlation_id,
                frequency = ?request.rule.frequency,
                occurrences = expansion.occurrences.len(),
                skipped = expansion.skipped.len(),
                "Recurrence expanded"
            );
            ok_json(expansion)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn expand(config: &ConfigLoader, request: &OccurrencesRequest) -> BookingResult<RecurrenceExpansion> {
    let anchor = parse_date(&request.anchor_date)?;
    Ok(expand_recurrence(
        anchor,
        &request.rule,
        &config.pricing().recurrence,
    ))
}

/// Handler for POST /overlap.
async fn overlap_handler(payload: Result<Json<OverlapRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match has_time_overlap(
        &request.start1,
        &request.end1,
        &request.start2,
        &request.end2,
    ) {
        Ok(overlap) => ok_json(OverlapResponse { overlap }),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /series-quote.
///
/// Prices every occurrence of a recurring booking on a catalog field and
/// flags the ones that clash with blackouts, opening hours or existing
/// reservations.
async fn series_quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<SeriesQuoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing series quote request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    match build_series_quote(state.config(), request) {
        Ok(quote) => {
            info!(
                correlation_id = %correlation_id,
                field_id = quote.field_id,
                occurrences = quote.occurrences.len(),
                conflicts = quote.conflict_count,
                total = %quote.total,
                duration_us = started.elapsed().as_micros() as u64,
                "Series quote completed"
            );
            ok_json(QuoteEnvelope::new(quote))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn build_series_quote(
    config: &ConfigLoader,
    request: SeriesQuoteRequest,
) -> BookingResult<SeriesQuote> {
    let field = config.get_field(request.field_id)?;
    let (series, booked) = request.into_parts()?;
    quote_series(field, &series, &booked, config.pricing())
}

fn ok_json<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

fn error_response(correlation_id: Uuid, err: BookingError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Turns a body that failed to deserialize into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
