//! HTTP API for the PlayRent pricing engine.
//!
//! Exposes price quotes, recurrence expansion, overlap checks and series
//! quotes as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{OccurrencesRequest, OverlapRequest, QuoteRequest, SeriesQuoteRequest};
pub use response::{ApiError, ApiErrorResponse, OverlapResponse, QuoteEnvelope};
pub use state::AppState;
