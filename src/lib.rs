//! PlayRent booking pricing engine.
//!
//! This crate prices sports-field bookings (base rate, weekend multiplier,
//! evening/lights and add-on fees), checks same-day time overlaps, expands
//! monthly and yearly recurrence rules into concrete dates, and serves all
//! of it over a small JSON API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
