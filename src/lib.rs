//! ESI contribution engine
//!
//! This crate tracks Employee State Insurance contributions: it aggregates
//! recorded deductions into summaries, listings, period liabilities and
//! challan data, exports reports as spreadsheet HTML or CSV, and serves it
//! all over an authorized HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod batch;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod store;
