//! HTTP API module for the ESI contribution engine.
//!
//! This module provides the REST endpoints for the ESI dashboard, the
//! contribution listing, report export, settings, period liability,
//! challan data and ad-hoc wage assessment.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::{SESSION_COOKIE, SESSION_HEADER, SessionRegistry, session_id_from};
pub use handlers::create_router;
pub use request::{CalculateRequest, ContributionQuery, ReportRequest, SettingsUpdateRequest};
pub use response::{
    ApiError, ApiErrorResponse, ContributionListView, DashboardView, LiabilityView,
    ReportFormView, SettingsView, SuccessMessage,
};
pub use state::AppState;
