//! Response types for the ESI API.
//!
//! This module defines the JSON view models returned by each endpoint and
//! the mapping from [`EngineError`] to HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::ContributionFilter;
use crate::config::ContributionSettings;
use crate::error::EngineError;
use crate::models::{
    ContributionPeriod, ContributionRow, ContributionSummary, Department, Liability,
    RecentTransaction,
};

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

    /// Creates a malformed request body error response.
    pub fn malformed_body(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_REQUEST", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, error) = match error {
            EngineError::ConfigNotFound { path } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            ),
            EngineError::ConfigParseError { path, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
            EngineError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("UNAUTHENTICATED", "Authentication required"),
            ),
            EngineError::PermissionDenied { permission } => (
                StatusCode::FORBIDDEN,
                ApiError::with_details(
                    "PERMISSION_DENIED",
                    "Access denied",
                    format!("The '{}' permission is required", permission),
                ),
            ),
            EngineError::InvalidCsrfToken => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_TOKEN", "Invalid token"),
            ),
            EngineError::InvalidReportType { report_type } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_REPORT_TYPE",
                    "Invalid report type",
                    format!("Unsupported report type '{}'", report_type),
                ),
            ),
            EngineError::PeriodNotFound { period_id } => (
                StatusCode::NOT_FOUND,
                ApiError::new(
                    "PERIOD_NOT_FOUND",
                    format!("Payroll period not found: {}", period_id),
                ),
            ),
            EngineError::SettingsWriteFailed { path, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "SETTINGS_WRITE_FAILED",
                    "Failed to update ESI settings",
                    format!("{}: {}", path, message),
                ),
            ),
            EngineError::CalculationError { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
            EngineError::StoreError { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Payroll data unavailable", message),
            ),
            EngineError::BatchFailed {
                batch_number,
                message,
            } => (
                StatusCode::BAD_GATEWAY,
                ApiError::with_details(
                    "BATCH_FAILED",
                    format!("Batch {} failed", batch_number),
                    message,
                ),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Body of a successful state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessMessage {
    /// Always true.
    pub success: bool,
    /// What was done.
    pub message: String,
}

impl SuccessMessage {
    /// Creates a success body with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Body of `GET /esi`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    /// The financial year the summary covers.
    pub current_fy: String,
    /// Totals for the financial year.
    pub esi_summary: ContributionSummary,
    /// The latest ESI deductions, newest first.
    pub recent_transactions: Vec<RecentTransaction>,
}

/// Body of `GET /esi/contributions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionListView {
    /// One row per deduction of an active employee.
    pub contributions: Vec<ContributionRow>,
    /// Latest periods, for the period selector.
    pub periods: Vec<ContributionPeriod>,
    /// Active departments, for the department selector.
    pub departments: Vec<Department>,
    /// The filters that were applied.
    pub filter: ContributionFilter,
}

/// Body of `GET /esi/reports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFormView {
    /// Latest periods, newest first.
    pub periods: Vec<ContributionPeriod>,
    /// Distinct financial years, latest first.
    pub financial_years: Vec<String>,
    /// Token to submit with the report form.
    pub csrf_token: String,
}

/// Body of `GET /esi/settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsView {
    /// The current settings.
    pub esi_settings: ContributionSettings,
    /// Token to submit with the settings form.
    pub csrf_token: String,
}

/// Body of `GET /esi/liability/{period_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiabilityView {
    /// The period requested.
    pub period_id: String,
    /// ESI payable for the period.
    pub liability: Liability,
}
