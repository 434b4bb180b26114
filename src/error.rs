//! Error types for the ESI contribution engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while serving contribution data.

use thiserror::Error;

/// The main error type for the ESI contribution engine.
///
/// Empty query results are never represented here; they are returned as
/// empty collections or zero-valued aggregates.
///
/// # Example
///
/// ```
/// use esi_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/employees.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/employees.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration or data file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration or data file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The request carried no session, or the session has expired.
    #[error("Authentication required")]
    Unauthenticated,

    /// The session lacks the permission required by the action.
    #[error("Permission denied: {permission}")]
    PermissionDenied {
        /// The permission that was required.
        permission: String,
    },

    /// The anti-forgery token did not match the one issued to the session.
    #[error("Invalid token")]
    InvalidCsrfToken,

    /// The requested report type is not supported.
    #[error("Invalid report type: {report_type}")]
    InvalidReportType {
        /// The report type that was requested.
        report_type: String,
    },

    /// A payroll period referenced by the request does not exist.
    #[error("Payroll period not found: {period_id}")]
    PeriodNotFound {
        /// The period identifier that was requested.
        period_id: String,
    },

    /// The settings document could not be written.
    #[error("Failed to save ESI settings to '{path}': {message}")]
    SettingsWriteFailed {
        /// Where the settings were being written.
        path: String,
        /// A description of the I/O failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// The payroll data store failed to answer a query.
    ///
    /// Returned by [`PayrollStore`](crate::store::PayrollStore) backends
    /// that can fail; the bundled in-memory store never does.
    #[error("Payroll store error: {message}")]
    StoreError {
        /// A description of the failure.
        message: String,
    },

    /// A batch submitted for bulk processing was rejected.
    #[error("Batch {batch_number} failed: {message}")]
    BatchFailed {
        /// The one-based number of the failing batch.
        batch_number: usize,
        /// The reason reported for the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
