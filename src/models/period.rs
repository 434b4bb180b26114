//! Payroll period model.
//!
//! This module contains the [`ContributionPeriod`] type that groups payroll
//! transactions into monthly periods and tags them with a financial year.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A payroll period with its date range and financial-year label.
///
/// Periods are immutable once payroll for them has been finalized.
///
/// # Example
///
/// ```
/// use esi_engine::models::ContributionPeriod;
/// use chrono::NaiveDate;
///
/// let period = ContributionPeriod {
///     id: "12".to_string(),
///     period_name: "March 2024".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
///     financial_year: "2023-2024".to_string(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionPeriod {
    /// Unique identifier for the period.
    pub id: String,
    /// Display name of the period (e.g., "April 2024").
    pub period_name: String,
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
    /// The financial year the period belongs to (e.g., "2024-2025").
    pub financial_year: String,
}

impl ContributionPeriod {
    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
