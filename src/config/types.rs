//! Configuration types for the ESI contribution engine.
//!
//! This module contains the strongly-typed structures deserialized from the
//! payroll data directory and the persisted ESI settings document.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    ContributionPeriod, ContributionTransaction, Department, Employee, SalaryComponent,
};

/// The ESI rate settings.
///
/// Persisted as a flat JSON document with exactly these five numeric fields.
/// Writes replace the whole document; there is no versioning.
///
/// # Example
///
/// ```
/// use esi_engine::config::ContributionSettings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings = ContributionSettings::default();
/// assert_eq!(settings.employee_esi_rate, Decimal::from_str("0.75").unwrap());
/// assert_eq!(settings.esi_threshold, Decimal::from(21000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSettings {
    /// Employee contribution rate, in percent of gross wage.
    #[serde(with = "rust_decimal::serde::float")]
    pub employee_esi_rate: Decimal,
    /// Employer contribution rate, in percent of gross wage.
    #[serde(with = "rust_decimal::serde::float")]
    pub employer_esi_rate: Decimal,
    /// Gross wage at or below which an employee is covered.
    #[serde(with = "rust_decimal::serde::float")]
    pub esi_threshold: Decimal,
    /// Wage ceiling for contribution calculation.
    #[serde(with = "rust_decimal::serde::float")]
    pub esi_ceiling: Decimal,
    /// Medical benefit rate, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub medical_benefit_rate: Decimal,
}

impl Default for ContributionSettings {
    fn default() -> Self {
        Self {
            employee_esi_rate: Decimal::new(75, 2),
            employer_esi_rate: Decimal::new(325, 2),
            esi_threshold: Decimal::new(21000, 0),
            esi_ceiling: Decimal::new(25000, 0),
            medical_benefit_rate: Decimal::new(4, 0),
        }
    }
}

impl ContributionSettings {
    /// The field names accepted by [`ContributionSettings::from_fields`].
    pub const FIELD_NAMES: [&'static str; 5] = [
        "employee_esi_rate",
        "employer_esi_rate",
        "esi_threshold",
        "esi_ceiling",
        "medical_benefit_rate",
    ];

    /// Builds a complete settings record from raw submitted form fields.
    ///
    /// Every field is coerced to a number on its own; a missing or
    /// non-numeric value becomes zero. Unknown fields are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use esi_engine::config::ContributionSettings;
    /// use rust_decimal::Decimal;
    /// use std::collections::HashMap;
    ///
    /// let mut fields = HashMap::new();
    /// fields.insert("employee_esi_rate".to_string(), "0.75".to_string());
    /// fields.insert("esi_threshold".to_string(), "not a number".to_string());
    ///
    /// let settings = ContributionSettings::from_fields(&fields);
    /// assert_eq!(settings.employee_esi_rate, Decimal::new(75, 2));
    /// assert_eq!(settings.esi_threshold, Decimal::ZERO);
    /// assert_eq!(settings.esi_ceiling, Decimal::ZERO);
    /// ```
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let field = |name: &str| coerce_decimal(fields.get(name).map(String::as_str));
        Self {
            employee_esi_rate: field("employee_esi_rate"),
            employer_esi_rate: field("employer_esi_rate"),
            esi_threshold: field("esi_threshold"),
            esi_ceiling: field("esi_ceiling"),
            medical_benefit_rate: field("medical_benefit_rate"),
        }
    }
}

/// Converts an optional raw string into a decimal, falling back to zero.
fn coerce_decimal(raw: Option<&str>) -> Decimal {
    raw.map(str::trim)
        .and_then(|s| {
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        })
        .unwrap_or(Decimal::ZERO)
}

/// A permission a session can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// View summaries, listings, liabilities and challans.
    Payroll,
    /// View the report form and generate exports.
    Reports,
    /// View and change ESI settings.
    Settings,
}

impl Permission {
    /// Returns the permission name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Payroll => "payroll",
            Permission::Reports => "reports",
            Permission::Settings => "settings",
        }
    }
}

/// A pre-provisioned session entry from `sessions.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    /// The opaque session identifier presented by clients.
    pub session_id: String,
    /// The user the session belongs to.
    pub user_id: String,
    /// Permissions held by the session.
    #[serde(default)]
    pub permissions: Vec<Permission>,
    /// When the session stops being valid; never if absent.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Departments file structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DepartmentsFile {
    pub departments: Vec<Department>,
}

/// Employees file structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EmployeesFile {
    pub employees: Vec<Employee>,
}

/// Periods file structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PeriodsFile {
    pub periods: Vec<ContributionPeriod>,
}

/// Salary components file structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ComponentsFile {
    pub components: Vec<SalaryComponent>,
}

/// Transactions file structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TransactionsFile {
    #[serde(default)]
    pub transactions: Vec<ContributionTransaction>,
}

/// Sessions file structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionsFile {
    #[serde(default)]
    pub sessions: Vec<SessionGrant>,
}

/// The payroll tables read by the contribution calculator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollData {
    /// All departments.
    pub departments: Vec<Department>,
    /// All employees, active or not.
    pub employees: Vec<Employee>,
    /// All payroll periods.
    pub periods: Vec<ContributionPeriod>,
    /// All salary components.
    pub components: Vec<SalaryComponent>,
    /// All payroll transactions.
    pub transactions: Vec<ContributionTransaction>,
}
