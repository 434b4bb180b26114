//! Request types for the ESI API.
//!
//! Query strings and form bodies treat an empty value the same as an absent
//! one, so `?period_id=` means "no period filter".

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::calculation::{ContributionFilter, ReportScope};

/// Deserializes a string field, mapping `""` to `None`.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Query parameters of `GET /esi/contributions`.
///
/// `period` and `department` are older names for the same filters; the
/// `_id` names win when both are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributionQuery {
    /// Period filter.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub period_id: Option<String>,
    /// Department filter.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub department_id: Option<String>,
    /// Older name for `period_id`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub period: Option<String>,
    /// Older name for `department_id`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub department: Option<String>,
}

impl From<ContributionQuery> for ContributionFilter {
    fn from(query: ContributionQuery) -> Self {
        ContributionFilter {
            period_id: query.period_id.or(query.period),
            department_id: query.department_id.or(query.department),
        }
    }
}

/// Form body of `POST /esi/reports`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Report to generate; `contribution_summary` when absent.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub report_type: Option<String>,
    /// Period filter.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub period_id: Option<String>,
    /// Financial-year filter, e.g. `2024-2025`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub financial_year: Option<String>,
    /// `excel` (default) or anything else for CSV.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub format: Option<String>,
}

impl ReportRequest {
    /// The filters to apply to the report query.
    pub fn scope(&self) -> ReportScope {
        ReportScope {
            period_id: self.period_id.clone(),
            financial_year: self.financial_year.clone(),
        }
    }
}

/// Form body of `POST /esi/settings`.
///
/// Every field other than `csrf_token` is kept raw; coercion to numbers
/// happens when the settings are built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdateRequest {
    /// The anti-forgery token issued with the settings view.
    #[serde(default)]
    pub csrf_token: String,
    /// The submitted setting values.
    #[serde(flatten)]
    pub fields: HashMap<String, String>,
}

/// JSON body of `POST /esi/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// The gross wage to assess.
    pub gross_wage: Decimal,
}
