//! Contribution result models.
//!
//! This module contains the aggregate and per-row results produced by the
//! contribution calculator, plus the audit trace attached to ad-hoc
//! calculations.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ContributionPeriod;

/// Employee, employer and total contribution for a single wage.
///
/// # Example
///
/// ```
/// use esi_engine::models::ContributionBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let breakdown = ContributionBreakdown {
///     employee: Decimal::from_str("75.00").unwrap(),
///     employer: Decimal::from_str("325.00").unwrap(),
///     total: Decimal::from_str("400.00").unwrap(),
/// };
/// assert_eq!(breakdown.employee + breakdown.employer, breakdown.total);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    /// The employee's share.
    pub employee: Decimal,
    /// The employer's share.
    pub employer: Decimal,
    /// Sum of the two shares.
    pub total: Decimal,
}

/// Aggregated ESI contributions for a financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSummary {
    /// The financial year summarized.
    pub financial_year: String,
    /// Number of distinct employees with an ESI deduction in the year.
    pub total_employees: u64,
    /// Sum of employee contributions.
    pub employee_total: Decimal,
    /// Sum of derived employer contributions.
    pub employer_total: Decimal,
    /// Sum of employee and employer contributions.
    pub grand_total: Decimal,
}

/// Total ESI payable for one payroll period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Liability {
    /// Sum of employee contributions.
    pub employee_total: Decimal,
    /// Sum of derived employer contributions.
    pub employer_total: Decimal,
    /// Sum of employee and employer contributions.
    pub grand_total: Decimal,
}

/// Data needed to fill in an ESI payment challan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallanData {
    /// The period being remitted.
    pub period: ContributionPeriod,
    /// What is owed for the period.
    pub liability: Liability,
    /// The 21st of the month following the period end.
    pub due_date: NaiveDate,
    /// Payment reference built from the period id and the request date.
    pub reference_number: String,
}

/// Per-employee ESI breakdown for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRow {
    /// The employee code.
    pub emp_code: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The employee's ESI number, if issued.
    pub esi_number: Option<String>,
    /// The employee's department.
    pub department_name: String,
    /// Name of the payroll period.
    pub period_name: String,
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Sum of ESI-applicable earnings in the period.
    pub esi_wages: Decimal,
    /// Employee contribution (the recorded deduction).
    pub employee_esi: Decimal,
    /// Derived employer contribution.
    pub employer_esi: Decimal,
    /// Employee plus employer contribution.
    pub total_esi: Decimal,
}

/// A recently recorded ESI deduction, shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentTransaction {
    /// The employee code.
    pub emp_code: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// Name of the payroll period.
    pub period_name: String,
    /// Absolute deduction amount.
    pub esi_amount: Decimal,
    /// When the deduction was recorded.
    pub created_at: NaiveDateTime,
}

/// ESI totals for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSummaryRow {
    /// The department name.
    pub department_name: String,
    /// Distinct employees with deductions.
    pub employee_count: u64,
    /// Sum of employee contributions.
    pub total_employee_esi: Decimal,
    /// Sum of derived employer contributions.
    pub total_employer_esi: Decimal,
    /// Sum of both.
    pub total_esi_contribution: Decimal,
}

/// ESI totals for one period of a financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummaryRow {
    /// Name of the payroll period.
    pub period_name: String,
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Distinct employees with deductions.
    pub employee_count: u64,
    /// Sum of employee contributions.
    pub employee_contribution: Decimal,
    /// Sum of derived employer contributions.
    pub employer_contribution: Decimal,
    /// Sum of both.
    pub total_contribution: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The result of an ad-hoc contribution calculation for one gross wage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The gross wage that was evaluated.
    pub gross_wage: Decimal,
    /// Whether the wage is within the eligibility threshold.
    pub eligible: bool,
    /// The contribution due, present only when eligible.
    pub contribution: Option<ContributionBreakdown>,
    /// The decisions taken, in order.
    pub audit_steps: Vec<AuditStep>,
}
