//! Report data for the ESI report generator.
//!
//! Each [`ReportType`] selects one query; [`build_report`] runs it and turns
//! the rows into a [`ReportTable`] ready for export.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ContributionPeriod, Department, DepartmentSummaryRow, MonthlySummaryRow};
use crate::report::{ReportTable, ToReportRow};
use crate::store::PayrollStore;

use super::ledger::{ContributionTotals, EsiLedger};
use super::listing::{ContributionFilter, list_contributions};

/// Title shown above every exported ESI report.
pub const REPORT_TITLE: &str = "ESI Report";

/// The reports the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Totals per department.
    #[default]
    ContributionSummary,
    /// One row per employee deduction.
    EmployeeWise,
    /// Totals per period of a financial year.
    MonthlySummary,
}

impl ReportType {
    /// Returns the wire name of the report type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::ContributionSummary => "contribution_summary",
            ReportType::EmployeeWise => "employee_wise",
            ReportType::MonthlySummary => "monthly_summary",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contribution_summary" => Ok(ReportType::ContributionSummary),
            "employee_wise" => Ok(ReportType::EmployeeWise),
            "monthly_summary" => Ok(ReportType::MonthlySummary),
            other => Err(EngineError::InvalidReportType {
                report_type: other.to_string(),
            }),
        }
    }
}

/// Optional filters shared by all report types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportScope {
    /// Restrict to one period.
    pub period_id: Option<String>,
    /// Restrict to one financial year.
    pub financial_year: Option<String>,
}

/// Totals per department, ordered by department name.
///
/// Departments are grouped by id, so two departments sharing a name stay
/// separate rows. A period filter takes precedence over a financial-year filter; with
/// neither, every period is included. Inactive employees are counted.
pub fn department_summary_report(
    store: &dyn PayrollStore,
    scope: &ReportScope,
) -> EngineResult<Vec<DepartmentSummaryRow>> {
    let ledger = EsiLedger::load(store)?;
    // Keyed by (name, id): sorted by name, grouped by id.
    let mut by_department: BTreeMap<(String, String), ContributionTotals> = BTreeMap::new();

    for transaction in ledger.esi_transactions() {
        let Some(period) = ledger.period(&transaction.period_id) else {
            continue;
        };
        let in_scope = match (&scope.period_id, &scope.financial_year) {
            (Some(period_id), _) => &transaction.period_id == period_id,
            (None, Some(financial_year)) => &period.financial_year == financial_year,
            (None, None) => true,
        };
        if !in_scope {
            continue;
        }
        let Some(department) = ledger
            .employee(&transaction.employee_id)
            .and_then(|e| ledger.department(&e.department_id))
        else {
            continue;
        };
        by_department
            .entry((department.name.clone(), department.id.clone()))
            .or_default()
            .add(transaction);
    }

    Ok(by_department
        .into_iter()
        .map(|((department_name, _), totals)| {
            let liability = totals.as_liability();
            DepartmentSummaryRow {
                department_name,
                employee_count: totals.employee_count(),
                total_employee_esi: liability.employee_total,
                total_employer_esi: liability.employer_total,
                total_esi_contribution: liability.grand_total,
            }
        })
        .collect())
}

/// Totals per period of a financial year, ordered by period start date.
///
/// Periods without deductions are omitted. With no financial year every
/// period is included.
pub fn monthly_summary_report(
    store: &dyn PayrollStore,
    financial_year: Option<&str>,
) -> EngineResult<Vec<MonthlySummaryRow>> {
    let ledger = EsiLedger::load(store)?;
    let mut by_period: BTreeMap<String, ContributionTotals> = BTreeMap::new();

    for transaction in ledger.esi_transactions() {
        let Some(period) = ledger.period(&transaction.period_id) else {
            continue;
        };
        if financial_year.is_some_and(|fy| period.financial_year != fy) {
            continue;
        }
        by_period
            .entry(period.id.clone())
            .or_default()
            .add(transaction);
    }

    let mut rows: Vec<MonthlySummaryRow> = by_period
        .into_iter()
        .filter_map(|(period_id, totals)| {
            let period = ledger.period(&period_id)?;
            let liability = totals.as_liability();
            Some(MonthlySummaryRow {
                period_name: period.period_name.clone(),
                start_date: period.start_date,
                end_date: period.end_date,
                employee_count: totals.employee_count(),
                employee_contribution: liability.employee_total,
                employer_contribution: liability.employer_total,
                total_contribution: liability.grand_total,
            })
        })
        .collect();

    rows.sort_by_key(|r| r.start_date);
    Ok(rows)
}

/// Runs the query behind a report type and tabulates the result.
///
/// The employee-wise report filters by period only; a financial year is
/// ignored for it.
pub fn build_report(
    store: &dyn PayrollStore,
    report_type: ReportType,
    scope: &ReportScope,
) -> EngineResult<ReportTable> {
    let table = match report_type {
        ReportType::ContributionSummary => {
            let rows = department_summary_report(store, scope)?;
            tabulate(&rows)
        }
        ReportType::EmployeeWise => {
            let filter = ContributionFilter {
                period_id: scope.period_id.clone(),
                department_id: None,
            };
            let rows = list_contributions(store, &filter)?;
            tabulate(&rows)
        }
        ReportType::MonthlySummary => {
            let rows = monthly_summary_report(store, scope.financial_year.as_deref())?;
            tabulate(&rows)
        }
    };
    Ok(table)
}

fn tabulate<R: ToReportRow>(rows: &[R]) -> ReportTable {
    ReportTable::from_rows(REPORT_TITLE, rows)
}

/// Number of periods offered by the report form.
pub const REPORT_FORM_PERIOD_LIMIT: usize = 12;

/// Returns the latest periods, newest start date first.
pub fn latest_periods(
    store: &dyn PayrollStore,
    limit: usize,
) -> EngineResult<Vec<ContributionPeriod>> {
    let mut periods = store.periods()?;
    periods.sort_by_key(|p| Reverse(p.start_date));
    periods.truncate(limit);
    Ok(periods)
}

/// Returns every financial year that has a period, latest first.
pub fn financial_years(store: &dyn PayrollStore) -> EngineResult<Vec<String>> {
    let years: BTreeSet<String> = store
        .periods()?
        .into_iter()
        .map(|p| p.financial_year)
        .collect();
    Ok(years.into_iter().rev().collect())
}

/// Returns the active departments ordered by name.
pub fn active_departments(store: &dyn PayrollStore) -> EngineResult<Vec<Department>> {
    let mut departments: Vec<Department> = store
        .departments()?
        .into_iter()
        .filter(Department::is_active)
        .collect();
    departments.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(departments)
}
