//! Per-employee contribution listing.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::ContributionRow;
use crate::store::PayrollStore;

use super::contribution::derive_from_deduction;
use super::ledger::EsiLedger;

/// Optional filters for [`list_contributions`].
///
/// A `None` field leaves that dimension unconstrained; it never matches
/// "no rows".
///
/// # Example
///
/// ```
/// use esi_engine::calculation::ContributionFilter;
///
/// let filter = ContributionFilter::default().with_period("3");
/// assert_eq!(filter.period_id.as_deref(), Some("3"));
/// assert!(filter.department_id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionFilter {
    /// Restrict to transactions of this period.
    pub period_id: Option<String>,
    /// Restrict to employees of this department.
    pub department_id: Option<String>,
}

impl ContributionFilter {
    /// Restricts the filter to a period.
    pub fn with_period(mut self, period_id: impl Into<String>) -> Self {
        self.period_id = Some(period_id.into());
        self
    }

    /// Restricts the filter to a department.
    pub fn with_department(mut self, department_id: impl Into<String>) -> Self {
        self.department_id = Some(department_id.into());
        self
    }
}

/// Lists the ESI breakdown of every active employee, one row per deduction.
///
/// Rows carry the ESI wage base for the same period, the recorded employee
/// deduction and the derived employer and total amounts. They are ordered by
/// employee code, then by period start date.
///
/// # Example
///
/// ```no_run
/// use esi_engine::calculation::{list_contributions, ContributionFilter};
/// use esi_engine::config::DataLoader;
/// use esi_engine::store::InMemoryPayrollStore;
///
/// let loader = DataLoader::load("./data/sample").unwrap();
/// let store = InMemoryPayrollStore::new(loader.data().clone());
/// let rows = list_contributions(&store, &ContributionFilter::default().with_department("1")).unwrap();
/// for row in rows {
///     println!("{} {} {}", row.emp_code, row.period_name, row.total_esi);
/// }
/// ```
pub fn list_contributions(
    store: &dyn PayrollStore,
    filter: &ContributionFilter,
) -> EngineResult<Vec<ContributionRow>> {
    let ledger = EsiLedger::load(store)?;

    let mut rows: Vec<ContributionRow> = ledger
        .esi_transactions()
        .filter(|t| {
            filter
                .period_id
                .as_deref()
                .is_none_or(|id| t.period_id == id)
        })
        .filter_map(|t| {
            let employee = ledger.employee(&t.employee_id)?;
            if !employee.is_active() {
                return None;
            }
            if let Some(department_id) = filter.department_id.as_deref() {
                if employee.department_id != department_id {
                    return None;
                }
            }
            let department = ledger.department(&employee.department_id)?;
            let period = ledger.period(&t.period_id)?;
            let derived = derive_from_deduction(t.amount);

            Some(ContributionRow {
                emp_code: employee.emp_code.clone(),
                first_name: employee.first_name.clone(),
                last_name: employee.last_name.clone(),
                esi_number: employee.esi_number.clone(),
                department_name: department.name.clone(),
                period_name: period.period_name.clone(),
                start_date: period.start_date,
                end_date: period.end_date,
                esi_wages: ledger.esi_wages(&employee.id, &t.period_id),
                employee_esi: derived.employee,
                employer_esi: derived.employer,
                total_esi: derived.total,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.emp_code
            .cmp(&b.emp_code)
            .then_with(|| a.start_date.cmp(&b.start_date))
    });
    Ok(rows)
}
