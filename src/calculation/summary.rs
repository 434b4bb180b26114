//! Financial-year summary and recent activity.

use std::cmp::Reverse;

use crate::error::EngineResult;
use crate::models::{ContributionSummary, RecentTransaction};
use crate::store::PayrollStore;

use super::ledger::{ContributionTotals, EsiLedger};

/// Number of transactions shown on the dashboard.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Aggregates every ESI deduction recorded in periods of a financial year.
///
/// Employees are counted once however many periods they appear in. A year
/// with no deductions yields zero totals.
///
/// # Example
///
/// ```no_run
/// use esi_engine::calculation::summarize;
/// use esi_engine::config::DataLoader;
/// use esi_engine::store::InMemoryPayrollStore;
///
/// let loader = DataLoader::load("./data/sample").unwrap();
/// let store = InMemoryPayrollStore::new(loader.data().clone());
/// let summary = summarize(&store, "2024-2025").unwrap();
/// println!("{} employees, total {}", summary.total_employees, summary.grand_total);
/// ```
pub fn summarize(
    store: &dyn PayrollStore,
    financial_year: &str,
) -> EngineResult<ContributionSummary> {
    let ledger = EsiLedger::load(store)?;
    let mut totals = ContributionTotals::default();

    for transaction in ledger.esi_transactions() {
        let in_year = ledger
            .period(&transaction.period_id)
            .is_some_and(|p| p.financial_year == financial_year);
        if in_year {
            totals.add(transaction);
        }
    }

    let liability = totals.as_liability();
    Ok(ContributionSummary {
        financial_year: financial_year.to_string(),
        total_employees: totals.employee_count(),
        employee_total: liability.employee_total,
        employer_total: liability.employer_total,
        grand_total: liability.grand_total,
    })
}

/// Returns the most recently recorded ESI deductions, newest first.
pub fn recent_transactions(
    store: &dyn PayrollStore,
    limit: usize,
) -> EngineResult<Vec<RecentTransaction>> {
    let ledger = EsiLedger::load(store)?;

    let mut rows: Vec<RecentTransaction> = ledger
        .esi_transactions()
        .filter_map(|t| {
            let employee = ledger.employee(&t.employee_id)?;
            let period = ledger.period(&t.period_id)?;
            Some(RecentTransaction {
                emp_code: employee.emp_code.clone(),
                first_name: employee.first_name.clone(),
                last_name: employee.last_name.clone(),
                period_name: period.period_name.clone(),
                esi_amount: t.absolute_amount(),
                created_at: t.created_at,
            })
        })
        .collect();

    rows.sort_by_key(|r| Reverse(r.created_at));
    rows.truncate(limit);
    Ok(rows)
}
