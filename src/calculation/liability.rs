//! Period liability and challan data.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{ChallanData, Liability};
use crate::store::PayrollStore;

use super::financial_year::challan_due_date;
use super::ledger::{ContributionTotals, EsiLedger};

/// Prefix of every challan reference number.
pub const CHALLAN_REFERENCE_PREFIX: &str = "ESI";

/// Sums the ESI payable for one period across all employees.
///
/// A period with no deductions, including an unknown period id, yields
/// zero totals.
pub fn calculate_liability(store: &dyn PayrollStore, period_id: &str) -> EngineResult<Liability> {
    let ledger = EsiLedger::load(store)?;
    let mut totals = ContributionTotals::default();

    for transaction in ledger
        .esi_transactions()
        .filter(|t| t.period_id == period_id)
    {
        totals.add(transaction);
    }

    Ok(totals.as_liability())
}

/// Builds the reference number printed on a challan.
///
/// The reference embeds the date it was generated on, not the period, so
/// repeated requests for one period on different days differ.
///
/// # Example
///
/// ```
/// use esi_engine::calculation::challan_reference;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();
/// assert_eq!(challan_reference("2", today), "ESI220240405");
/// ```
pub fn challan_reference(period_id: &str, generated_on: NaiveDate) -> String {
    format!(
        "{}{}{}",
        CHALLAN_REFERENCE_PREFIX,
        period_id,
        generated_on.format("%Y%m%d")
    )
}

/// Collects the data needed to remit ESI for a period.
///
/// # Arguments
///
/// * `store` - The payroll store
/// * `period_id` - The period being remitted
/// * `today` - The date the challan is generated on
///
/// # Errors
///
/// Returns [`EngineError::PeriodNotFound`] when the period does not exist.
pub fn challan_data(
    store: &dyn PayrollStore,
    period_id: &str,
    today: NaiveDate,
) -> EngineResult<ChallanData> {
    let period = store
        .period(period_id)?
        .ok_or_else(|| EngineError::PeriodNotFound {
            period_id: period_id.to_string(),
        })?;

    let liability = calculate_liability(store, period_id)?;
    let due_date =
        challan_due_date(period.end_date).ok_or_else(|| EngineError::CalculationError {
            message: format!("No due date after period end {}", period.end_date),
        })?;

    Ok(ChallanData {
        reference_number: challan_reference(&period.id, today),
        period,
        liability,
        due_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataLoader;
    use crate::store::InMemoryPayrollStore;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_store() -> InMemoryPayrollStore {
        let loader = DataLoader::load("./data/sample").unwrap();
        InMemoryPayrollStore::new(loader.data().clone())
    }

    #[test]
    fn test_liability_includes_every_employee_of_the_period() {
        let liability = calculate_liability(&sample_store(), "2").unwrap();
        assert_eq!(liability.employee_total, dec("292.50"));
        assert_eq!(liability.employer_total, dec("1266.525"));
        assert_eq!(liability.grand_total, dec("1559.025"));
    }

    #[test]
    fn test_liability_of_empty_period_is_zero() {
        let liability = calculate_liability(&sample_store(), "4").unwrap();
        assert_eq!(liability, Liability::default());
    }

    #[test]
    fn test_challan_for_march_period() {
        let challan = challan_data(&sample_store(), "2", date(2024, 4, 5)).unwrap();
        assert_eq!(challan.period.period_name, "March 2024");
        assert_eq!(challan.due_date, date(2024, 4, 21));
        assert_eq!(challan.reference_number, "ESI220240405");
        assert_eq!(challan.liability.employee_total, dec("292.50"));
    }

    #[test]
    fn test_challan_reference_changes_with_request_date() {
        let store = sample_store();
        let first = challan_data(&store, "3", date(2024, 5, 2)).unwrap();
        let second = challan_data(&store, "3", date(2024, 5, 3)).unwrap();
        assert_eq!(first.due_date, second.due_date);
        assert_ne!(first.reference_number, second.reference_number);
    }

    #[test]
    fn test_challan_for_unknown_period_is_error() {
        let result = challan_data(&sample_store(), "999", date(2024, 5, 2));
        match result {
            Err(EngineError::PeriodNotFound { period_id }) => assert_eq!(period_id, "999"),
            other => panic!("Expected PeriodNotFound, got {:?}", other),
        }
    }
}
