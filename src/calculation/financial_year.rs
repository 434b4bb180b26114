//! Financial-year and due-date arithmetic.
//!
//! The statutory financial year runs from 1 April to 31 March and is
//! labelled with both calendar years, e.g. "2024-2025".

use chrono::{Datelike, Months, NaiveDate};

/// Day of the month on which ESI for the previous month falls due.
pub const CHALLAN_DUE_DAY: u32 = 21;

/// Returns the financial-year label for a date.
///
/// # Examples
///
/// ```
/// use esi_engine::calculation::financial_year_for;
/// use chrono::NaiveDate;
///
/// assert_eq!(financial_year_for(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()), "2024-2025");
/// assert_eq!(financial_year_for(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()), "2023-2024");
/// ```
pub fn financial_year_for(date: NaiveDate) -> String {
    let year = date.year();
    if date.month() >= 4 {
        format!("{}-{}", year, year + 1)
    } else {
        format!("{}-{}", year - 1, year)
    }
}

/// Returns the challan due date for a period ending on `period_end`.
///
/// The due date is the 21st of the month after the period ends.
///
/// # Example
///
/// ```
/// use esi_engine::calculation::challan_due_date;
/// use chrono::NaiveDate;
///
/// let due = challan_due_date(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
/// assert_eq!(due, NaiveDate::from_ymd_opt(2024, 4, 21));
/// ```
pub fn challan_due_date(period_end: NaiveDate) -> Option<NaiveDate> {
    let first_of_month = period_end.with_day(1)?;
    let next_month = first_of_month.checked_add_months(Months::new(1))?;
    next_month.with_day(CHALLAN_DUE_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_financial_year_starts_in_april() {
        assert_eq!(financial_year_for(date(2024, 4, 1)), "2024-2025");
        assert_eq!(financial_year_for(date(2024, 12, 31)), "2024-2025");
        assert_eq!(financial_year_for(date(2025, 1, 1)), "2024-2025");
        assert_eq!(financial_year_for(date(2025, 3, 31)), "2024-2025");
        assert_eq!(financial_year_for(date(2025, 4, 1)), "2025-2026");
    }

    #[test]
    fn test_due_date_for_march_period() {
        assert_eq!(challan_due_date(date(2024, 3, 31)), Some(date(2024, 4, 21)));
    }

    #[test]
    fn test_due_date_rolls_into_next_year() {
        assert_eq!(challan_due_date(date(2024, 12, 31)), Some(date(2025, 1, 21)));
    }

    #[test]
    fn test_due_date_from_short_month_end() {
        assert_eq!(challan_due_date(date(2024, 1, 31)), Some(date(2024, 2, 21)));
        assert_eq!(challan_due_date(date(2024, 2, 29)), Some(date(2024, 3, 21)));
    }

    #[test]
    fn test_due_date_ignores_day_within_month() {
        assert_eq!(challan_due_date(date(2024, 6, 15)), Some(date(2024, 7, 21)));
    }
}
