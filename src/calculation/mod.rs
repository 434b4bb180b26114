//! Calculation logic for the ESI contribution engine.
//!
//! This module contains the contribution arithmetic, financial-year and
//! due-date rules, and the queries behind the dashboard summary, the
//! contribution listing, period liability, challan data and the exported
//! reports. Every query reads through a [`PayrollStore`](crate::store::PayrollStore).

mod assessment;
mod contribution;
mod financial_year;
mod ledger;
mod liability;
mod listing;
mod reports;
mod summary;

pub use assessment::assess_wage;
pub use contribution::{
    EMPLOYER_MULTIPLIER, TOTAL_MULTIPLIER, compute_contribution, derive_from_deduction,
    is_eligible, round_currency,
};
pub use financial_year::{CHALLAN_DUE_DAY, challan_due_date, financial_year_for};
pub use liability::{
    CHALLAN_REFERENCE_PREFIX, calculate_liability, challan_data, challan_reference,
};
pub use listing::{ContributionFilter, list_contributions};
pub use reports::{
    REPORT_FORM_PERIOD_LIMIT, REPORT_TITLE, ReportScope, ReportType, active_departments,
    build_report, department_summary_report, financial_years, latest_periods,
    monthly_summary_report,
};
pub use summary::{DEFAULT_RECENT_LIMIT, recent_transactions, summarize};
