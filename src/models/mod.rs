//! Core data models for the ESI contribution engine.
//!
//! This module contains all the domain models used throughout the engine.

mod contribution;
mod employee;
mod period;
mod transaction;

pub use contribution::{
    AuditStep, CalculationResult, ChallanData, ContributionBreakdown, ContributionRow,
    ContributionSummary, DepartmentSummaryRow, Liability, MonthlySummaryRow, RecentTransaction,
};
pub use employee::{Department, Employee, RecordStatus};
pub use period::ContributionPeriod;
pub use transaction::{ComponentType, ContributionTransaction, ESI_COMPONENT_CODE, SalaryComponent};
