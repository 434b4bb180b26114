//! Salary component and payroll transaction models.
//!
//! Transactions are created by the payroll-processing system; this crate only
//! reads them. The ESI deduction for an employee is the transaction whose
//! component carries the [`ESI_COMPONENT_CODE`].

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The salary component code that marks ESI deductions.
pub const ESI_COMPONENT_CODE: &str = "ESI";

/// Whether a salary component adds to or deducts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// Adds to gross pay (basic, allowances).
    Earning,
    /// Deducted from pay (ESI, provident fund).
    Deduction,
}

/// A typed, coded salary line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Unique identifier referenced by transactions.
    pub id: String,
    /// Short code (e.g., "BASIC", "ESI").
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Earning or deduction.
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Whether the component counts toward the ESI wage base.
    #[serde(default)]
    pub is_esi_applicable: bool,
}

impl SalaryComponent {
    /// Returns true if this component records the ESI deduction.
    pub fn is_esi(&self) -> bool {
        self.code == ESI_COMPONENT_CODE
    }

    /// Returns true if this component is an earning that counts toward ESI wages.
    pub fn counts_toward_esi_wages(&self) -> bool {
        self.component_type == ComponentType::Earning && self.is_esi_applicable
    }
}

/// The recorded amount of one salary component for one employee in one period.
///
/// Deductions may be stored as negative amounts; contribution arithmetic
/// always works on the absolute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionTransaction {
    /// Unique identifier for the transaction.
    pub id: String,
    /// The employee the transaction belongs to.
    pub employee_id: String,
    /// The payroll period of the transaction.
    pub period_id: String,
    /// The salary component the amount is recorded against.
    pub component_id: String,
    /// The recorded amount.
    pub amount: Decimal,
    /// When the payroll system recorded the transaction.
    pub created_at: NaiveDateTime,
}

impl ContributionTransaction {
    /// Returns the unsigned amount of the transaction.
    pub fn absolute_amount(&self) -> Decimal {
        self.amount.abs()
    }
}
