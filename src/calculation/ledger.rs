//! Joined view over the payroll tables.
//!
//! Every contribution query starts from the ESI-coded transactions and joins
//! employees, departments and periods by id. A transaction whose referenced
//! row is missing drops out of any query that needs that row.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    ContributionPeriod, ContributionTransaction, Department, Employee, Liability, SalaryComponent,
};
use crate::store::PayrollStore;

use super::contribution::derive_from_deduction;

/// The payroll tables indexed by id, with ESI transactions split out.
#[derive(Debug, Clone)]
pub(crate) struct EsiLedger {
    employees: HashMap<String, Employee>,
    departments: HashMap<String, Department>,
    periods: HashMap<String, ContributionPeriod>,
    components: HashMap<String, SalaryComponent>,
    transactions: Vec<ContributionTransaction>,
    esi_component_ids: HashSet<String>,
}

impl EsiLedger {
    /// Reads all tables from the store.
    pub fn load(store: &dyn PayrollStore) -> EngineResult<Self> {
        let components: HashMap<String, SalaryComponent> = store
            .components()?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        let esi_component_ids = components
            .values()
            .filter(|c| c.is_esi())
            .map(|c| c.id.clone())
            .collect();

        Ok(Self {
            employees: store
                .employees()?
                .into_iter()
                .map(|e| (e.id.clone(), e))
                .collect(),
            departments: store
                .departments()?
                .into_iter()
                .map(|d| (d.id.clone(), d))
                .collect(),
            periods: store
                .periods()?
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
            components,
            transactions: store.transactions()?,
            esi_component_ids,
        })
    }

    /// Iterates over the transactions recorded against the ESI component.
    pub fn esi_transactions(&self) -> impl Iterator<Item = &ContributionTransaction> {
        self.transactions
            .iter()
            .filter(|t| self.esi_component_ids.contains(&t.component_id))
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.get(id)
    }

    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.get(id)
    }

    pub fn period(&self, id: &str) -> Option<&ContributionPeriod> {
        self.periods.get(id)
    }

    /// Sums an employee's ESI-applicable earnings in a period.
    pub fn esi_wages(&self, employee_id: &str, period_id: &str) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.employee_id == employee_id && t.period_id == period_id)
            .filter(|t| {
                self.components
                    .get(&t.component_id)
                    .is_some_and(SalaryComponent::counts_toward_esi_wages)
            })
            .map(|t| t.amount)
            .sum()
    }
}

/// Running ESI totals over a set of deductions.
#[derive(Debug, Clone, Default)]
pub(crate) struct ContributionTotals {
    employees: HashSet<String>,
    employee_total: Decimal,
    employer_total: Decimal,
    grand_total: Decimal,
}

impl ContributionTotals {
    /// Adds one recorded deduction.
    pub fn add(&mut self, transaction: &ContributionTransaction) {
        let derived = derive_from_deduction(transaction.amount);
        self.employees.insert(transaction.employee_id.clone());
        self.employee_total += derived.employee;
        self.employer_total += derived.employer;
        self.grand_total += derived.total;
    }

    /// Number of distinct employees seen.
    pub fn employee_count(&self) -> u64 {
        self.employees.len() as u64
    }

    pub fn as_liability(&self) -> Liability {
        Liability {
            employee_total: self.employee_total,
            employer_total: self.employer_total,
            grand_total: self.grand_total,
        }
    }
}
