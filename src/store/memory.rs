//! In-memory payroll store.

use crate::config::PayrollData;
use crate::error::EngineResult;
use crate::models::{
    ContributionPeriod, ContributionTransaction, Department, Employee, SalaryComponent,
};

use super::PayrollStore;

/// A [`PayrollStore`] holding all tables in memory.
///
/// # Example
///
/// ```no_run
/// use esi_engine::config::DataLoader;
/// use esi_engine::store::{InMemoryPayrollStore, PayrollStore};
///
/// let loader = DataLoader::load("./data/sample").unwrap();
/// let store = InMemoryPayrollStore::new(loader.data().clone());
/// assert!(!store.periods().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryPayrollStore {
    data: PayrollData,
}

impl InMemoryPayrollStore {
    /// Creates a store over the given tables.
    pub fn new(data: PayrollData) -> Self {
        Self { data }
    }
}

impl PayrollStore for InMemoryPayrollStore {
    fn departments(&self) -> EngineResult<Vec<Department>> {
        Ok(self.data.departments.clone())
    }

    fn employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.data.employees.clone())
    }

    fn periods(&self) -> EngineResult<Vec<ContributionPeriod>> {
        Ok(self.data.periods.clone())
    }

    fn components(&self) -> EngineResult<Vec<SalaryComponent>> {
        Ok(self.data.components.clone())
    }

    fn transactions(&self) -> EngineResult<Vec<ContributionTransaction>> {
        Ok(self.data.transactions.clone())
    }

    fn period(&self, period_id: &str) -> EngineResult<Option<ContributionPeriod>> {
        Ok(self.data.periods.iter().find(|p| p.id == period_id).cloned())
    }
}
