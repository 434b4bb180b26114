//! Read access to the payroll tables.
//!
//! The contribution calculator only ever reads through [`PayrollStore`], so
//! the backing database stays an external collaborator. The crate ships an
//! in-memory implementation built from the YAML data directory.

mod memory;

pub use memory::InMemoryPayrollStore;

use crate::error::EngineResult;
use crate::models::{
    ContributionPeriod, ContributionTransaction, Department, Employee, SalaryComponent,
};

/// Read-only access to the payroll tables.
///
/// Implementations return every row of a table; the calculator applies its
/// own filters. A table with no rows is an empty vector, never an error.
/// A backend that cannot answer (a lost database connection, say) returns
/// [`EngineError::StoreError`](crate::error::EngineError::StoreError), which
/// the API reports as a 500.
pub trait PayrollStore: Send + Sync {
    /// Returns all departments.
    fn departments(&self) -> EngineResult<Vec<Department>>;

    /// Returns all employees, active or not.
    fn employees(&self) -> EngineResult<Vec<Employee>>;

    /// Returns all payroll periods.
    fn periods(&self) -> EngineResult<Vec<ContributionPeriod>>;

    /// Returns all salary components.
    fn components(&self) -> EngineResult<Vec<SalaryComponent>>;

    /// Returns all payroll transactions.
    fn transactions(&self) -> EngineResult<Vec<ContributionTransaction>>;

    /// Looks up a single period by id.
    fn period(&self, period_id: &str) -> EngineResult<Option<ContributionPeriod>> {
        Ok(self.periods()?.into_iter().find(|p| p.id == period_id))
    }
}
