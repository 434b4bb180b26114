//! Data directory loading functionality.
//!
//! This module provides the [`DataLoader`] type for loading payroll tables
//! and pre-provisioned sessions from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ComponentsFile, DepartmentsFile, EmployeesFile, PayrollData, PeriodsFile, SessionGrant,
    SessionsFile, TransactionsFile,
};

/// Loads the payroll tables the contribution calculator reads.
///
/// # Directory Structure
///
/// ```text
/// data/sample/
/// ├── departments.yaml   # Departments
/// ├── employees.yaml     # Employees with ESI numbers
/// ├── periods.yaml       # Payroll periods and financial years
/// ├── components.yaml    # Salary components (earnings, deductions)
/// ├── transactions.yaml  # Recorded payroll transactions
/// └── sessions.yaml      # Optional pre-provisioned sessions
/// ```
///
/// # Example
///
/// ```no_run
/// use esi_engine::config::DataLoader;
///
/// let loader = DataLoader::load("./data/sample").unwrap();
/// println!("Loaded {} employees", loader.data().employees.len());
/// ```
#[derive(Debug, Clone)]
pub struct DataLoader {
    data: PayrollData,
    sessions: Vec<SessionGrant>,
}

impl DataLoader {
    /// Loads all tables from the specified directory.
    ///
    /// Returns an error if any required file is missing or contains invalid
    /// YAML. `sessions.yaml` is optional and defaults to no sessions.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let departments = Self::load_yaml::<DepartmentsFile>(&path.join("departments.yaml"))?;
        let employees = Self::load_yaml::<EmployeesFile>(&path.join("employees.yaml"))?;
        let periods = Self::load_yaml::<PeriodsFile>(&path.join("periods.yaml"))?;
        let components = Self::load_yaml::<ComponentsFile>(&path.join("components.yaml"))?;
        let transactions = Self::load_yaml::<TransactionsFile>(&path.join("transactions.yaml"))?;

        let sessions_path = path.join("sessions.yaml");
        let sessions = if sessions_path.exists() {
            Self::load_yaml::<SessionsFile>(&sessions_path)?.sessions
        } else {
            Vec::new()
        };

        let data = PayrollData {
            departments: departments.departments,
            employees: employees.employees,
            periods: periods.periods,
            components: components.components,
            transactions: transactions.transactions,
        };

        info!(
            path = %path.display(),
            employees = data.employees.len(),
            periods = data.periods.len(),
            transactions = data.transactions.len(),
            sessions = sessions.len(),
            "Loaded payroll data"
        );

        Ok(Self { data, sessions })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded payroll tables.
    pub fn data(&self) -> &PayrollData {
        &self.data
    }

    /// Returns the pre-provisioned sessions.
    pub fn sessions(&self) -> &[SessionGrant] {
        &self.sessions
    }

    /// Splits the loader into its tables and sessions.
    pub fn into_parts(self) -> (PayrollData, Vec<SessionGrant>) {
        (self.data, self.sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Permission;

    fn data_path() -> &'static str {
        "./data/sample"
    }

    #[test]
    fn test_load_sample_directory() {
        let result = DataLoader::load(data_path());
        assert!(result.is_ok(), "Failed to load data: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.data().departments.len(), 3);
        assert_eq!(loader.data().employees.len(), 5);
        assert_eq!(loader.data().periods.len(), 4);
        assert!(!loader.data().transactions.is_empty());
    }

    #[test]
    fn test_sessions_loaded_with_permissions() {
        let loader = DataLoader::load(data_path()).unwrap();
        let admin = loader
            .sessions()
            .iter()
            .find(|s| s.user_id == "hr_admin")
            .expect("hr_admin session");
        assert!(admin.permissions.contains(&Permission::Settings));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = DataLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("departments.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("departments.yaml"), "departments: [[[").unwrap();

        match DataLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("departments.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_sessions_file_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("departments.yaml"), "departments: []").unwrap();
        fs::write(dir.path().join("employees.yaml"), "employees: []").unwrap();
        fs::write(dir.path().join("periods.yaml"), "periods: []").unwrap();
        fs::write(dir.path().join("components.yaml"), "components: []").unwrap();
        fs::write(dir.path().join("transactions.yaml"), "transactions: []").unwrap();

        let loader = DataLoader::load(dir.path()).unwrap();
        assert!(loader.sessions().is_empty());
        assert_eq!(loader.data(), &PayrollData::default());
    }
}
