//! Employee and department models.
//!
//! Both records are read-only reference data from the contribution engine's
//! point of view; they are owned by the wider payroll system.

use serde::{Deserialize, Serialize};

/// Whether an employee or department record is currently in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// The record is live and participates in listings.
    #[default]
    Active,
    /// The record has been retired.
    Inactive,
}

/// A department employees belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier for the department.
    pub id: String,
    /// Display name of the department.
    pub name: String,
    /// Whether the department is active.
    #[serde(default)]
    pub status: RecordStatus,
}

impl Department {
    /// Returns true if the department is active.
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}

/// Represents an employee covered by the ESI scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Internal identifier referenced by payroll transactions.
    pub id: String,
    /// The employee code shown on reports (e.g., "EMP001").
    pub emp_code: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The department the employee belongs to.
    pub department_id: String,
    /// The statutory ESI registration number, if one has been issued.
    #[serde(default)]
    pub esi_number: Option<String>,
    /// Whether the employee is active.
    #[serde(default)]
    pub status: RecordStatus,
}

impl Employee {
    /// Returns true if the employee is active.
    ///
    /// # Examples
    ///
    /// ```
    /// use esi_engine::models::{Employee, RecordStatus};
    ///
    /// let employee = Employee {
    ///     id: "1".to_string(),
    ///     emp_code: "EMP001".to_string(),
    ///     first_name: "Asha".to_string(),
    ///     last_name: "Rao".to_string(),
    ///     department_id: "d1".to_string(),
    ///     esi_number: Some("3100123456".to_string()),
    ///     status: RecordStatus::Active,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_employee_defaults_status_to_active() {
        let yaml = r#"
id: "7"
emp_code: EMP007
first_name: Ravi
last_name: Kumar
department_id: d2
"#;
        let employee: Employee = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(employee.emp_code, "EMP007");
        assert_eq!(employee.status, RecordStatus::Active);
        assert!(employee.esi_number.is_none());
        assert!(employee.is_active());
    }

    #[test]
    fn test_deserialize_inactive_employee() {
        let json = r#"{
            "id": "8",
            "emp_code": "EMP008",
            "first_name": "Meera",
            "last_name": "Iyer",
            "department_id": "d1",
            "esi_number": "3100999999",
            "status": "inactive"
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.status, RecordStatus::Inactive);
        assert!(!employee.is_active());
    }

    #[test]
    fn test_record_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&RecordStatus::Inactive).unwrap(),
            "\"inactive\""
        );
    }

    #[test]
    fn test_department_is_active() {
        let department = Department {
            id: "d1".to_string(),
            name: "Operations".to_string(),
            status: RecordStatus::Inactive,
        };
        assert!(!department.is_active());
    }
}
