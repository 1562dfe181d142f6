//! Employee model.
//!
//! Employees are reference data supplied by an external collaborator; the
//! engine reads them but never mutates them.

use serde::{Deserialize, Serialize};

/// Represents an employee whose compensation documents are reported on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: u64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// The department the employee belongs to.
    pub department: String,
    /// The employee's position or job title.
    pub position: String,
    /// Contact email address.
    pub email: String,
    /// Inactive employees are reported with all amounts zeroed.
    pub is_active: bool,
    /// Whether pension-fund contributions apply to this employee.
    pub is_pensions_payer: bool,
}

impl Employee {
    /// Returns the employee's first and last name separated by a space.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_report_engine::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     first_name: "Nika".to_string(),
    ///     last_name: "Avalishvili".to_string(),
    ///     department: "Business Development".to_string(),
    ///     position: "Business Builder".to_string(),
    ///     email: "nika@example.com".to_string(),
    ///     is_active: true,
    ///     is_pensions_payer: true,
    /// };
    /// assert_eq!(employee.full_name(), "Nika Avalishvili");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
