//! Per-employee aggregation of report entries.
//!
//! Both the payroll register (many employees) and the pay slip (one
//! employee) are built from the same [`EmployeeTotals`] rows produced here.

mod employee_totals;

pub use employee_totals::{
    BenefitColumns, EmployeeTotals, EmployeeTotalsMap, aggregate_by_employee,
};
