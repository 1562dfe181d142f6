//! Application service tying generation, persistence and views together.

mod payroll_service;

pub use payroll_service::PayrollService;
