//! Core data models for the Payroll Report Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod amounts;
mod audit;
mod benefit;
mod document;
mod employee;
mod report;

pub use amounts::{AmountKind, CalculatedAmounts};
pub use audit::{AuditStep, AuditTrace};
pub use benefit::{Benefit, BenefitType, CalculationMethod};
pub use document::Document;
pub use employee::Employee;
pub use report::{Report, ReportEntry};
