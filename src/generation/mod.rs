//! Report entry generation.
//!
//! Joins the documents effective in a date range to their employees and
//! benefits, runs each through the [`BenefitCalculator`](crate::calculation::BenefitCalculator),
//! and binds the resulting entries to a freshly created report.

mod report_entry_generator;

pub use report_entry_generator::{GeneratedReport, ReportEntryGenerator};
