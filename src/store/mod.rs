//! Collaborator interfaces for reference data and report persistence.
//!
//! The engine performs no I/O of its own. Documents, employees and benefits
//! are read through [`DocumentSource`] and [`ReferenceData`]; generated
//! reports are written and read back through [`ReportStore`]. Failures of
//! these collaborators are surfaced to the caller unchanged and never
//! retried here.

mod memory;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Benefit, Document, Employee, Report, ReportEntry};

pub use memory::InMemoryStore;

/// Looks up compensation documents.
pub trait DocumentSource {
    /// Returns documents whose effective date lies in `[from, to]`.
    ///
    /// Implementations may return documents in any order.
    fn documents_between(&self, from: NaiveDate, to: NaiveDate) -> EngineResult<Vec<Document>>;
}

/// Resolves employee and benefit references.
pub trait ReferenceData {
    /// Returns the employee with `id`, or `None` if it does not exist.
    fn employee(&self, id: u64) -> EngineResult<Option<Employee>>;

    /// Returns the benefit with `id`, or `None` if it does not exist.
    fn benefit(&self, id: u64) -> EngineResult<Option<Benefit>>;
}

/// Persists generated reports.
pub trait ReportStore {
    /// Saves a report together with all of its entries.
    ///
    /// Either the report and every entry are stored, or nothing is.
    fn save_report(&self, report: &Report, entries: &[ReportEntry]) -> EngineResult<()>;

    /// Returns every saved report in the order it was saved.
    fn reports(&self) -> EngineResult<Vec<Report>>;

    /// Returns the report with `id`, or `None` if it does not exist.
    fn report(&self, id: Uuid) -> EngineResult<Option<Report>>;

    /// Returns the entries of one report in generation order.
    fn entries_for_report(&self, report_id: Uuid) -> EngineResult<Vec<ReportEntry>>;

    /// Returns one employee's entries within one report in generation order.
    fn entries_for_employee(
        &self,
        employee_id: u64,
        report_id: Uuid,
    ) -> EngineResult<Vec<ReportEntry>> {
        Ok(self
            .entries_for_report(report_id)?
            .into_iter()
            .filter(|entry| entry.employee.id == employee_id)
            .collect())
    }
}
