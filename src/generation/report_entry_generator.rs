//! The report entry generator.

use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculation::{BenefitCalculator, CalculationInputs};
use crate::error::{EngineError, EngineResult, ReferenceKind};
use crate::models::{AuditStep, AuditTrace, Document, Report, ReportEntry};
use crate::store::{DocumentSource, ReferenceData};

/// A report together with every entry built for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedReport {
    /// The newly created report.
    pub report: Report,
    /// One entry per document, ordered by document id.
    pub entries: Vec<ReportEntry>,
    /// One audit step per entry.
    pub audit_trace: AuditTrace,
}

/// Builds report entries from the documents in a date range.
///
/// The generator only reads; persisting the result as one unit is the
/// caller's job.
///
/// # Example
///
/// ```
/// use payroll_report_engine::calculation::BenefitCalculator;
/// use payroll_report_engine::generation::ReportEntryGenerator;
/// use payroll_report_engine::store::InMemoryStore;
/// use chrono::NaiveDate;
///
/// let store = InMemoryStore::new();
/// let calculator = BenefitCalculator::default();
/// let generator = ReportEntryGenerator::new(&calculator, &store, &store);
///
/// let generated = generator
///     .generate(
///         NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
///     )
///     .unwrap();
/// assert!(generated.entries.is_empty());
/// ```
pub struct ReportEntryGenerator<'a> {
    calculator: &'a BenefitCalculator,
    documents: &'a dyn DocumentSource,
    references: &'a dyn ReferenceData,
}

impl<'a> ReportEntryGenerator<'a> {
    /// Creates a generator over the given collaborators.
    pub fn new(
        calculator: &'a BenefitCalculator,
        documents: &'a dyn DocumentSource,
        references: &'a dyn ReferenceData,
    ) -> Self {
        Self {
            calculator,
            documents,
            references,
        }
    }

    /// Generates a report covering `[from, to]`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidRange`] if `from > to`; no lookup happens.
    /// - [`EngineError::ReferenceNotFound`] if any document points at an
    ///   unknown employee or benefit; no entries are returned.
    /// - [`EngineError::ArithmeticOverflow`] from the calculator.
    /// - Any error raised by the collaborators.
    pub fn generate(&self, from: NaiveDate, to: NaiveDate) -> EngineResult<GeneratedReport> {
        if from > to {
            warn!(%from, %to, "Rejected report range");
            return Err(EngineError::InvalidRange { from, to });
        }

        let start_time = Instant::now();
        let report = Report::new(from, to);

        let mut documents = self.documents.documents_between(from, to)?;
        documents.sort_by_key(|document| document.id);

        let mut entries = Vec::with_capacity(documents.len());
        let mut audit_trace = AuditTrace::default();

        for (index, document) in documents.into_iter().enumerate() {
            let (entry, audit_step) = self.build_entry(&report, document, index + 1)?;
            entries.push(entry);
            audit_trace.steps.push(audit_step);
        }

        audit_trace.duration_us = start_time.elapsed().as_micros() as u64;

        info!(
            report_id = %report.id,
            %from,
            %to,
            entries = entries.len(),
            duration_us = audit_trace.duration_us,
            "Report entries generated"
        );

        Ok(GeneratedReport {
            report,
            entries,
            audit_trace,
        })
    }

    fn build_entry(
        &self,
        report: &Report,
        document: Document,
        step_number: usize,
    ) -> EngineResult<(ReportEntry, AuditStep)> {
        let employee = self
            .references
            .employee(document.employee_id)?
            .ok_or_else(|| missing(ReferenceKind::Employee, document.employee_id, document.id))?;
        let benefit = self
            .references
            .benefit(document.benefit_id)?
            .ok_or_else(|| missing(ReferenceKind::Benefit, document.benefit_id, document.id))?;

        let inputs = CalculationInputs::for_document(&document, &employee, &benefit);
        let calculation =
            self.calculator
                .calculate_with_audit(&inputs, Some(document.id), step_number)?;

        debug!(
            document_id = document.id,
            employee_id = employee.id,
            benefit = %benefit.name,
            rule = %calculation.audit_step.rule_id,
            gross = %calculation.amounts.gross,
            "Report entry calculated"
        );

        let entry = ReportEntry::new(report.id, employee, benefit, document, calculation.amounts);
        Ok((entry, calculation.audit_step))
    }
}

fn missing(kind: ReferenceKind, id: u64, document_id: u64) -> EngineError {
    warn!(%kind, id, document_id, "Document references unknown record");
    EngineError::ReferenceNotFound {
        kind,
        id,
        document_id,
    }
}
