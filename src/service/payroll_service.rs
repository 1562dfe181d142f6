//! The payroll service.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::BenefitCalculator;
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::generation::{GeneratedReport, ReportEntryGenerator};
use crate::models::{Report, ReportEntry};
use crate::store::{DocumentSource, ReferenceData, ReportStore};
use crate::views::{self, TabularModel};

/// Entry point for generating reports and building their views.
///
/// The store is shared behind an [`Arc`], so clones of the service see the
/// same reports.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use payroll_report_engine::service::PayrollService;
/// use payroll_report_engine::store::InMemoryStore;
///
/// let service = PayrollService::with_defaults(Arc::new(InMemoryStore::new()));
/// assert!(service.list_reports().unwrap().is_empty());
/// ```
pub struct PayrollService<S> {
    calculator: Arc<BenefitCalculator>,
    store: Arc<S>,
}

impl<S> Clone for PayrollService<S> {
    fn clone(&self) -> Self {
        Self {
            calculator: Arc::clone(&self.calculator),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> PayrollService<S>
where
    S: DocumentSource + ReferenceData + ReportStore,
{
    /// Creates a service using the rates and scale of a loaded configuration.
    pub fn new(config: &ConfigLoader, store: Arc<S>) -> Self {
        Self::from_calculator(BenefitCalculator::new(config.config()), store)
    }

    /// Creates a service using the statutory default configuration.
    pub fn with_defaults(store: Arc<S>) -> Self {
        Self::from_calculator(BenefitCalculator::default(), store)
    }

    /// Creates a service around an existing calculator.
    pub fn from_calculator(calculator: BenefitCalculator, store: Arc<S>) -> Self {
        Self {
            calculator: Arc::new(calculator),
            store,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the calculator in use.
    pub fn calculator(&self) -> &BenefitCalculator {
        &self.calculator
    }

    /// Generates and saves a report over `[from, to]`, keeping its audit trace.
    ///
    /// The report and its entries are saved as one unit, only after every
    /// entry has been built.
    pub fn generate_report(&self, from: NaiveDate, to: NaiveDate) -> EngineResult<GeneratedReport> {
        let store: &S = &self.store;
        let generator = ReportEntryGenerator::new(&self.calculator, store, store);
        let generated = generator.generate(from, to)?;

        self.store
            .save_report(&generated.report, &generated.entries)?;

        info!(
            report_id = %generated.report.id,
            entries = generated.entries.len(),
            "Report saved"
        );
        Ok(generated)
    }

    /// Generates and saves a report over `[from, to]` and returns its entries.
    ///
    /// # Errors
    ///
    /// See [`ReportEntryGenerator::generate`]; storage failures are returned
    /// unchanged.
    pub fn generate_report_entries(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<ReportEntry>> {
        Ok(self.generate_report(from, to)?.entries)
    }

    /// Every saved report in creation order.
    pub fn list_reports(&self) -> EngineResult<Vec<Report>> {
        self.store.reports()
    }

    /// The entries of a saved report.
    pub fn report_entries(&self, report_id: Uuid) -> EngineResult<Vec<ReportEntry>> {
        self.require_report(report_id)?;
        self.store.entries_for_report(report_id)
    }

    /// Builds the list of saved reports.
    pub fn build_reports_list(&self) -> EngineResult<TabularModel> {
        let reports = self.store.reports()?;
        Ok(views::build_reports_list(&reports))
    }

    /// Builds the payroll register of a saved report.
    pub fn build_payroll_register(&self, report_id: Uuid) -> EngineResult<TabularModel> {
        let report = self.require_report(report_id)?;
        let entries = self.store.entries_for_report(report_id)?;
        if entries.is_empty() {
            warn!(%report_id, "Payroll register requested for report without entries");
        }

        let model = views::build_payroll_register(&report, &entries);
        info!(%report_id, rows = model.rows.len(), "Payroll register built");
        Ok(model)
    }

    /// Builds one employee's pay slip within a saved report.
    pub fn build_pay_slip(&self, employee_id: u64, report_id: Uuid) -> EngineResult<TabularModel> {
        let report = self.require_report(report_id)?;
        let entries = self.store.entries_for_employee(employee_id, report_id)?;
        if entries.is_empty() {
            warn!(%report_id, employee_id, "Pay slip requested for employee without entries");
        }

        let model = views::build_pay_slip(&report, employee_id, &entries);
        info!(%report_id, employee_id, rows = model.rows.len(), "Pay slip built");
        Ok(model)
    }

    fn require_report(&self, report_id: Uuid) -> EngineResult<Report> {
        self.store.report(report_id)?.ok_or_else(|| {
            warn!(%report_id, "Unknown report requested");
            EngineError::ReportNotFound { report_id }
        })
    }
}
