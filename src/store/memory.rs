//! In-memory implementation of the collaborator traits.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Benefit, Document, Employee, Report, ReportEntry};

use super::{DocumentSource, ReferenceData, ReportStore};

#[derive(Debug, Default)]
struct StoreData {
    employees: BTreeMap<u64, Employee>,
    benefits: BTreeMap<u64, Benefit>,
    documents: BTreeMap<u64, Document>,
    reports: Vec<Report>,
    entries: HashMap<Uuid, Vec<ReportEntry>>,
}

/// Thread-safe store backed by in-process maps.
///
/// Reference data is upserted by id, the way the upstream employee, benefit
/// and document feeds deliver it.
///
/// # Example
///
/// ```
/// use payroll_report_engine::models::{Benefit, BenefitType, CalculationMethod};
/// use payroll_report_engine::store::{InMemoryStore, ReferenceData};
///
/// let store = InMemoryStore::new();
/// store.upsert_benefit(Benefit {
///     id: 1,
///     name: "Salary".to_string(),
///     benefit_type: BenefitType::Accrual,
///     calculation_method: CalculationMethod::Gross,
/// }).unwrap();
///
/// assert!(store.benefit(1).unwrap().is_some());
/// assert!(store.benefit(2).unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<StoreData>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an employee.
    pub fn upsert_employee(&self, employee: Employee) -> EngineResult<()> {
        debug!(employee_id = employee.id, "Employee stored");
        self.write()?.employees.insert(employee.id, employee);
        Ok(())
    }

    /// Inserts or replaces a benefit.
    pub fn upsert_benefit(&self, benefit: Benefit) -> EngineResult<()> {
        debug!(benefit_id = benefit.id, "Benefit stored");
        self.write()?.benefits.insert(benefit.id, benefit);
        Ok(())
    }

    /// Inserts or replaces a document.
    pub fn upsert_document(&self, document: Document) -> EngineResult<()> {
        debug!(document_id = document.id, "Document stored");
        self.write()?.documents.insert(document.id, document);
        Ok(())
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, StoreData>> {
        self.data.read().map_err(|_| EngineError::StorageError {
            message: "in-memory store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, StoreData>> {
        self.data.write().map_err(|_| EngineError::StorageError {
            message: "in-memory store lock poisoned".to_string(),
        })
    }
}

impl DocumentSource for InMemoryStore {
    fn documents_between(&self, from: NaiveDate, to: NaiveDate) -> EngineResult<Vec<Document>> {
        Ok(self
            .read()?
            .documents
            .values()
            .filter(|document| document.is_effective_within(from, to))
            .cloned()
            .collect())
    }
}

impl ReferenceData for InMemoryStore {
    fn employee(&self, id: u64) -> EngineResult<Option<Employee>> {
        Ok(self.read()?.employees.get(&id).cloned())
    }

    fn benefit(&self, id: u64) -> EngineResult<Option<Benefit>> {
        Ok(self.read()?.benefits.get(&id).cloned())
    }
}

impl ReportStore for InMemoryStore {
    fn save_report(&self, report: &Report, entries: &[ReportEntry]) -> EngineResult<()> {
        if let Some(entry) = entries.iter().find(|entry| entry.report_id != report.id) {
            return Err(EngineError::StorageError {
                message: format!(
                    "entry {} belongs to report {}, not {}",
                    entry.id, entry.report_id, report.id
                ),
            });
        }

        let mut data = self.write()?;
        if data.entries.contains_key(&report.id) {
            return Err(EngineError::StorageError {
                message: format!("report {} already saved", report.id),
            });
        }
        data.reports.push(report.clone());
        data.entries.insert(report.id, entries.to_vec());
        Ok(())
    }

    fn reports(&self) -> EngineResult<Vec<Report>> {
        Ok(self.read()?.reports.clone())
    }

    fn report(&self, id: Uuid) -> EngineResult<Option<Report>> {
        Ok(self
            .read()?
            .reports
            .iter()
            .find(|report| report.id == id)
            .cloned())
    }

    fn entries_for_report(&self, report_id: Uuid) -> EngineResult<Vec<ReportEntry>> {
        Ok(self
            .read()?
            .entries
            .get(&report_id)
            .cloned()
            .unwrap_or_default())
    }
}
