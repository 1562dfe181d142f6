//! Report and report entry models.
//!
//! A [`Report`] is one generation run over a date range. It owns the
//! [`ReportEntry`] rows built from the documents effective in that range,
//! exactly one entry per document.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Benefit, CalculatedAmounts, Document, Employee};

/// One report generation run.
///
/// # Example
///
/// ```
/// use payroll_report_engine::models::Report;
/// use chrono::NaiveDate;
///
/// let report = Report::new(
///     NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
/// );
/// assert_eq!(report.start_date.to_string(), "2022-01-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Identity assigned at creation.
    pub id: Uuid,
    /// First effective date covered (inclusive).
    pub start_date: NaiveDate,
    /// Last effective date covered (inclusive).
    pub end_date: NaiveDate,
    /// When the report was generated.
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Creates a report with a fresh identity for the given range.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_date,
            end_date,
            created_at: Utc::now(),
        }
    }

    /// Formats the covered range as `start – end`.
    pub fn period_label(&self) -> String {
        format!("{} – {}", self.start_date, self.end_date)
    }
}

/// The calculated figures for one document within one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The owning report.
    pub report_id: Uuid,
    /// The employee the document belongs to.
    pub employee: Employee,
    /// The benefit the document is paid under.
    pub benefit: Benefit,
    /// The source document.
    pub document: Document,
    /// Net amount.
    pub net_amount: Decimal,
    /// Pension-fund contribution.
    pub pensions_fund: Decimal,
    /// Personal income tax.
    pub personal_income_tax: Decimal,
    /// Gross amount.
    pub gross_amount: Decimal,
}

impl ReportEntry {
    /// Builds an entry for `report_id` from a resolved document and its amounts.
    pub fn new(
        report_id: Uuid,
        employee: Employee,
        benefit: Benefit,
        document: Document,
        amounts: CalculatedAmounts,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            report_id,
            employee,
            benefit,
            document,
            net_amount: amounts.net,
            pensions_fund: amounts.pension_fund,
            personal_income_tax: amounts.tax,
            gross_amount: amounts.gross,
        }
    }

    /// Returns the four figures as a [`CalculatedAmounts`].
    pub fn amounts(&self) -> CalculatedAmounts {
        CalculatedAmounts {
            net: self.net_amount,
            pension_fund: self.pensions_fund,
            tax: self.personal_income_tax,
            gross: self.gross_amount,
        }
    }
}
