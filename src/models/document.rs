//! Compensation document model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A raw compensation document: one amount of one benefit for one employee.
///
/// The amount is a non-negative magnitude; the calculator applies the sign.
///
/// # Example
///
/// ```
/// use payroll_report_engine::models::Document;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let document = Document {
///     id: 1,
///     upload_date: NaiveDate::from_ymd_opt(2022, 11, 30).unwrap(),
///     effective_date: NaiveDate::from_ymd_opt(2022, 4, 3).unwrap(),
///     employee_id: 1,
///     benefit_id: 1,
///     amount: Decimal::new(500, 0),
/// };
/// assert!(document.is_effective_within(
///     NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: u64,
    /// When the document was received.
    pub upload_date: NaiveDate,
    /// The date the amount applies to; reports select on this.
    pub effective_date: NaiveDate,
    /// The employee the amount belongs to.
    pub employee_id: u64,
    /// The benefit the amount is paid under.
    pub benefit_id: u64,
    /// The raw amount.
    pub amount: Decimal,
}

impl Document {
    /// Checks whether the effective date lies in `[from, to]`, both ends inclusive.
    pub fn is_effective_within(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.effective_date >= from && self.effective_date <= to
    }
}
