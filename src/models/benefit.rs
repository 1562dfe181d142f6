//! Benefit model and its classification enums.

use serde::{Deserialize, Serialize};

/// Whether a benefit adds to or subtracts from an employee's pay.
///
/// Serialized as `"Accrual"` / `"Deduction"`, the spelling used by the
/// upstream benefit feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BenefitType {
    /// Adds to the payable amount.
    Accrual,
    /// Subtracts from the payable amount.
    Deduction,
}

/// Whether a document's amount is the pre- or post-deduction figure.
///
/// Only meaningful for [`BenefitType::Accrual`] benefits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CalculationMethod {
    /// The amount is the gross figure; net is derived from it.
    Gross,
    /// The amount is the net figure; gross is grossed up from it.
    Net,
}

/// A kind of compensation or deduction an employee can receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    /// Unique identifier for the benefit.
    pub id: u64,
    /// Display name, also used as the register column header.
    pub name: String,
    /// Accrual or deduction.
    pub benefit_type: BenefitType,
    /// Gross or net calculation, ignored for deductions.
    pub calculation_method: CalculationMethod,
}

impl Benefit {
    /// Returns true if the benefit adds to pay.
    pub fn is_accrual(&self) -> bool {
        self.benefit_type == BenefitType::Accrual
    }
}
