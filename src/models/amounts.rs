//! The four derived figures computed for every report entry.

use std::ops::{Index, IndexMut};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Names one of the four derived quantities.
///
/// # Example
///
/// ```
/// use payroll_report_engine::models::AmountKind;
///
/// assert_eq!(AmountKind::ALL.len(), 4);
/// assert_eq!(AmountKind::PensionFund.label(), "Pension fund");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountKind {
    /// What the employee receives.
    Net,
    /// Pension-fund contribution.
    PensionFund,
    /// Personal income tax.
    Tax,
    /// Net plus pension fund plus tax.
    Gross,
}

impl AmountKind {
    /// Every kind, in table order.
    pub const ALL: [AmountKind; 4] = [
        AmountKind::Net,
        AmountKind::PensionFund,
        AmountKind::Tax,
        AmountKind::Gross,
    ];

    /// Human-readable label used in report headers.
    pub fn label(self) -> &'static str {
        match self {
            AmountKind::Net => "Net amount",
            AmountKind::PensionFund => "Pension fund",
            AmountKind::Tax => "Personal income tax",
            AmountKind::Gross => "Gross amount",
        }
    }

    /// Snake-case key used in audit output.
    pub fn key(self) -> &'static str {
        match self {
            AmountKind::Net => "net",
            AmountKind::PensionFund => "pension_fund",
            AmountKind::Tax => "tax",
            AmountKind::Gross => "gross",
        }
    }
}

/// The calculator's output for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculatedAmounts {
    /// Net amount.
    pub net: Decimal,
    /// Pension-fund contribution.
    pub pension_fund: Decimal,
    /// Personal income tax.
    pub tax: Decimal,
    /// Gross amount.
    pub gross: Decimal,
}

impl CalculatedAmounts {
    /// All four figures zero.
    pub const ZERO: CalculatedAmounts = CalculatedAmounts {
        net: Decimal::ZERO,
        pension_fund: Decimal::ZERO,
        tax: Decimal::ZERO,
        gross: Decimal::ZERO,
    };
}

impl Index<AmountKind> for CalculatedAmounts {
    type Output = Decimal;

    fn index(&self, kind: AmountKind) -> &Decimal {
        match kind {
            AmountKind::Net => &self.net,
            AmountKind::PensionFund => &self.pension_fund,
            AmountKind::Tax => &self.tax,
            AmountKind::Gross => &self.gross,
        }
    }
}

impl IndexMut<AmountKind> for CalculatedAmounts {
    fn index_mut(&mut self, kind: AmountKind) -> &mut Decimal {
        match kind {
            AmountKind::Net => &mut self.net,
            AmountKind::PensionFund => &mut self.pension_fund,
            AmountKind::Tax => &mut self.tax,
            AmountKind::Gross => &mut self.gross,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_by_kind_reads_matching_field() {
        let amounts = CalculatedAmounts {
            net: Decimal::new(392, 0),
            pension_fund: Decimal::new(10, 0),
            tax: Decimal::new(98, 0),
            gross: Decimal::new(500, 0),
        };

        assert_eq!(amounts[AmountKind::Net], Decimal::new(392, 0));
        assert_eq!(amounts[AmountKind::PensionFund], Decimal::new(10, 0));
        assert_eq!(amounts[AmountKind::Tax], Decimal::new(98, 0));
        assert_eq!(amounts[AmountKind::Gross], Decimal::new(500, 0));
    }

    #[test]
    fn test_index_mut_writes_matching_field() {
        let mut amounts = CalculatedAmounts::ZERO;
        amounts[AmountKind::Tax] = Decimal::new(40, 0);

        assert_eq!(amounts.tax, Decimal::new(40, 0));
        assert_eq!(amounts.net, Decimal::ZERO);
    }

    #[test]
    fn test_amount_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&AmountKind::PensionFund).unwrap(),
            "\"pension_fund\""
        );
    }
}
