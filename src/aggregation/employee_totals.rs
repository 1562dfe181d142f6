//! Employee totals and benefit column derivation.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Benefit, BenefitType, Employee, ReportEntry};

/// Running totals for one employee within one report.
///
/// Gross amounts are kept as signed sums per benefit name, separately for
/// accruals and deductions, so an accrual and a deduction sharing a name
/// never share a bucket. Deduction amounts are reported as the negated gross,
/// so a `-200` deduction gross shows as a `200` deduction and reduces
/// [`net_payable`](Self::net_payable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTotals {
    /// The employee the totals belong to.
    pub employee: Employee,
    /// Accumulated gross amount per accrual benefit name.
    pub accrual_gross: BTreeMap<String, Decimal>,
    /// Accumulated (negative) gross amount per deduction benefit name.
    pub deduction_gross: BTreeMap<String, Decimal>,
    /// Accumulated pension-fund contributions.
    pub pension_fund: Decimal,
    /// Accumulated personal income tax.
    pub tax: Decimal,
    /// Distinct accrual benefits seen, keyed by name.
    pub accruals: BTreeMap<String, Benefit>,
    /// Distinct deduction benefits seen, keyed by name.
    pub deductions: BTreeMap<String, Benefit>,
}

impl EmployeeTotals {
    fn new(employee: Employee) -> Self {
        Self {
            employee,
            accrual_gross: BTreeMap::new(),
            deduction_gross: BTreeMap::new(),
            pension_fund: Decimal::ZERO,
            tax: Decimal::ZERO,
            accruals: BTreeMap::new(),
            deductions: BTreeMap::new(),
        }
    }

    fn add(&mut self, entry: &ReportEntry) {
        let benefit = &entry.benefit;
        self.pension_fund += entry.pensions_fund;
        self.tax += entry.personal_income_tax;

        let (gross, partition) = match benefit.benefit_type {
            BenefitType::Accrual => (&mut self.accrual_gross, &mut self.accruals),
            BenefitType::Deduction => (&mut self.deduction_gross, &mut self.deductions),
        };
        *gross.entry(benefit.name.clone()).or_insert(Decimal::ZERO) += entry.gross_amount;
        partition
            .entry(benefit.name.clone())
            .or_insert_with(|| benefit.clone());
    }

    /// Accumulated gross of the named benefit of one type, zero if never seen.
    pub fn gross_for(&self, benefit_type: BenefitType, benefit_name: &str) -> Decimal {
        let gross = match benefit_type {
            BenefitType::Accrual => &self.accrual_gross,
            BenefitType::Deduction => &self.deduction_gross,
        };
        gross.get(benefit_name).copied().unwrap_or(Decimal::ZERO)
    }

    /// Accrual amount for a benefit name.
    pub fn accrual_for(&self, benefit_name: &str) -> Decimal {
        self.gross_for(BenefitType::Accrual, benefit_name)
    }

    /// Deduction amount for a benefit name as a positive magnitude.
    pub fn deduction_for(&self, benefit_name: &str) -> Decimal {
        -self.gross_for(BenefitType::Deduction, benefit_name)
    }

    /// Sum of gross amounts over accrual benefits.
    pub fn total_accruals(&self) -> Decimal {
        self.accrual_gross.values().copied().sum()
    }

    /// Sum of deduction amounts over deduction benefits, excluding tax and pension.
    pub fn total_benefit_deductions(&self) -> Decimal {
        -self.deduction_gross.values().copied().sum::<Decimal>()
    }

    /// Benefit deductions plus pension fund plus tax.
    pub fn total_deductions(&self) -> Decimal {
        self.total_benefit_deductions() + self.pension_fund + self.tax
    }

    /// `total_accruals − total_deductions`.
    pub fn net_payable(&self) -> Decimal {
        self.total_accruals() - self.total_deductions()
    }
}

/// Totals per employee, ordered by employee id.
pub type EmployeeTotalsMap = BTreeMap<u64, EmployeeTotals>;

/// Groups entries by employee in a single pass.
///
/// The map is owned by the call; aggregating the same entries twice yields
/// identical totals.
///
/// # Example
///
/// ```
/// use payroll_report_engine::aggregation::aggregate_by_employee;
///
/// let totals = aggregate_by_employee(&[]);
/// assert!(totals.is_empty());
/// ```
pub fn aggregate_by_employee(entries: &[ReportEntry]) -> EmployeeTotalsMap {
    let mut totals = EmployeeTotalsMap::new();
    for entry in entries {
        totals
            .entry(entry.employee.id)
            .or_insert_with(|| EmployeeTotals::new(entry.employee.clone()))
            .add(entry);
    }
    totals
}

/// The benefit names that get a column, across a report's full entry set.
///
/// Names are sorted, so column order does not depend on entry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitColumns {
    /// Accrual benefit names.
    pub accruals: Vec<String>,
    /// Deduction benefit names.
    pub deductions: Vec<String>,
}

impl BenefitColumns {
    /// Collects the distinct benefit names per type.
    pub fn from_entries(entries: &[ReportEntry]) -> Self {
        let mut accruals = BTreeSet::new();
        let mut deductions = BTreeSet::new();
        for entry in entries {
            let names = match entry.benefit.benefit_type {
                BenefitType::Accrual => &mut accruals,
                BenefitType::Deduction => &mut deductions,
            };
            names.insert(entry.benefit.name.clone());
        }
        Self {
            accruals: accruals.into_iter().collect(),
            deductions: deductions.into_iter().collect(),
        }
    }
}
