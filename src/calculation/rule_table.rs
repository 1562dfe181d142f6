//! The benefit calculation rule table.
//!
//! Each row of the table is keyed by the tuple of employee and benefit
//! attributes it applies to and holds one [`Formula`] per [`AmountKind`].
//! All rows are derived from the configured [`StatutoryRates`]:
//!
//! | employee | benefit | net | pension fund | tax | gross |
//! |---|---|---|---|---|---|
//! | inactive | any | 0 | 0 | 0 | 0 |
//! | pensions payer | accrual, gross | a×0.784 | a×0.02 | a×0.196 | a |
//! | pensions payer | accrual, net | a | a×0.02/0.784 | a×0.25 | a/0.784 |
//! | pensions payer | deduction | −a | −a×0.02 | −a×0.2 | −a |
//! | other | accrual, gross | a×0.8 | 0 | a×0.2 | a |
//! | other | accrual, net | a | 0 | a×0.25 | a/0.8 |
//! | other | deduction | −a | 0 | a×0.2 | −a |

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::StatutoryRates;
use crate::models::{AmountKind, BenefitType, CalculationMethod};

/// How one derived amount is computed from the document amount `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    /// Always zero.
    Zero,
    /// `a × k`, exact.
    Scale(Decimal),
    /// `a × numerator / denominator`, rounded half-up to the monetary scale.
    Ratio {
        /// Multiplier applied before dividing.
        numerator: Decimal,
        /// Divisor.
        denominator: Decimal,
    },
}

impl Formula {
    /// Evaluates the formula, returning `None` if any step overflows or
    /// cannot be held at full precision.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_report_engine::calculation::Formula;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let gross_up = Formula::Ratio {
    ///     numerator: Decimal::ONE,
    ///     denominator: Decimal::from_str("0.784").unwrap(),
    /// };
    /// let gross = gross_up.evaluate(Decimal::from(100), 2).unwrap();
    /// assert_eq!(gross, Decimal::from_str("127.55").unwrap());
    /// ```
    pub fn evaluate(&self, amount: Decimal, monetary_scale: u32) -> Option<Decimal> {
        match *self {
            Formula::Zero => Some(Decimal::ZERO),
            Formula::Scale(k) => exact_mul(amount, k),
            Formula::Ratio {
                numerator,
                denominator,
            } => {
                let quotient = exact_mul(amount, numerator)?.checked_div(denominator)?;
                if !fits_at_scale(quotient, monetary_scale) {
                    return None;
                }
                Some(quotient.round_dp_with_strategy(
                    monetary_scale,
                    RoundingStrategy::MidpointAwayFromZero,
                ))
            }
        }
    }

    /// Renders the formula applied to `amount`, e.g. `500 x 0.784`.
    pub fn describe(&self, amount: Decimal) -> String {
        match *self {
            Formula::Zero => "0".to_string(),
            Formula::Scale(k) => format!("{} x {}", amount.normalize(), k.normalize()),
            Formula::Ratio {
                numerator,
                denominator,
            } if numerator == Decimal::ONE => {
                format!("{} / {}", amount.normalize(), denominator.normalize())
            }
            Formula::Ratio {
                numerator,
                denominator,
            } => format!(
                "{} x {} / {}",
                amount.normalize(),
                numerator.normalize(),
                denominator.normalize()
            ),
        }
    }
}

/// `a × b`, or `None` if the product cannot keep every decimal place.
///
/// `checked_mul` only fails on integer overflow; when the product merely has
/// too many digits it drops decimal places instead.
fn exact_mul(a: Decimal, b: Decimal) -> Option<Decimal> {
    let product = a.checked_mul(b)?;
    if product.is_zero() || product.scale() >= a.scale() + b.scale() {
        Some(product)
    } else {
        None
    }
}

/// Whether `value` can be held with `scale` decimal places.
fn fits_at_scale(value: Decimal, scale: u32) -> bool {
    (0..scale)
        .try_fold(value.abs(), |v, _| v.checked_mul(Decimal::TEN))
        .is_some()
}

/// The attribute tuple a rule applies to.
///
/// Attributes a rule does not branch on are `None`: inactive employees match
/// on activity alone and deductions ignore the calculation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleKey {
    /// Whether the employee is active.
    pub is_active: bool,
    /// Whether the employee pays into the pension fund.
    pub is_pensions_payer: Option<bool>,
    /// Accrual or deduction.
    pub benefit_type: Option<BenefitType>,
    /// Gross or net, accruals only.
    pub calculation_method: Option<CalculationMethod>,
}

impl RuleKey {
    /// Normalizes raw inputs to the key of the row that governs them.
    pub fn for_inputs(
        is_active: bool,
        is_pensions_payer: bool,
        benefit_type: BenefitType,
        calculation_method: CalculationMethod,
    ) -> Self {
        if !is_active {
            return Self::inactive();
        }
        let calculation_method = match benefit_type {
            BenefitType::Accrual => Some(calculation_method),
            BenefitType::Deduction => None,
        };
        Self {
            is_active: true,
            is_pensions_payer: Some(is_pensions_payer),
            benefit_type: Some(benefit_type),
            calculation_method,
        }
    }

    fn inactive() -> Self {
        Self {
            is_active: false,
            is_pensions_payer: None,
            benefit_type: None,
            calculation_method: None,
        }
    }

    fn active(
        is_pensions_payer: bool,
        benefit_type: BenefitType,
        calculation_method: Option<CalculationMethod>,
    ) -> Self {
        Self {
            is_active: true,
            is_pensions_payer: Some(is_pensions_payer),
            benefit_type: Some(benefit_type),
            calculation_method,
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "active={} pensions_payer={:?} type={:?} method={:?}",
            self.is_active, self.is_pensions_payer, self.benefit_type, self.calculation_method
        )
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Stable identifier recorded in audit steps.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// The inputs this row applies to.
    pub key: RuleKey,
    /// Formulas in [`AmountKind::ALL`] order.
    formulas: [Formula; 4],
}

impl Rule {
    fn new(id: &str, name: &str, key: RuleKey, formulas: [Formula; 4]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            key,
            formulas,
        }
    }

    /// Returns the formula for one derived amount.
    pub fn formula(&self, kind: AmountKind) -> Formula {
        match kind {
            AmountKind::Net => self.formulas[0],
            AmountKind::PensionFund => self.formulas[1],
            AmountKind::Tax => self.formulas[2],
            AmountKind::Gross => self.formulas[3],
        }
    }
}

/// The full decision table, keyed by [`RuleKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: BTreeMap<RuleKey, Rule>,
}

impl RuleTable {
    /// Builds the seven rows from the statutory rates.
    pub fn from_rates(rates: &StatutoryRates) -> Self {
        let pension = rates.pension_fund;
        let tax = rates.income_tax;
        let after_pension = Decimal::ONE - pension;
        let net_share_pensions_payer = after_pension * (Decimal::ONE - tax);
        let tax_share_pensions_payer = after_pension * tax;
        let net_share = Decimal::ONE - tax;
        let identity = Formula::Scale(Decimal::ONE);
        let negate = Formula::Scale(Decimal::NEGATIVE_ONE);

        let rows = [
            Rule::new(
                "inactive_employee",
                "Inactive employee",
                RuleKey::inactive(),
                [Formula::Zero; 4],
            ),
            Rule::new(
                "pensions_payer_accrual_gross",
                "Pensions payer, gross accrual",
                RuleKey::active(true, BenefitType::Accrual, Some(CalculationMethod::Gross)),
                [
                    Formula::Scale(net_share_pensions_payer),
                    Formula::Scale(pension),
                    Formula::Scale(tax_share_pensions_payer),
                    identity,
                ],
            ),
            Rule::new(
                "pensions_payer_accrual_net",
                "Pensions payer, net accrual",
                RuleKey::active(true, BenefitType::Accrual, Some(CalculationMethod::Net)),
                [
                    identity,
                    Formula::Ratio {
                        numerator: pension,
                        denominator: net_share_pensions_payer,
                    },
                    Formula::Scale(rates.net_method_income_tax),
                    Formula::Ratio {
                        numerator: Decimal::ONE,
                        denominator: net_share_pensions_payer,
                    },
                ],
            ),
            Rule::new(
                "pensions_payer_deduction",
                "Pensions payer, deduction",
                RuleKey::active(true, BenefitType::Deduction, None),
                [
                    negate,
                    Formula::Scale(-pension),
                    Formula::Scale(-tax),
                    negate,
                ],
            ),
            Rule::new(
                "accrual_gross",
                "Gross accrual",
                RuleKey::active(false, BenefitType::Accrual, Some(CalculationMethod::Gross)),
                [
                    Formula::Scale(net_share),
                    Formula::Zero,
                    Formula::Scale(tax),
                    identity,
                ],
            ),
            Rule::new(
                "accrual_net",
                "Net accrual",
                RuleKey::active(false, BenefitType::Accrual, Some(CalculationMethod::Net)),
                [
                    identity,
                    Formula::Zero,
                    Formula::Scale(rates.net_method_income_tax),
                    Formula::Ratio {
                        numerator: Decimal::ONE,
                        denominator: net_share,
                    },
                ],
            ),
            Rule::new(
                "deduction",
                "Deduction",
                RuleKey::active(false, BenefitType::Deduction, None),
                [negate, Formula::Zero, Formula::Scale(tax), negate],
            ),
        ];

        Self {
            rules: rows.into_iter().map(|rule| (rule.key, rule)).collect(),
        }
    }

    /// Returns the row governing `key`, if any.
    pub fn lookup(&self, key: &RuleKey) -> Option<&Rule> {
        self.rules.get(key)
    }

    /// Iterates the rows in key order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::from_rates(&StatutoryRates::default())
    }
}
