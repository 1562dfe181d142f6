//! Benefit calculation.
//!
//! This module turns a document amount plus employee and benefit attributes
//! into the four derived figures of a report entry by evaluating the matching
//! row of the [`RuleTable`].

use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AmountKind, AuditStep, Benefit, BenefitType, CalculatedAmounts, CalculationMethod, Document,
    Employee,
};

use super::rule_table::{Rule, RuleKey, RuleTable};

/// The five values a calculation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationInputs {
    /// Non-negative document amount.
    pub amount: Decimal,
    /// Whether the employee is active.
    pub is_active: bool,
    /// Whether the employee pays into the pension fund.
    pub is_pensions_payer: bool,
    /// Accrual or deduction.
    pub benefit_type: BenefitType,
    /// Gross or net, ignored for deductions.
    pub calculation_method: CalculationMethod,
}

impl CalculationInputs {
    /// Collects the inputs from a resolved document.
    pub fn for_document(document: &Document, employee: &Employee, benefit: &Benefit) -> Self {
        Self {
            amount: document.amount,
            is_active: employee.is_active,
            is_pensions_payer: employee.is_pensions_payer,
            benefit_type: benefit.benefit_type,
            calculation_method: benefit.calculation_method,
        }
    }

    fn rule_key(&self) -> RuleKey {
        RuleKey::for_inputs(
            self.is_active,
            self.is_pensions_payer,
            self.benefit_type,
            self.calculation_method,
        )
    }
}

/// The result of a calculation, including the amounts and audit step.
#[derive(Debug, Clone)]
pub struct BenefitCalculation {
    /// The derived figures.
    pub amounts: CalculatedAmounts,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Evaluates the rule table.
///
/// The calculator holds no state besides its table and is safe to share
/// between threads.
///
/// # Example
///
/// ```
/// use payroll_report_engine::calculation::BenefitCalculator;
/// use payroll_report_engine::models::{BenefitType, CalculationMethod};
/// use rust_decimal::Decimal;
///
/// let calculator = BenefitCalculator::default();
/// let amounts = calculator
///     .calculate(
///         Decimal::from(500),
///         true,
///         true,
///         BenefitType::Accrual,
///         CalculationMethod::Gross,
///     )
///     .unwrap();
///
/// assert_eq!(amounts.net, Decimal::from(392));
/// assert_eq!(amounts.pension_fund, Decimal::from(10));
/// assert_eq!(amounts.tax, Decimal::from(98));
/// assert_eq!(amounts.gross, Decimal::from(500));
/// ```
#[derive(Debug, Clone)]
pub struct BenefitCalculator {
    table: RuleTable,
    monetary_scale: u32,
}

impl BenefitCalculator {
    /// Builds a calculator from the engine configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            table: RuleTable::from_rates(&config.rates),
            monetary_scale: config.monetary_scale,
        }
    }

    /// Returns the rule table in use.
    pub fn rule_table(&self) -> &RuleTable {
        &self.table
    }

    /// Calculates net, pension fund, tax and gross for one amount.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ArithmeticOverflow`] if a formula overflows or
    /// its result would lose decimal places.
    pub fn calculate(
        &self,
        amount: Decimal,
        is_active: bool,
        is_pensions_payer: bool,
        benefit_type: BenefitType,
        calculation_method: CalculationMethod,
    ) -> EngineResult<CalculatedAmounts> {
        let inputs = CalculationInputs {
            amount,
            is_active,
            is_pensions_payer,
            benefit_type,
            calculation_method,
        };
        let rule = self.rule_for(&inputs)?;
        self.evaluate(rule, inputs.amount)
    }

    /// Calculates the amounts and records an audit step for them.
    ///
    /// # Arguments
    ///
    /// * `inputs` - The five values the calculation depends on
    /// * `document_id` - The document being calculated, if any
    /// * `step_number` - The step number for audit trail sequencing
    pub fn calculate_with_audit(
        &self,
        inputs: &CalculationInputs,
        document_id: Option<u64>,
        step_number: usize,
    ) -> EngineResult<BenefitCalculation> {
        let rule = self.rule_for(inputs)?;
        let amounts = self.evaluate(rule, inputs.amount)?;

        let reasoning = if inputs.is_active {
            AmountKind::ALL
                .iter()
                .map(|&kind| {
                    format!(
                        "{} = {} = {}",
                        kind.key(),
                        rule.formula(kind).describe(inputs.amount),
                        amounts[kind].normalize()
                    )
                })
                .collect::<Vec<_>>()
                .join("; ")
        } else {
            "Employee is inactive; all amounts are zero".to_string()
        };

        let audit_step = AuditStep {
            step_number,
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            document_id,
            input: serde_json::json!({
                "amount": inputs.amount.normalize().to_string(),
                "is_active": inputs.is_active,
                "is_pensions_payer": inputs.is_pensions_payer,
                "benefit_type": inputs.benefit_type,
                "calculation_method": inputs.calculation_method,
            }),
            output: serde_json::json!({
                "net": amounts.net.normalize().to_string(),
                "pension_fund": amounts.pension_fund.normalize().to_string(),
                "tax": amounts.tax.normalize().to_string(),
                "gross": amounts.gross.normalize().to_string(),
            }),
            reasoning,
        };

        Ok(BenefitCalculation {
            amounts,
            audit_step,
        })
    }

    fn rule_for(&self, inputs: &CalculationInputs) -> EngineResult<&Rule> {
        let key = inputs.rule_key();
        self.table
            .lookup(&key)
            .ok_or_else(|| EngineError::MissingRule {
                key: key.to_string(),
            })
    }

    fn evaluate(&self, rule: &Rule, amount: Decimal) -> EngineResult<CalculatedAmounts> {
        let mut amounts = CalculatedAmounts::ZERO;
        for kind in AmountKind::ALL {
            amounts[kind] = rule
                .formula(kind)
                .evaluate(amount, self.monetary_scale)
                .ok_or_else(|| EngineError::ArithmeticOverflow {
                    rule_id: rule.id.clone(),
                    amount,
                })?;
        }
        Ok(amounts)
    }
}

impl Default for BenefitCalculator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn calc(
        amount: &str,
        is_active: bool,
        is_pensions_payer: bool,
        benefit_type: BenefitType,
        method: CalculationMethod,
    ) -> CalculatedAmounts {
        BenefitCalculator::default()
            .calculate(dec(amount), is_active, is_pensions_payer, benefit_type, method)
            .unwrap()
    }

    fn assert_amounts(actual: CalculatedAmounts, net: &str, pension: &str, tax: &str, gross: &str) {
        assert_eq!(actual.net, dec(net), "net");
        assert_eq!(actual.pension_fund, dec(pension), "pension fund");
        assert_eq!(actual.tax, dec(tax), "tax");
        assert_eq!(actual.gross, dec(gross), "gross");
    }

    /// BC-001: pensions payer, gross accrual
    #[test]
    fn test_pensions_payer_gross_accrual() {
        let result = calc("500", true, true, BenefitType::Accrual, CalculationMethod::Gross);
        assert_amounts(result, "392", "10", "98", "500");
    }

    /// BC-002: inactive employee zeroes every figure
    #[test]
    fn test_inactive_employee_zeroes_out() {
        for benefit_type in [BenefitType::Accrual, BenefitType::Deduction] {
            for method in [CalculationMethod::Gross, CalculationMethod::Net] {
                let result = calc("1000", false, true, benefit_type, method);
                assert_eq!(result, CalculatedAmounts::ZERO);
            }
        }
    }

    /// BC-003: non-payer deduction keeps tax positive
    #[test]
    fn test_non_payer_deduction() {
        let result = calc("200", true, false, BenefitType::Deduction, CalculationMethod::Gross);
        assert_amounts(result, "-200", "0", "40", "-200");
    }

    #[test]
    fn test_pensions_payer_net_accrual_grosses_up() {
        let result = calc("392", true, true, BenefitType::Accrual, CalculationMethod::Net);
        assert_amounts(result, "392", "10", "98", "500");
    }

    #[test]
    fn test_pensions_payer_net_accrual_rounds_to_cents() {
        let result = calc("100", true, true, BenefitType::Accrual, CalculationMethod::Net);
        // 100 / 0.784 = 127.5510..., 100 x 0.02 / 0.784 = 2.5510...
        assert_amounts(result, "100", "2.55", "25", "127.55");
    }

    #[test]
    fn test_pensions_payer_deduction_negates_everything() {
        let result = calc("200", true, true, BenefitType::Deduction, CalculationMethod::Net);
        assert_amounts(result, "-200", "-4", "-40", "-200");
    }

    #[test]
    fn test_non_payer_gross_accrual() {
        let result = calc("1000", true, false, BenefitType::Accrual, CalculationMethod::Gross);
        assert_amounts(result, "800", "0", "200", "1000");
    }

    #[test]
    fn test_non_payer_net_accrual() {
        let result = calc("800", true, false, BenefitType::Accrual, CalculationMethod::Net);
        assert_amounts(result, "800", "0", "200", "1000");
    }

    #[test]
    fn test_monetary_scale_comes_from_config() {
        let config = EngineConfig {
            monetary_scale: 0,
            ..EngineConfig::default()
        };
        let amounts = BenefitCalculator::new(&config)
            .calculate(dec("100"), true, true, BenefitType::Accrual, CalculationMethod::Net)
            .unwrap();
        assert_eq!(amounts.gross, dec("128"));
    }

    #[test]
    fn test_overflow_is_reported() {
        let result = BenefitCalculator::default().calculate(
            Decimal::MAX,
            true,
            true,
            BenefitType::Accrual,
            CalculationMethod::Net,
        );

        match result {
            Err(EngineError::ArithmeticOverflow { rule_id, .. }) => {
                assert_eq!(rule_id, "pensions_payer_accrual_net");
            }
            other => panic!("Expected ArithmeticOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_precision_loss_is_reported() {
        let result = BenefitCalculator::default().calculate(
            dec("7922816251426433759354395033"),
            true,
            true,
            BenefitType::Accrual,
            CalculationMethod::Gross,
        );

        match result {
            Err(EngineError::ArithmeticOverflow { rule_id, amount }) => {
                assert_eq!(rule_id, "pensions_payer_accrual_gross");
                assert_eq!(amount, dec("7922816251426433759354395033"));
            }
            other => panic!("Expected ArithmeticOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_audit_step_records_rule_and_figures() {
        let inputs = CalculationInputs {
            amount: dec("500"),
            is_active: true,
            is_pensions_payer: true,
            benefit_type: BenefitType::Accrual,
            calculation_method: CalculationMethod::Gross,
        };
        let result = BenefitCalculator::default()
            .calculate_with_audit(&inputs, Some(4), 3)
            .unwrap();

        let step = result.audit_step;
        assert_eq!(step.step_number, 3);
        assert_eq!(step.document_id, Some(4));
        assert_eq!(step.rule_id, "pensions_payer_accrual_gross");
        assert_eq!(step.input["amount"].as_str().unwrap(), "500");
        assert_eq!(step.input["benefit_type"].as_str().unwrap(), "Accrual");
        assert_eq!(step.output["net"].as_str().unwrap(), "392");
        assert_eq!(step.output["tax"].as_str().unwrap(), "98");
        assert!(step.reasoning.contains("net = 500 x 0.784 = 392"));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_step_number_past_u32_range_is_kept() {
        let inputs = CalculationInputs {
            amount: dec("500"),
            is_active: true,
            is_pensions_payer: true,
            benefit_type: BenefitType::Accrual,
            calculation_method: CalculationMethod::Gross,
        };
        let step_number = u32::MAX as usize + 1;

        let result = BenefitCalculator::default()
            .calculate_with_audit(&inputs, None, step_number)
            .unwrap();

        assert_eq!(result.audit_step.step_number, step_number);
    }

    #[test]
    fn test_audit_reasoning_for_inactive_employee() {
        let inputs = CalculationInputs {
            amount: dec("1000"),
            is_active: false,
            is_pensions_payer: false,
            benefit_type: BenefitType::Accrual,
            calculation_method: CalculationMethod::Gross,
        };
        let result = BenefitCalculator::default()
            .calculate_with_audit(&inputs, None, 1)
            .unwrap();

        assert_eq!(result.audit_step.rule_id, "inactive_employee");
        assert!(result.audit_step.reasoning.contains("inactive"));
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn benefit_type_strategy() -> impl Strategy<Value = BenefitType> {
        prop_oneof![Just(BenefitType::Accrual), Just(BenefitType::Deduction)]
    }

    fn method_strategy() -> impl Strategy<Value = CalculationMethod> {
        prop_oneof![Just(CalculationMethod::Gross), Just(CalculationMethod::Net)]
    }

    proptest! {
        #[test]
        fn prop_inactive_always_zero(
            amount in amount_strategy(),
            is_pensions_payer in any::<bool>(),
            benefit_type in benefit_type_strategy(),
            method in method_strategy(),
        ) {
            let amounts = BenefitCalculator::default()
                .calculate(amount, false, is_pensions_payer, benefit_type, method)
                .unwrap();
            prop_assert_eq!(amounts, CalculatedAmounts::ZERO);
        }

        #[test]
        fn prop_gross_decomposes_exactly(amount in amount_strategy()) {
            let amounts = BenefitCalculator::default()
                .calculate(amount, true, true, BenefitType::Accrual, CalculationMethod::Gross)
                .unwrap();
            prop_assert_eq!(amounts.gross, amount);
            prop_assert_eq!(amounts.net + amounts.pension_fund + amounts.tax, amount);
        }

        #[test]
        fn prop_gross_down_then_up_round_trips(amount in amount_strategy()) {
            let calculator = BenefitCalculator::default();
            let down = calculator
                .calculate(amount, true, true, BenefitType::Accrual, CalculationMethod::Gross)
                .unwrap();
            let up = calculator
                .calculate(down.net, true, true, BenefitType::Accrual, CalculationMethod::Net)
                .unwrap();
            prop_assert!((up.gross - amount).abs() <= Decimal::new(1, 2));
        }

        #[test]
        fn prop_method_ignored_for_deductions(
            amount in amount_strategy(),
            is_pensions_payer in any::<bool>(),
        ) {
            let calculator = BenefitCalculator::default();
            let gross = calculator
                .calculate(amount, true, is_pensions_payer, BenefitType::Deduction, CalculationMethod::Gross)
                .unwrap();
            let net = calculator
                .calculate(amount, true, is_pensions_payer, BenefitType::Deduction, CalculationMethod::Net)
                .unwrap();
            prop_assert_eq!(gross, net);
        }
    }
}
