//! Calculation logic for the Payroll Report Engine.
//!
//! This module contains the benefit calculation rule table and the
//! calculator that evaluates it for one document amount at a time.

mod benefit_calculator;
mod rule_table;

pub use benefit_calculator::{BenefitCalculation, BenefitCalculator, CalculationInputs};
pub use rule_table::{Formula, Rule, RuleKey, RuleTable};
