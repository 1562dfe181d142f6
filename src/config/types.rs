//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The largest scale a [`Decimal`] can carry.
const MAX_MONETARY_SCALE: u32 = 28;

fn default_monetary_scale() -> u32 {
    2
}

/// Statutory rates the calculator's rule table is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// Pension-fund contribution rate (0.02).
    pub pension_fund: Decimal,
    /// Personal income tax rate (0.2).
    pub income_tax: Decimal,
    /// Tax charged on a net-method accrual, as a share of the net amount (0.25).
    pub net_method_income_tax: Decimal,
}

impl Default for StatutoryRates {
    fn default() -> Self {
        Self {
            pension_fund: Decimal::new(2, 2),
            income_tax: Decimal::new(2, 1),
            net_method_income_tax: Decimal::new(25, 2),
        }
    }
}

/// Engine configuration loaded from `engine.yaml`.
///
/// # Example
///
/// ```
/// use payroll_report_engine::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.monetary_scale, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Human-readable name of the payroll policy.
    pub name: String,
    /// Decimal places that division results are rounded to.
    #[serde(default = "default_monetary_scale")]
    pub monetary_scale: u32,
    /// Statutory rates.
    #[serde(default)]
    pub rates: StatutoryRates,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "Default payroll policy".to_string(),
            monetary_scale: default_monetary_scale(),
            rates: StatutoryRates::default(),
        }
    }
}

impl EngineConfig {
    /// Checks that every rate lies in `[0, 1)` and the scale is representable.
    pub fn validate(&self) -> EngineResult<()> {
        if self.monetary_scale > MAX_MONETARY_SCALE {
            return Err(EngineError::InvalidConfig {
                field: "monetary_scale".to_string(),
                message: format!("must not exceed {}", MAX_MONETARY_SCALE),
            });
        }

        let rates = [
            ("rates.pension_fund", self.rates.pension_fund),
            ("rates.income_tax", self.rates.income_tax),
            ("rates.net_method_income_tax", self.rates.net_method_income_tax),
        ];
        for (field, rate) in rates {
            if rate.is_sign_negative() || rate >= Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("{} is outside [0, 1)", rate),
                });
            }
        }

        Ok(())
    }
}
