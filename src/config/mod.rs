//! Configuration loading and management for the Payroll Report Engine.
//!
//! This module provides functionality to load the payroll policy from a YAML
//! file: the statutory rates the calculator derives its rule table from and
//! the monetary scale division results are rounded to.
//!
//! # Example
//!
//! ```no_run
//! use payroll_report_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Loaded policy: {}", config.config().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, StatutoryRates};
