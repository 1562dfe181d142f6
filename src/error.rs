//! Error types for the Payroll Report Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while generating and viewing
//! payroll reports.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The kind of reference data a document points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// An employee record.
    Employee,
    /// A benefit record.
    Benefit,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Employee => f.write_str("employee"),
            ReferenceKind::Benefit => f.write_str("benefit"),
        }
    }
}

/// The main error type for the Payroll Report Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_report_engine::error::{EngineError, ReferenceKind};
///
/// let error = EngineError::ReferenceNotFound {
///     kind: ReferenceKind::Employee,
///     id: 7,
///     document_id: 42,
/// };
/// assert_eq!(error.to_string(), "Document 42 references unknown employee 7");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was parsed but is out of range.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// A document points at an employee or benefit that does not exist.
    #[error("Document {document_id} references unknown {kind} {id}")]
    ReferenceNotFound {
        /// Which kind of reference could not be resolved.
        kind: ReferenceKind,
        /// The unresolved identifier.
        id: u64,
        /// The document carrying the reference.
        document_id: u64,
    },

    /// The requested date range starts after it ends.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange {
        /// Requested start date.
        from: NaiveDate,
        /// Requested end date.
        to: NaiveDate,
    },

    /// No report exists with the given identifier.
    #[error("Report not found: {report_id}")]
    ReportNotFound {
        /// The identifier that was looked up.
        report_id: Uuid,
    },

    /// A calculation rule produced a value that cannot be represented.
    #[error("Arithmetic overflow in rule '{rule_id}' for amount {amount}")]
    ArithmeticOverflow {
        /// The rule being evaluated.
        rule_id: String,
        /// The input amount.
        amount: Decimal,
    },

    /// The rule table has no row for a set of inputs.
    #[error("No calculation rule for {key}")]
    MissingRule {
        /// The normalized rule key.
        key: String,
    },

    /// A storage collaborator failed.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
