//! Error types for the report engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while aggregating task sheets,
//! deriving payroll figures, or exporting report tables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for the report engine.
///
/// Every fallible operation returns this error type. Errors raised while
/// processing a single row are collected as [`RowError`]s instead of
/// aborting the whole run.
///
/// # Example
///
/// ```
/// use report_engine::error::EngineError;
///
/// let error = EngineError::MissingField {
///     field: "casual_balance".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required field: casual_balance");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
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

    /// Sheet template code was not found in the configuration.
    #[error("Sheet template not found: {code}")]
    TemplateNotFound {
        /// The template code that was not found.
        code: String,
    },

    /// A duration or seconds value could not be parsed.
    #[error("Failed to parse '{value}': {message}")]
    ParseError {
        /// The raw value that failed to parse.
        value: String,
        /// A description of the parse failure.
        message: String,
    },

    /// A field required by the payroll policy is absent from the record.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The normalized name of the missing field.
        field: String,
    },

    /// A policy field is present but does not hold a number.
    #[error("Invalid value for field '{field}': {value}")]
    InvalidField {
        /// The normalized name of the field.
        field: String,
        /// The offending cell text.
        value: String,
    },

    /// The daily salary rate cannot be computed.
    #[error("Division policy violated: {message}")]
    DivisionPolicy {
        /// A description of the violation.
        message: String,
    },

    /// An arithmetic result does not fit its numeric type.
    #[error("Arithmetic overflow: {message}")]
    Overflow {
        /// What was being computed.
        message: String,
    },

    /// CSV input could not be read.
    #[error("Malformed CSV input: {message}")]
    MalformedCsv {
        /// A description of the CSV failure.
        message: String,
    },

    /// A report table could not be written to an output format.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

impl EngineError {
    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                "CONFIG_ERROR"
            }
            EngineError::TemplateNotFound { .. } => "TEMPLATE_NOT_FOUND",
            EngineError::ParseError { .. } => "PARSE_ERROR",
            EngineError::MissingField { .. } => "MISSING_FIELD",
            EngineError::InvalidField { .. } => "INVALID_FIELD",
            EngineError::DivisionPolicy { .. } => "DIVISION_POLICY",
            EngineError::Overflow { .. } => "OVERFLOW",
            EngineError::MalformedCsv { .. } => "MALFORMED_CSV",
            EngineError::ExportError { .. } => "EXPORT_ERROR",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// An error attached to the input row that produced it.
///
/// Pipelines collect these alongside the records they successfully produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Zero-based index of the row in the input sheet.
    pub row_index: usize,
    /// The error code, see [`EngineError::code`].
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl RowError {
    /// Creates a row error from an engine error.
    pub fn new(row_index: usize, error: &EngineError) -> Self {
        Self {
            row_index,
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}
