//! Response types for the report engine API.
//!
//! This module defines the report envelope returned for JSON output, the
//! error response structures, and the mapping from engine errors to HTTP
//! statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, RowError};
use crate::models::{DisplayTable, SkippedRow};

/// JSON body returned by every report endpoint.
///
/// `records` carries the structured report; `table` is the flattened view
/// also used for CSV, XLSX and PDF output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEnvelope<R> {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// Code of the sheet template used, for payroll reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// The structured report records.
    pub records: Vec<R>,
    /// The flattened display table.
    pub table: DisplayTable,
    /// Rows the pipeline ignored, with the reason.
    #[serde(default)]
    pub skipped: Vec<SkippedRow>,
    /// Employees dropped for having no attendance at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactive_dropped: Option<usize>,
    /// Rows that failed, with the error.
    #[serde(default)]
    pub errors: Vec<RowError>,
}

impl<R> ReportEnvelope<R> {
    /// Wraps records and their display table in a fresh envelope.
    pub fn new(records: Vec<R>, table: DisplayTable) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            template: None,
            records,
            table,
            skipped: Vec::new(),
            inactive_dropped: None,
            errors: Vec::new(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a template not found error response.
    pub fn template_not_found(code: &str) -> Self {
        Self::with_details(
            "TEMPLATE_NOT_FOUND",
            format!("Sheet template not found: {}", code),
            format!("The template code '{}' is not configured on this engine", code),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unsupported output format error response.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::with_details(
            "INVALID_FORMAT",
            message,
            "Supported formats are json, csv, xlsx and pdf",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let code = error.code();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    code,
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    code,
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::TemplateNotFound { code } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::template_not_found(&code),
            },
            EngineError::MalformedCsv { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    code,
                    "The uploaded CSV could not be read",
                    message,
                ),
            },
            EngineError::ExportError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(code, "Report export failed", message),
            },
            // Row-level errors are reported inside the envelope; these arms
            // only fire if one escapes a pipeline.
            err @ (EngineError::ParseError { .. }
            | EngineError::MissingField { .. }
            | EngineError::InvalidField { .. }
            | EngineError::DivisionPolicy { .. }
            | EngineError::Overflow { .. }) => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new(code, err.to_string()),
            },
        }
    }
}
