//! Request types for the report engine API.
//!
//! This module defines the JSON request bodies and the query string shared
//! by every `/reports` endpoint.

use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;
use crate::models::{HalfDayPolicy, RawRow};

/// Request body for `POST /reports/tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReportRequest {
    /// The task sheet, one array of cells per row.
    pub rows: Vec<RawRow>,
}

/// Request body for `POST /reports/payroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The attendance sheet, header rows included.
    pub rows: Vec<RawRow>,
    /// Sheet template code; the configured default when absent.
    #[serde(default)]
    pub template: Option<String>,
    /// Overrides the template's half-day policy.
    #[serde(default)]
    pub half_day_policy: Option<HalfDayPolicy>,
}

/// Query string accepted by every report endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExportQuery {
    /// Output format, JSON by default.
    #[serde(default)]
    pub format: ExportFormat,
}
