//! CSV time-based report models.

use serde::{Deserialize, Serialize};

use crate::error::RowError;

/// One issue line of a time-based report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeReportEntry {
    /// The assignee.
    pub assignee: String,
    /// The project name.
    pub project: String,
    /// The issue summary.
    pub summary: String,
    /// The issue status.
    pub status: String,
    /// The due date, as written in the export.
    pub due_date: String,
    /// The original estimate formatted as `"{h}h {m}m"`, or empty.
    pub original_estimate: String,
    /// The time spent formatted as `"{h}h {m}m"`, or empty.
    pub time_spent: String,
}

/// The output of reading a time-based CSV report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeReport {
    /// Successfully read entries in file order.
    pub entries: Vec<TimeReportEntry>,
    /// Data rows that could not be read.
    pub errors: Vec<RowError>,
}
