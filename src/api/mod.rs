//! HTTP API module for the report engine.
//!
//! This module provides the REST endpoints that turn uploaded task sheets,
//! attendance sheets, and time-tracking CSV exports into reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ExportQuery, PayrollRequest, TaskReportRequest};
pub use response::{ApiError, ApiErrorResponse, ReportEnvelope};
pub use state::AppState;
