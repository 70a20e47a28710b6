//! Core data models for the report engine.
//!
//! This module contains all the domain models used throughout the engine:
//! raw sheet cells and rows, the hierarchical task report, attendance
//! records and payroll results, the CSV time report, and the flattened
//! display table shared by every output sink.

mod attendance;
mod audit;
mod cell;
mod display;
mod payroll;
mod task_report;
mod time_report;

pub use attendance::{AttendanceCounts, EmployeeRecord};
pub use audit::AuditStep;
pub use cell::{CellValue, RawRow};
pub use display::{DisplayRow, DisplayTable};
pub use payroll::{HalfDayPolicy, PayrollReport, PayrollResult, PolicyField, PolicyInputs};
pub use task_report::{
    FinalizedGroup, Level, ReportRecord, SkipReason, SkippedRow, SubjectGroup, TaskEntry,
    TaskReport,
};
pub use time_report::{TimeReport, TimeReportEntry};
