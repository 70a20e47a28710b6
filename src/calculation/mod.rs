//! Calculation logic for the report engine.
//!
//! This module contains the row classifier and time arithmetic used by the
//! hierarchical task-sheet aggregator, the attendance tabulator and payroll
//! deriver for attendance sheets, the CSV time-report reader, and the
//! flattener that lays every report out as a display table.

mod aggregator;
mod attendance;
mod employee_records;
mod flatten;
mod payroll;
mod row_classifier;
mod time_arithmetic;
mod time_report;

pub use aggregator::{
    DURATION_COLUMN, EXTERNAL_ID_COLUMN, RowOutcome, Step, TaskAggregator, VALUE_COLUMN,
    aggregate_task_sheet,
};
pub use attendance::{AttendanceCode, tabulate_attendance, tabulate_values};
pub use employee_records::build_employee_records;
pub use flatten::{Tabular, flatten};
pub use payroll::{derive_payroll, resolve_policy_inputs, round_currency, run_payroll};
pub use row_classifier::{LEVEL_COLUMN, classify_row};
pub use time_arithmetic::{accumulate, format_duration, format_seconds, normalize, parse_duration};
pub use time_report::read_time_report;
