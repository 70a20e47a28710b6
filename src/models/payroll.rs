//! Payroll derivation models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AttendanceCounts, AuditStep};
use crate::error::RowError;

/// How an odd half-day left over after pairing is treated.
///
/// Two half-days always convert into one casual leave. The remainder, if
/// any, is either counted as half a casual leave or deducted from salary as
/// half a day's pay.
///
/// # Example
///
/// ```
/// use report_engine::models::HalfDayPolicy;
///
/// let policy: HalfDayPolicy = serde_json::from_str("\"as_deduction\"").unwrap();
/// assert_eq!(policy, HalfDayPolicy::AsDeduction);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfDayPolicy {
    /// The remainder adds 0.5 to the adjusted casual leave count.
    #[default]
    AsLeaveUnit,
    /// The remainder is deducted as half a day's salary.
    AsDeduction,
}

/// A normalized field name the payroll deriver reads from a record.
///
/// Sheet templates map each of these to the header labels used by a
/// particular source layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyField {
    /// The employee's display name.
    Name,
    /// Gross salary for the period.
    Gross,
    /// Fixed deduction applied before any leave deduction (e.g. provident fund).
    DeductionBeforeLeave,
    /// Casual leave balance available to the employee.
    CasualBalance,
    /// Sick leave balance available to the employee.
    SickBalance,
    /// Working days in the period; the daily rate divisor.
    WorkingDays,
}

impl PolicyField {
    /// All policy fields in a stable order.
    pub const ALL: [PolicyField; 6] = [
        PolicyField::Name,
        PolicyField::Gross,
        PolicyField::DeductionBeforeLeave,
        PolicyField::CasualBalance,
        PolicyField::SickBalance,
        PolicyField::WorkingDays,
    ];

    /// Returns the snake_case name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyField::Name => "name",
            PolicyField::Gross => "gross",
            PolicyField::DeductionBeforeLeave => "deduction_before_leave",
            PolicyField::CasualBalance => "casual_balance",
            PolicyField::SickBalance => "sick_balance",
            PolicyField::WorkingDays => "working_days",
        }
    }
}

impl fmt::Display for PolicyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy figures resolved from an employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyInputs {
    /// The employee's display name (empty if the sheet has none).
    pub name: String,
    /// Gross salary.
    pub gross: Decimal,
    /// Deduction applied before leave.
    pub deduction_before_leave: Decimal,
    /// Casual leave balance.
    pub casual_balance: Decimal,
    /// Sick leave balance.
    pub sick_balance: Decimal,
    /// Working days in the period.
    pub working_days: Decimal,
}

/// The derived payroll figures for one employee.
///
/// Monetary outputs are rounded to whole units; the net salary is computed
/// from the unrounded components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Serial number among the reported employees, starting at 1.
    pub serial: u32,
    /// Zero-based index of the source row in the sheet.
    pub row_index: usize,
    /// The employee's display name.
    pub name: String,
    /// Raw attendance code counts.
    pub counts: AttendanceCounts,
    /// The half-day remainder policy applied.
    pub half_day_policy: HalfDayPolicy,
    /// Casual leave after converting half-days.
    pub adjusted_casual: Decimal,
    /// Casual leave beyond the balance.
    pub excess_casual: Decimal,
    /// Sick leave beyond the balance.
    pub excess_sick: Decimal,
    /// Present days beyond the working-day baseline.
    pub extra_days: Decimal,
    /// Gross salary.
    pub gross: Decimal,
    /// Deduction applied before leave.
    pub deduction_before_leave: Decimal,
    /// Gross divided by working days, unrounded.
    pub daily_rate: Decimal,
    /// Deduction for excess casual leave, rounded.
    pub casual_deduction: Decimal,
    /// Deduction for excess sick leave, rounded.
    pub sick_deduction: Decimal,
    /// Deduction for an unpaired half-day under [`HalfDayPolicy::AsDeduction`], rounded.
    pub half_day_deduction: Decimal,
    /// Credit for extra days present, rounded.
    pub bonus: Decimal,
    /// Net salary, rounded.
    pub net_salary: Decimal,
    /// Ordered record of each derivation step.
    pub audit_trace: Vec<AuditStep>,
}

/// The output of running the payroll pipeline over an attendance sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Results in source sheet order.
    pub results: Vec<PayrollResult>,
    /// Number of records dropped for having no attendance at all.
    pub inactive_dropped: usize,
    /// Records that could not be derived.
    pub errors: Vec<RowError>,
}
