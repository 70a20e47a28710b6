//! Payroll derivation from attendance counts.
//!
//! This module turns an employee's attendance counts and the policy figures
//! on their sheet row (gross salary, fixed deduction, leave balances,
//! working days) into leave adjustments, salary deductions, an extra-days
//! credit, and net salary.
//!
//! # Policy
//!
//! - Two half-days make one casual leave. An unpaired half-day is either
//!   half a casual leave or half a day's pay, per [`HalfDayPolicy`].
//! - Casual and sick leave beyond the employee's balances are deducted at
//!   the daily rate (gross / working days).
//! - Days present beyond the working-day count are credited at the daily rate.
//! - Only the reported figures are rounded; the daily rate never is.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::config::SheetTemplate;
use crate::error::{EngineError, EngineResult, RowError};
use crate::models::{
    AttendanceCounts, AuditStep, CellValue, EmployeeRecord, HalfDayPolicy, PayrollReport,
    PayrollResult, PolicyField, PolicyInputs, RawRow,
};

use super::attendance::tabulate_attendance;
use super::employee_records::build_employee_records;

/// Rounds a monetary figure to whole units, halves away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Finds the first non-blank value among a field's header aliases.
fn lookup<'a>(
    record: &'a EmployeeRecord,
    template: &SheetTemplate,
    field: PolicyField,
) -> Option<&'a CellValue> {
    template
        .aliases(field)
        .iter()
        .filter_map(|label| record.get(label))
        .find(|value| !value.is_blank())
}

fn overflow(what: &str) -> EngineError {
    EngineError::Overflow {
        message: format!("{} is out of range", what),
    }
}

fn checked_sub(a: Decimal, b: Decimal, what: &str) -> EngineResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(what))
}

fn checked_mul(a: Decimal, b: Decimal, what: &str) -> EngineResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(what))
}

fn require_decimal(
    record: &EmployeeRecord,
    template: &SheetTemplate,
    field: PolicyField,
) -> EngineResult<Decimal> {
    let value = lookup(record, template, field).ok_or_else(|| EngineError::MissingField {
        field: field.to_string(),
    })?;

    value.as_decimal().ok_or_else(|| EngineError::InvalidField {
        field: field.to_string(),
        value: value.as_text(),
    })
}

/// Resolves the policy figures of a record through the template's aliases.
///
/// Every numeric policy field is required. The name is optional and
/// defaults to an empty string.
///
/// # Errors
///
/// - [`EngineError::MissingField`] if no alias of a field holds a value.
/// - [`EngineError::InvalidField`] if the value is not a number.
pub fn resolve_policy_inputs(
    record: &EmployeeRecord,
    template: &SheetTemplate,
) -> EngineResult<PolicyInputs> {
    Ok(PolicyInputs {
        name: lookup(record, template, PolicyField::Name)
            .map(CellValue::as_text)
            .unwrap_or_default(),
        gross: require_decimal(record, template, PolicyField::Gross)?,
        deduction_before_leave: require_decimal(
            record,
            template,
            PolicyField::DeductionBeforeLeave,
        )?,
        casual_balance: require_decimal(record, template, PolicyField::CasualBalance)?,
        sick_balance: require_decimal(record, template, PolicyField::SickBalance)?,
        working_days: require_decimal(record, template, PolicyField::WorkingDays)?,
    })
}

/// Derives the payroll figures for one employee.
///
/// The returned result has `serial` 0; pipelines number results once
/// filtering is done.
///
/// # Errors
///
/// Returns [`EngineError::DivisionPolicy`] if the working-day count is not
/// positive, or if the daily rate cannot be represented, and
/// [`EngineError::Overflow`] if a deduction, the credit or the net salary
/// falls outside the decimal range.
///
/// # Example
///
/// ```
/// use report_engine::calculation::derive_payroll;
/// use report_engine::models::{AttendanceCounts, HalfDayPolicy, PolicyInputs};
/// use rust_decimal::Decimal;
///
/// let inputs = PolicyInputs {
///     name: "Alice".to_string(),
///     gross: Decimal::from(31000),
///     deduction_before_leave: Decimal::from(500),
///     casual_balance: Decimal::from(1),
///     sick_balance: Decimal::from(1),
///     working_days: Decimal::from(22),
/// };
/// let counts = AttendanceCounts { present: 20, half: 0, casual_raw: 2, sick: 0 };
///
/// let result = derive_payroll(3, &inputs, counts, HalfDayPolicy::AsLeaveUnit).unwrap();
/// assert_eq!(result.excess_casual, Decimal::from(1));
/// assert_eq!(result.casual_deduction, Decimal::from(1409));
/// assert_eq!(result.net_salary, Decimal::from(29091));
/// ```
pub fn derive_payroll(
    row_index: usize,
    inputs: &PolicyInputs,
    counts: AttendanceCounts,
    policy: HalfDayPolicy,
) -> EngineResult<PayrollResult> {
    if inputs.working_days <= Decimal::ZERO {
        return Err(EngineError::DivisionPolicy {
            message: format!(
                "working days must be positive, got {}",
                inputs.working_days.normalize()
            ),
        });
    }

    let daily_rate = inputs
        .gross
        .checked_div(inputs.working_days)
        .ok_or_else(|| EngineError::DivisionPolicy {
            message: format!(
                "daily rate overflows for gross {} over {} days",
                inputs.gross, inputs.working_days
            ),
        })?;

    let mut audit_trace = Vec::with_capacity(5);

    // Half-day conversion.
    let half_day_pairs = Decimal::from(counts.half / 2);
    let half_day_remainder = Decimal::from(counts.half % 2);
    let one_half = Decimal::new(5, 1);
    let remainder_as_leave = match policy {
        HalfDayPolicy::AsLeaveUnit => half_day_remainder * one_half,
        HalfDayPolicy::AsDeduction => Decimal::ZERO,
    };
    let adjusted_casual = Decimal::from(counts.casual_raw) + half_day_pairs + remainder_as_leave;
    let half_day_deduction_raw = match policy {
        HalfDayPolicy::AsLeaveUnit => Decimal::ZERO,
        HalfDayPolicy::AsDeduction => {
            checked_mul(half_day_remainder * one_half, daily_rate, "half-day deduction")?
        }
    };

    audit_trace.push(AuditStep {
        step_number: 1,
        rule_id: "half_day_conversion".to_string(),
        rule_name: "Half-Day Conversion".to_string(),
        input: serde_json::json!({
            "casual_raw": counts.casual_raw,
            "half_days": counts.half,
            "policy": policy,
        }),
        output: serde_json::json!({
            "half_day_pairs": half_day_pairs.to_string(),
            "half_day_remainder": half_day_remainder.to_string(),
            "adjusted_casual": adjusted_casual.normalize().to_string(),
            "half_day_deduction": round_currency(half_day_deduction_raw).to_string(),
        }),
        reasoning: match policy {
            HalfDayPolicy::AsLeaveUnit => format!(
                "{} CL + {} half-day pairs + {} unpaired x 0.5 = {} casual leave",
                counts.casual_raw,
                half_day_pairs,
                half_day_remainder,
                adjusted_casual.normalize()
            ),
            HalfDayPolicy::AsDeduction => format!(
                "{} CL + {} half-day pairs = {} casual leave; {} unpaired half-day deducted as half a day's pay",
                counts.casual_raw,
                half_day_pairs,
                adjusted_casual.normalize(),
                half_day_remainder
            ),
        },
    });

    // Excess casual leave.
    let excess_casual = checked_sub(adjusted_casual, inputs.casual_balance, "excess casual leave")?
        .max(Decimal::ZERO);
    let casual_deduction_raw = checked_mul(excess_casual, daily_rate, "casual deduction")?;
    audit_trace.push(excess_step(
        2,
        "excess_casual_leave",
        "Excess Casual Leave",
        adjusted_casual,
        inputs.casual_balance,
        excess_casual,
        daily_rate,
        casual_deduction_raw,
    ));

    // Excess sick leave.
    let sick = Decimal::from(counts.sick);
    let excess_sick =
        checked_sub(sick, inputs.sick_balance, "excess sick leave")?.max(Decimal::ZERO);
    let sick_deduction_raw = checked_mul(excess_sick, daily_rate, "sick deduction")?;
    audit_trace.push(excess_step(
        3,
        "excess_sick_leave",
        "Excess Sick Leave",
        sick,
        inputs.sick_balance,
        excess_sick,
        daily_rate,
        sick_deduction_raw,
    ));

    // Extra days present.
    let present = Decimal::from(counts.present);
    let extra_days =
        checked_sub(present, inputs.working_days, "extra days")?.max(Decimal::ZERO);
    let bonus_raw = checked_mul(extra_days, daily_rate, "extra days credit")?;
    audit_trace.push(AuditStep {
        step_number: 4,
        rule_id: "extra_days_credit".to_string(),
        rule_name: "Extra Days Credit".to_string(),
        input: serde_json::json!({
            "present": counts.present,
            "working_days": inputs.working_days.normalize().to_string(),
        }),
        output: serde_json::json!({
            "extra_days": extra_days.normalize().to_string(),
            "bonus": round_currency(bonus_raw).to_string(),
        }),
        reasoning: if extra_days > Decimal::ZERO {
            format!(
                "{} days present exceeds {} working days by {}",
                counts.present,
                inputs.working_days.normalize(),
                extra_days.normalize()
            )
        } else {
            format!(
                "{} days present does not exceed {} working days",
                counts.present,
                inputs.working_days.normalize()
            )
        },
    });

    // Net salary.
    let net_raw = [
        inputs.deduction_before_leave,
        casual_deduction_raw,
        sick_deduction_raw,
        half_day_deduction_raw,
    ]
    .into_iter()
    .try_fold(inputs.gross, |net, deduction| net.checked_sub(deduction))
    .and_then(|net| net.checked_add(bonus_raw))
    .ok_or_else(|| overflow("net salary"))?;
    let net_salary = round_currency(net_raw);
    audit_trace.push(AuditStep {
        step_number: 5,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross": inputs.gross.normalize().to_string(),
            "deduction_before_leave": inputs.deduction_before_leave.normalize().to_string(),
            "casual_deduction": casual_deduction_raw.normalize().to_string(),
            "sick_deduction": sick_deduction_raw.normalize().to_string(),
            "half_day_deduction": half_day_deduction_raw.normalize().to_string(),
            "bonus": bonus_raw.normalize().to_string(),
        }),
        output: serde_json::json!({
            "net_salary": net_salary.to_string(),
        }),
        reasoning: format!(
            "${} - ${} - ${} - ${} - ${} + ${} = ${}",
            inputs.gross.normalize(),
            inputs.deduction_before_leave.normalize(),
            round_currency(casual_deduction_raw),
            round_currency(sick_deduction_raw),
            round_currency(half_day_deduction_raw),
            round_currency(bonus_raw),
            net_salary
        ),
    });

    Ok(PayrollResult {
        serial: 0,
        row_index,
        name: inputs.name.clone(),
        counts,
        half_day_policy: policy,
        adjusted_casual,
        excess_casual,
        excess_sick,
        extra_days,
        gross: inputs.gross,
        deduction_before_leave: inputs.deduction_before_leave,
        daily_rate,
        casual_deduction: round_currency(casual_deduction_raw),
        sick_deduction: round_currency(sick_deduction_raw),
        half_day_deduction: round_currency(half_day_deduction_raw),
        bonus: round_currency(bonus_raw),
        net_salary,
        audit_trace,
    })
}

#[allow(clippy::too_many_arguments)]
fn excess_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    taken: Decimal,
    balance: Decimal,
    excess: Decimal,
    daily_rate: Decimal,
    deduction: Decimal,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "taken": taken.normalize().to_string(),
            "balance": balance.normalize().to_string(),
        }),
        output: serde_json::json!({
            "excess": excess.normalize().to_string(),
            "deduction": round_currency(deduction).to_string(),
        }),
        reasoning: if excess > Decimal::ZERO {
            format!(
                "{} taken exceeds balance of {} by {}; {} x ${} = ${}",
                taken.normalize(),
                balance.normalize(),
                excess.normalize(),
                excess.normalize(),
                daily_rate.round_dp(2),
                round_currency(deduction)
            )
        } else {
            format!(
                "{} taken is within balance of {}, no deduction",
                taken.normalize(),
                balance.normalize()
            )
        },
    }
}

/// Runs the full payroll pipeline over an attendance sheet.
///
/// Builds employee records with the template, tabulates attendance, and
/// derives payroll for each record in sheet order. With
/// `drop_inactive_rows` set on the template, employees without any
/// attendance code are dropped before their policy fields are read.
/// Records that fail are collected as row errors; the rest still come
/// through. Serial numbers are assigned to the surviving results.
///
/// `policy_override` replaces the template's half-day policy when given.
pub fn run_payroll(
    rows: &[RawRow],
    template: &SheetTemplate,
    policy_override: Option<HalfDayPolicy>,
) -> PayrollReport {
    let policy = policy_override.unwrap_or(template.half_day_policy);
    let mut report = PayrollReport::default();

    for record in build_employee_records(rows, template) {
        let counts = tabulate_attendance(&record);

        if template.drop_inactive_rows && counts.is_empty() {
            report.inactive_dropped += 1;
            continue;
        }

        let derived = resolve_policy_inputs(&record, template)
            .and_then(|inputs| derive_payroll(record.row_index, &inputs, counts, policy));

        match derived {
            Ok(result) => report.results.push(result),
            Err(err) => {
                warn!(row_index = record.row_index, error = %err, "Payroll derivation failed");
                report.errors.push(RowError::new(record.row_index, &err));
            }
        }
    }

    for (serial, result) in (1..).zip(report.results.iter_mut()) {
        result.serial = serial;
    }

    debug!(
        template = %template.code,
        results = report.results.len(),
        dropped = report.inactive_dropped,
        errors = report.errors.len(),
        "Derived payroll"
    );

    report
}
