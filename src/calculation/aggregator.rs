//! Hierarchical aggregation of task sheets.
//!
//! A task sheet lists a subject (person) row, then that subject's task rows,
//! each optionally followed by a status row. The [`TaskAggregator`] is a
//! finite-state accumulator threaded by value through a fold: every step
//! consumes the aggregator and one row, and returns the next aggregator
//! together with the group the row closed, if any.

use tracing::debug;

use crate::error::{EngineError, RowError};
use crate::models::{
    FinalizedGroup, Level, RawRow, SkipReason, SkippedRow, SubjectGroup, TaskEntry, TaskReport,
};

use super::row_classifier::classify_row;
use super::time_arithmetic::{accumulate, format_duration, normalize, parse_duration};

/// Column holding the subject name, task label or status text.
pub const VALUE_COLUMN: usize = 1;
/// Column holding the optional external issue identifier.
pub const EXTERNAL_ID_COLUMN: usize = 2;
/// Column holding the `"H:MM"` duration of a task.
pub const DURATION_COLUMN: usize = 3;

/// What happened to a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row was applied at the given level.
    Applied(Level),
    /// The row contributed nothing.
    Skipped(SkipReason),
    /// The row failed. For item rows the task is still recorded with its raw
    /// duration, but contributes nothing to the subject total.
    Failed(EngineError),
}

/// The result of feeding one row to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The group closed by this row, if any.
    pub closed: Option<FinalizedGroup>,
    /// What happened to the row itself.
    pub outcome: RowOutcome,
}

impl Step {
    fn applied(level: Level) -> Self {
        Self {
            closed: None,
            outcome: RowOutcome::Applied(level),
        }
    }

    fn skipped(reason: SkipReason) -> Self {
        Self {
            closed: None,
            outcome: RowOutcome::Skipped(reason),
        }
    }
}

/// Accumulator state for folding a task sheet into subject groups.
///
/// At most one subject group is open at a time. Serial numbers are handed
/// out as groups close, so they follow the order in which subjects first
/// appear.
///
/// # Example
///
/// ```
/// use report_engine::calculation::TaskAggregator;
/// use report_engine::models::{CellValue, RawRow};
///
/// let subject = RawRow::from(vec![CellValue::from(0), "Alice".into()]);
/// let item = RawRow::from(vec![
///     CellValue::from(1),
///     "Fix bug".into(),
///     "JIRA-1".into(),
///     "2:30".into(),
/// ]);
///
/// let (aggregator, _) = TaskAggregator::new().step(&subject);
/// let (aggregator, _) = aggregator.step(&item);
/// let group = aggregator.finish().unwrap();
///
/// assert_eq!(group.serial, 1);
/// assert_eq!(group.total, "2h 30m");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAggregator {
    current: Option<SubjectGroup>,
    next_serial: u32,
}

impl Default for TaskAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskAggregator {
    /// Creates an aggregator with no open group and serials starting at 1.
    pub fn new() -> Self {
        Self {
            current: None,
            next_serial: 1,
        }
    }

    /// Returns the currently open group.
    pub fn current(&self) -> Option<&SubjectGroup> {
        self.current.as_ref()
    }

    /// Feeds one row to the aggregator.
    pub fn step(mut self, row: &RawRow) -> (Self, Step) {
        let step = match classify_row(row) {
            None => Step::skipped(SkipReason::UnrecognizedLevel),
            Some(Level::Subject) => self.open_subject(row),
            Some(Level::Item) => self.push_item(row),
            Some(Level::Annotation) => self.annotate(row),
        };
        (self, step)
    }

    /// Closes the open group at end of input.
    pub fn finish(mut self) -> Option<FinalizedGroup> {
        self.close()
    }

    fn open_subject(&mut self, row: &RawRow) -> Step {
        let closed = self.close();
        let name_cell = row.cell(VALUE_COLUMN);

        let outcome = if name_cell.is_blank() {
            RowOutcome::Skipped(SkipReason::EmptySubjectName)
        } else {
            self.current = Some(SubjectGroup {
                name: name_cell.as_text(),
                ..Default::default()
            });
            RowOutcome::Applied(Level::Subject)
        };

        Step { closed, outcome }
    }

    fn push_item(&mut self, row: &RawRow) -> Step {
        let Some(group) = self.current.as_mut() else {
            return Step::skipped(SkipReason::NoOpenSubject);
        };

        let external_id = row.cell(EXTERNAL_ID_COLUMN);
        let duration = row.cell(DURATION_COLUMN).as_text();
        let totals = parse_duration(&duration).and_then(|(hours, minutes)| {
            let totals = accumulate(group.hours, group.minutes, hours, minutes)
                .and_then(|(h, m)| normalize(h, m).map(|_| (h, m)));
            totals.map_err(|err| EngineError::ParseError {
                value: duration.clone(),
                message: err.to_string(),
            })
        });

        group.tasks.push(TaskEntry {
            label: row.cell(VALUE_COLUMN).as_text(),
            external_id: (!external_id.is_blank()).then(|| external_id.as_text()),
            duration,
            duration_parsed: totals.is_ok(),
            status: String::new(),
        });

        match totals {
            Ok((hours, minutes)) => {
                (group.hours, group.minutes) = (hours, minutes);
                Step::applied(Level::Item)
            }
            Err(err) => Step {
                closed: None,
                outcome: RowOutcome::Failed(err),
            },
        }
    }

    fn annotate(&mut self, row: &RawRow) -> Step {
        let Some(group) = self.current.as_mut() else {
            return Step::skipped(SkipReason::NoOpenSubject);
        };
        let Some(task) = group.tasks.last_mut() else {
            return Step::skipped(SkipReason::AnnotationWithoutTask);
        };

        // Some exports put the status in the duration column instead.
        let value = row.cell(VALUE_COLUMN);
        task.status = if value.is_blank() {
            row.cell(DURATION_COLUMN).as_text()
        } else {
            value.as_text()
        };

        Step::applied(Level::Annotation)
    }

    fn close(&mut self) -> Option<FinalizedGroup> {
        let group = self.current.take()?;
        let serial = self.next_serial;
        self.next_serial += 1;

        // Item rows only keep totals that normalize.
        let (hours, minutes) =
            normalize(group.hours, group.minutes).unwrap_or((group.hours, group.minutes));

        Some(FinalizedGroup {
            serial,
            name: group.name,
            total: format_duration(hours, minutes),
            tasks: group.tasks,
        })
    }
}

/// Aggregates a complete task sheet into a report.
///
/// Rows are processed once, in order. Summary, task and separator records
/// come out in the order subjects first appear; the last open group is
/// flushed at end of input. Skipped and failed rows are reported alongside
/// the records and never stop processing.
///
/// # Example
///
/// ```
/// use report_engine::calculation::aggregate_task_sheet;
/// use report_engine::models::{CellValue, RawRow, ReportRecord};
///
/// let rows = vec![
///     RawRow::from(vec![CellValue::from(0), "Alice".into()]),
///     RawRow::from(vec![CellValue::from(1), "Fix bug".into(), "JIRA-1".into(), "2:30".into()]),
///     RawRow::from(vec![CellValue::from(2), "Done".into()]),
/// ];
///
/// let report = aggregate_task_sheet(&rows);
/// assert_eq!(report.records.len(), 3);
/// assert!(matches!(&report.records[0], ReportRecord::Summary { total, .. } if total == "2h 30m"));
/// ```
pub fn aggregate_task_sheet(rows: &[RawRow]) -> TaskReport {
    let (aggregator, mut report) = rows.iter().enumerate().fold(
        (TaskAggregator::new(), TaskReport::default()),
        |(aggregator, mut report), (row_index, row)| {
            let (aggregator, step) = aggregator.step(row);
            if let Some(group) = step.closed {
                report.records.extend(group.into_records());
            }
            match step.outcome {
                RowOutcome::Applied(_) => {}
                RowOutcome::Skipped(reason) => {
                    report.skipped.push(SkippedRow { row_index, reason })
                }
                RowOutcome::Failed(err) => report.errors.push(RowError::new(row_index, &err)),
            }
            (aggregator, report)
        },
    );

    if let Some(group) = aggregator.finish() {
        report.records.extend(group.into_records());
    }

    debug!(
        rows = rows.len(),
        subjects = report.subject_count(),
        skipped = report.skipped.len(),
        errors = report.errors.len(),
        "Aggregated task sheet"
    );

    report
}
