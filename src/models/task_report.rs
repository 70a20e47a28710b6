//! Hierarchical task report models.
//!
//! A task sheet is a flat list of level-tagged rows. The aggregator folds it
//! into subject groups and emits an ordered list of [`ReportRecord`]s.

use serde::{Deserialize, Serialize};

use crate::error::RowError;

/// The grouping level of a task sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Level 0: starts a new subject (a person).
    Subject,
    /// Level 1: a task under the current subject.
    Item,
    /// Level 2: the status of the most recent task.
    Annotation,
}

impl Level {
    /// Returns the numeric level indicator used in sheets.
    pub fn value(self) -> u8 {
        match self {
            Level::Subject => 0,
            Level::Item => 1,
            Level::Annotation => 2,
        }
    }
}

/// A task recorded under a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    /// The task label.
    pub label: String,
    /// The external issue identifier, if the sheet carries one.
    pub external_id: Option<String>,
    /// The duration text exactly as it appeared in the sheet.
    pub duration: String,
    /// False when the duration could not be parsed and was left out of the total.
    pub duration_parsed: bool,
    /// The status, filled in by a later annotation row.
    pub status: String,
}

/// The subject group currently being built.
///
/// Hours and minutes accumulate independently and are only normalized when
/// the group is finalized, so `minutes` may exceed 59 here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectGroup {
    /// The subject name.
    pub name: String,
    /// Accumulated whole hours.
    pub hours: i64,
    /// Accumulated minutes, unnormalized.
    pub minutes: i64,
    /// Tasks in arrival order.
    pub tasks: Vec<TaskEntry>,
}

/// A closed subject group with its serial number and formatted total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedGroup {
    /// Serial number, assigned in order of first appearance starting at 1.
    pub serial: u32,
    /// The subject name.
    pub name: String,
    /// The normalized total, formatted as `"{h}h {m}m"`.
    pub total: String,
    /// Tasks in arrival order.
    pub tasks: Vec<TaskEntry>,
}

impl FinalizedGroup {
    /// Emits the summary record, one record per task, then a blank separator.
    pub fn into_records(self) -> Vec<ReportRecord> {
        let mut records = Vec::with_capacity(self.tasks.len() + 2);
        records.push(ReportRecord::Summary {
            serial: self.serial,
            name: self.name,
            total: self.total,
        });
        records.extend(self.tasks.into_iter().map(ReportRecord::Task));
        records.push(ReportRecord::Separator);
        records
    }
}

/// A record emitted by the task aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportRecord {
    /// The per-subject summary line.
    Summary {
        /// Serial number of the subject.
        serial: u32,
        /// The subject name.
        name: String,
        /// The formatted total time.
        total: String,
    },
    /// One task under the preceding summary.
    Task(TaskEntry),
    /// A blank line closing a subject group.
    Separator,
}

/// Why a row contributed nothing to the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The level cell is not exactly 0, 1 or 2.
    UnrecognizedLevel,
    /// A subject row with an empty name.
    EmptySubjectName,
    /// An item or annotation row arrived while no named subject was open.
    NoOpenSubject,
    /// An annotation row arrived before any task in the current subject.
    AnnotationWithoutTask,
}

/// A skipped row and the reason it was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Zero-based index of the row in the input sheet.
    pub row_index: usize,
    /// Why the row was skipped.
    pub reason: SkipReason,
}

/// The full output of aggregating a task sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReport {
    /// Emitted records in output order.
    pub records: Vec<ReportRecord>,
    /// Rows that contributed nothing.
    pub skipped: Vec<SkippedRow>,
    /// Rows that failed; their tasks are still present with `duration_parsed == false`.
    pub errors: Vec<RowError>,
}

impl TaskReport {
    /// Returns the number of summary records.
    pub fn subject_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, ReportRecord::Summary { .. }))
            .count()
    }
}
