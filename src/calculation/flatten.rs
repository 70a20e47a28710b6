//! Flattening of report records into a display table.
//!
//! Every output sink (JSON `table`, CSV, XLSX, PDF) renders the same
//! [`DisplayTable`], built once here. A subject value equal to the previous
//! record's subject is blanked in the table; the records keep it.

use rust_decimal::Decimal;

use crate::models::{DisplayRow, DisplayTable, PayrollResult, ReportRecord, TimeReportEntry};

/// A record type that can be laid out as one display row.
pub trait Tabular {
    /// Column headers, in cell order.
    const HEADERS: &'static [&'static str];

    /// Index of the column holding the subject, if the table de-duplicates one.
    const SUBJECT_COLUMN: Option<usize>;

    /// The real subject value of this record, or "" if it has none.
    fn subject(&self) -> &str {
        ""
    }

    /// Indexes of the columns that always hold a number or nothing.
    const NUMERIC_COLUMNS: &'static [usize] = &[];

    /// Cell texts, one per header.
    fn cells(&self) -> Vec<String>;

    /// Whether sinks should highlight this row.
    fn emphasized(&self) -> bool {
        false
    }
}

/// Lays out records as a display table, blanking repeated subjects.
///
/// # Example
///
/// ```
/// use report_engine::calculation::flatten;
/// use report_engine::models::ReportRecord;
///
/// let records = vec![
///     ReportRecord::Summary { serial: 1, name: "Alice".into(), total: "1h 0m".into() },
///     ReportRecord::Summary { serial: 2, name: "Alice".into(), total: "2h 0m".into() },
///     ReportRecord::Summary { serial: 3, name: "Bob".into(), total: "0h 30m".into() },
/// ];
///
/// let table = flatten(&records);
/// let names: Vec<&str> = table.rows.iter().map(|r| r.cells[1].as_str()).collect();
/// assert_eq!(names, vec!["Alice", "", "Bob"]);
/// ```
pub fn flatten<T: Tabular>(records: &[T]) -> DisplayTable {
    let mut rows = Vec::with_capacity(records.len());
    let mut previous: Option<&str> = None;

    for record in records {
        let mut cells = record.cells();

        if let Some(column) = T::SUBJECT_COLUMN {
            let subject = record.subject();
            if !subject.is_empty() && previous == Some(subject) {
                if let Some(cell) = cells.get_mut(column) {
                    cell.clear();
                }
            }
            previous = Some(subject);
        }

        rows.push(DisplayRow {
            cells,
            emphasized: record.emphasized(),
        });
    }

    DisplayTable {
        headers: T::HEADERS.iter().map(|h| h.to_string()).collect(),
        rows,
        numeric_columns: T::NUMERIC_COLUMNS.to_vec(),
    }
}

impl Tabular for ReportRecord {
    const HEADERS: &'static [&'static str] = &[
        "S.No",
        "Resource Name",
        "Tasks",
        "Jira Id",
        "Time Utilized",
        "Status",
    ];
    const SUBJECT_COLUMN: Option<usize> = Some(1);
    const NUMERIC_COLUMNS: &'static [usize] = &[0];

    fn subject(&self) -> &str {
        match self {
            ReportRecord::Summary { name, .. } => name,
            ReportRecord::Task(_) | ReportRecord::Separator => "",
        }
    }

    fn cells(&self) -> Vec<String> {
        match self {
            ReportRecord::Summary {
                serial,
                name,
                total,
            } => vec![
                serial.to_string(),
                name.clone(),
                String::new(),
                String::new(),
                total.clone(),
                String::new(),
            ],
            ReportRecord::Task(task) => vec![
                String::new(),
                String::new(),
                task.label.clone(),
                task.external_id.clone().unwrap_or_default(),
                task.duration.clone(),
                task.status.clone(),
            ],
            ReportRecord::Separator => vec![String::new(); Self::HEADERS.len()],
        }
    }

    fn emphasized(&self) -> bool {
        matches!(self, ReportRecord::Summary { .. })
    }
}

fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

impl Tabular for PayrollResult {
    const HEADERS: &'static [&'static str] = &[
        "S.No",
        "Name",
        "Days Present",
        "Half Days",
        "Casual Leaves Taken",
        "Sick Leaves Taken",
        "Excess CL",
        "Excess SL",
        "Gross Salary",
        "Deduction",
        "CL LOP",
        "SL LOP",
        "HD LOP",
        "OT Days",
        "Extra Pay",
        "Net Salary",
    ];
    const SUBJECT_COLUMN: Option<usize> = Some(1);
    const NUMERIC_COLUMNS: &'static [usize] = &[0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

    fn subject(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.serial.to_string(),
            self.name.clone(),
            self.counts.present.to_string(),
            self.counts.half.to_string(),
            amount(self.adjusted_casual),
            self.counts.sick.to_string(),
            amount(self.excess_casual),
            amount(self.excess_sick),
            amount(self.gross),
            amount(self.deduction_before_leave),
            amount(self.casual_deduction),
            amount(self.sick_deduction),
            amount(self.half_day_deduction),
            amount(self.extra_days),
            amount(self.bonus),
            amount(self.net_salary),
        ]
    }
}

impl Tabular for TimeReportEntry {
    const HEADERS: &'static [&'static str] = &[
        "Assignee",
        "Project",
        "Summary",
        "Status",
        "Due Date",
        "Original Estimated",
        "Time Spent",
    ];
    const SUBJECT_COLUMN: Option<usize> = None;

    fn cells(&self) -> Vec<String> {
        vec![
            self.assignee.clone(),
            self.project.clone(),
            self.summary.clone(),
            self.status.clone(),
            self.due_date.clone(),
            self.original_estimate.clone(),
            self.time_spent.clone(),
        ]
    }
}
