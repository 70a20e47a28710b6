//! Time-based report reader for issue-tracker CSV exports.
//!
//! The export carries one issue per line. Columns are located by header
//! label, case-insensitively, and the two duration columns hold seconds.

use std::io;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult, RowError};
use crate::models::{TimeReport, TimeReportEntry};

use super::time_arithmetic::format_seconds;

/// Output columns and the header labels accepted for each, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeColumn {
    Assignee,
    Project,
    Summary,
    Status,
    DueDate,
    OriginalEstimate,
    TimeSpent,
}

impl TimeColumn {
    const ALL: [TimeColumn; 7] = [
        TimeColumn::Assignee,
        TimeColumn::Project,
        TimeColumn::Summary,
        TimeColumn::Status,
        TimeColumn::DueDate,
        TimeColumn::OriginalEstimate,
        TimeColumn::TimeSpent,
    ];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            TimeColumn::Assignee => &["assignee"],
            TimeColumn::Project => &["project name"],
            TimeColumn::Summary => &["summary"],
            TimeColumn::Status => &["status"],
            TimeColumn::DueDate => &["due date"],
            TimeColumn::OriginalEstimate => &["σ original estimate", "original estimate"],
            TimeColumn::TimeSpent => &["σ time spent", "time spent"],
        }
    }
}

/// Column positions for each output field, in alias priority order.
#[derive(Debug, Default)]
struct HeaderMap {
    positions: [Vec<usize>; 7],
}

impl HeaderMap {
    fn new(headers: &StringRecord) -> Self {
        let labels: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        let mut map = HeaderMap::default();
        for column in TimeColumn::ALL {
            for alias in column.aliases() {
                map.positions[column as usize].extend(
                    labels
                        .iter()
                        .enumerate()
                        .filter(|(_, label)| label.as_str() == *alias)
                        .map(|(i, _)| i),
                );
            }
        }
        map
    }

    /// Returns the first non-empty value for a column, or "".
    fn value<'r>(&self, record: &'r StringRecord, column: TimeColumn) -> &'r str {
        self.positions[column as usize]
            .iter()
            .filter_map(|&i| record.get(i))
            .map(str::trim)
            .find(|v| !v.is_empty())
            .unwrap_or("")
    }
}

/// Converts a seconds cell into `"{h}h {m}m"`.
///
/// Empty input gives an empty string. Fractional seconds are truncated.
fn seconds_cell(value: &str) -> EngineResult<String> {
    if value.is_empty() {
        return Ok(String::new());
    }

    if let Ok(seconds) = value.parse::<u64>() {
        return Ok(format_seconds(seconds));
    }

    match value.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => {
            Ok(format_seconds(seconds.trunc() as u64))
        }
        _ => Err(EngineError::ParseError {
            value: value.to_string(),
            message: "expected a non-negative number of seconds".to_string(),
        }),
    }
}

fn read_entry(headers: &HeaderMap, record: &StringRecord) -> EngineResult<TimeReportEntry> {
    Ok(TimeReportEntry {
        assignee: headers.value(record, TimeColumn::Assignee).to_string(),
        project: headers.value(record, TimeColumn::Project).to_string(),
        summary: headers.value(record, TimeColumn::Summary).to_string(),
        status: headers.value(record, TimeColumn::Status).to_string(),
        due_date: headers.value(record, TimeColumn::DueDate).to_string(),
        original_estimate: seconds_cell(headers.value(record, TimeColumn::OriginalEstimate))?,
        time_spent: seconds_cell(headers.value(record, TimeColumn::TimeSpent))?,
    })
}

/// Reads a time-based report from CSV.
///
/// The first line is the header. Row indices in errors count data lines
/// from zero. A row that cannot be read is reported and left out; the rest
/// of the file is still read.
///
/// # Errors
///
/// Returns [`EngineError::MalformedCsv`] if the header line cannot be read.
///
/// # Example
///
/// ```
/// use report_engine::calculation::read_time_report;
///
/// let csv = "Assignee,Project name,Summary,Status,Due date,Original Estimate,Time Spent\n\
///            Alice,Core,Fix login,Done,2024-10-01,7200,5400\n";
/// let report = read_time_report(csv.as_bytes()).unwrap();
///
/// assert_eq!(report.entries[0].original_estimate, "2h 0m");
/// assert_eq!(report.entries[0].time_spent, "1h 30m");
/// ```
pub fn read_time_report<R: io::Read>(reader: R) -> EngineResult<TimeReport> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map(HeaderMap::new)
        .map_err(|e| EngineError::MalformedCsv {
            message: e.to_string(),
        })?;

    let mut report = TimeReport::default();
    for (row_index, result) in csv_reader.records().enumerate() {
        let entry = result
            .map_err(|e| EngineError::MalformedCsv {
                message: e.to_string(),
            })
            .and_then(|record| read_entry(&headers, &record));

        match entry {
            Ok(entry) => report.entries.push(entry),
            Err(err) => {
                warn!(row_index, error = %err, "Skipping unreadable time report row");
                report.errors.push(RowError::new(row_index, &err));
            }
        }
    }

    debug!(
        entries = report.entries.len(),
        errors = report.errors.len(),
        "Read time report"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Assignee,Project name,Summary,Status,Due date,Σ Original Estimate,Σ Time Spent";

    fn read(body: &str) -> TimeReport {
        read_time_report(body.as_bytes()).unwrap()
    }

    #[test]
    fn test_reads_entries_in_file_order() {
        let report = read(&format!(
            "{HEADER}\nAlice,Core,Fix login,Done,2024-10-01,7200,5400\nBob,Web,Add page,Open,,3600,60\n"
        ));

        assert_eq!(report.entries.len(), 2);
        assert!(report.errors.is_empty());

        let alice = &report.entries[0];
        assert_eq!(alice.assignee, "Alice");
        assert_eq!(alice.project, "Core");
        assert_eq!(alice.summary, "Fix login");
        assert_eq!(alice.status, "Done");
        assert_eq!(alice.due_date, "2024-10-01");
        assert_eq!(alice.original_estimate, "2h 0m");
        assert_eq!(alice.time_spent, "1h 30m");

        let bob = &report.entries[1];
        assert_eq!(bob.due_date, "");
        assert_eq!(bob.time_spent, "0h 1m");
    }

    #[test]
    fn test_headers_match_case_insensitively() {
        let report = read(
            "assignee,PROJECT NAME,summary,status,due date,original estimate,time spent\n\
             Alice,Core,Fix,Done,2024-10-01,3600,1800\n",
        );

        let entry = &report.entries[0];
        assert_eq!(entry.assignee, "Alice");
        assert_eq!(entry.project, "Core");
        assert_eq!(entry.original_estimate, "1h 0m");
        assert_eq!(entry.time_spent, "0h 30m");
    }

    #[test]
    fn test_sigma_column_takes_priority() {
        let report = read(
            "Assignee,Σ Time Spent,Time Spent\nAlice,7200,3600\nBob,,3600\n",
        );

        assert_eq!(report.entries[0].time_spent, "2h 0m");
        // Falls back when the preferred column is empty.
        assert_eq!(report.entries[1].time_spent, "1h 0m");
    }

    #[test]
    fn test_empty_seconds_yield_empty_duration() {
        let report = read(&format!("{HEADER}\nAlice,Core,Fix,Done,,,0\n"));

        assert_eq!(report.entries[0].original_estimate, "");
        assert_eq!(report.entries[0].time_spent, "0h 0m");
    }

    #[test]
    fn test_leftover_seconds_are_dropped() {
        let report = read(&format!("{HEADER}\nAlice,Core,Fix,Done,,3659,59\n"));

        assert_eq!(report.entries[0].original_estimate, "1h 0m");
        assert_eq!(report.entries[0].time_spent, "0h 0m");
    }

    #[test]
    fn test_non_numeric_seconds_fail_only_that_row() {
        let report = read(&format!(
            "{HEADER}\nAlice,Core,Fix,Done,,abc,60\nBob,Web,Add,Open,,60,60\n"
        ));

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].assignee, "Bob");
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].row_index, 0);
        assert_eq!(report.errors[0].code, "PARSE_ERROR");
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let report = read(&format!("{HEADER}\nAlice,Core\n"));

        let entry = &report.entries[0];
        assert_eq!(entry.assignee, "Alice");
        assert_eq!(entry.summary, "");
        assert_eq!(entry.time_spent, "");
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let report = read("Key,Assignee,Labels\nCORE-1,Alice,urgent\n");

        assert_eq!(report.entries[0].assignee, "Alice");
        assert_eq!(report.entries[0].project, "");
    }

    #[test]
    fn test_fractional_seconds_are_truncated() {
        assert_eq!(seconds_cell("5400.9").unwrap(), "1h 30m");
        assert!(seconds_cell("-60").is_err());
    }

    #[test]
    fn test_empty_input_reads_as_empty_report() {
        let report = read("");
        assert!(report.entries.is_empty());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_invalid_utf8_header_is_malformed() {
        let bytes: &[u8] = &[0xff, 0xfe, b',', b'a', b'\n'];
        match read_time_report(bytes) {
            Err(EngineError::MalformedCsv { .. }) => {}
            other => panic!("Expected MalformedCsv error, got {:?}", other),
        }
    }
}
