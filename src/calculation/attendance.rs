//! Attendance code tabulation.
//!
//! Counts how often each attendance code appears in an employee record.
//! The count is a multiset count over every value of the record, so the
//! order of day columns never matters.

use serde::{Deserialize, Serialize};

use crate::models::{AttendanceCounts, CellValue, EmployeeRecord};

/// The fixed set of attendance codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceCode {
    /// `P`: present in office.
    #[serde(rename = "P")]
    Present,
    /// `WFH`: working from home, counted as present.
    #[serde(rename = "WFH")]
    WorkFromHome,
    /// `CL`: casual leave.
    #[serde(rename = "CL")]
    CasualLeave,
    /// `SL`: sick leave.
    #[serde(rename = "SL")]
    SickLeave,
    /// `HD`: half day.
    #[serde(rename = "HD")]
    HalfDay,
}

impl AttendanceCode {
    /// All attendance codes.
    pub const ALL: [AttendanceCode; 5] = [
        AttendanceCode::Present,
        AttendanceCode::WorkFromHome,
        AttendanceCode::CasualLeave,
        AttendanceCode::SickLeave,
        AttendanceCode::HalfDay,
    ];

    /// Returns the code as written in attendance sheets.
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceCode::Present => "P",
            AttendanceCode::WorkFromHome => "WFH",
            AttendanceCode::CasualLeave => "CL",
            AttendanceCode::SickLeave => "SL",
            AttendanceCode::HalfDay => "HD",
        }
    }

    /// Matches a cell text against the code set, exactly and case-sensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use report_engine::calculation::AttendanceCode;
    ///
    /// assert_eq!(AttendanceCode::from_code("WFH"), Some(AttendanceCode::WorkFromHome));
    /// assert_eq!(AttendanceCode::from_code("wfh"), None);
    /// assert_eq!(AttendanceCode::from_code("A"), None);
    /// ```
    pub fn from_code(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == text)
    }

    /// Matches a cell against the code set. Only text cells can match.
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        cell.as_str().and_then(Self::from_code)
    }
}

/// Counts attendance codes over a sequence of cell values.
///
/// Values outside the code set (names, salaries, blanks, unknown codes)
/// are skipped.
pub fn tabulate_values<'a, I>(values: I) -> AttendanceCounts
where
    I: IntoIterator<Item = &'a CellValue>,
{
    values
        .into_iter()
        .filter_map(AttendanceCode::from_cell)
        .fold(AttendanceCounts::default(), |mut counts, code| {
            match code {
                AttendanceCode::Present | AttendanceCode::WorkFromHome => counts.present += 1,
                AttendanceCode::CasualLeave => counts.casual_raw += 1,
                AttendanceCode::SickLeave => counts.sick += 1,
                AttendanceCode::HalfDay => counts.half += 1,
            }
            counts
        })
}

/// Counts attendance codes over every field of an employee record.
///
/// All fields are scanned, not just day columns, because policy headers
/// share the same mapping. Non-day headers must therefore never hold a
/// value from the code set.
///
/// # Example
///
/// ```
/// use report_engine::calculation::tabulate_attendance;
/// use report_engine::models::{CellValue, EmployeeRecord};
///
/// let record = EmployeeRecord::from_pairs(
///     3,
///     [
///         ("NAME", CellValue::from("Alice")),
///         ("1", CellValue::from("P")),
///         ("2", CellValue::from("WFH")),
///         ("3", CellValue::from("HD")),
///         ("Gross", CellValue::from(31000)),
///     ],
/// );
///
/// let counts = tabulate_attendance(&record);
/// assert_eq!(counts.present, 2);
/// assert_eq!(counts.half, 1);
/// ```
pub fn tabulate_attendance(record: &EmployeeRecord) -> AttendanceCounts {
    tabulate_values(record.values())
}
