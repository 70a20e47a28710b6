//! Attendance sheet models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::CellValue;

/// One data row of an attendance sheet keyed by header label.
///
/// Day columns and policy columns (salary, leave balances) share the same
/// mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Zero-based index of the source row in the sheet.
    pub row_index: usize,
    /// Cell values keyed by header label.
    pub fields: HashMap<String, CellValue>,
}

impl EmployeeRecord {
    /// Creates an empty record for the given source row.
    pub fn new(row_index: usize) -> Self {
        Self {
            row_index,
            fields: HashMap::new(),
        }
    }

    /// Builds a record from label/value pairs. Later duplicates win.
    pub fn from_pairs<K, V, I>(row_index: usize, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut record = Self::new(row_index);
        for (label, value) in pairs {
            record.insert(label, value);
        }
        record
    }

    /// Sets the value for a header label, replacing any previous value.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(label.into(), value.into());
    }

    /// Returns the value under a header label.
    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.fields.get(label)
    }

    /// Iterates over every value in the record, in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.fields.values()
    }
}

/// Occurrence counts of attendance codes for one employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCounts {
    /// Days marked `P` or `WFH`.
    pub present: u32,
    /// Days marked `HD`.
    pub half: u32,
    /// Days marked `CL`, before half-day conversion.
    pub casual_raw: u32,
    /// Days marked `SL`.
    pub sick: u32,
}

impl AttendanceCounts {
    /// Returns true if no attendance code was found at all.
    pub fn is_empty(&self) -> bool {
        self.present == 0 && self.half == 0 && self.casual_raw == 0 && self.sick == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_later_duplicates_win() {
        let record = EmployeeRecord::from_pairs(3, [("NAME", "Alice"), ("NAME", "Bob")]);
        assert_eq!(record.row_index, 3);
        assert_eq!(record.get("NAME"), Some(&CellValue::from("Bob")));
        assert_eq!(record.fields.len(), 1);
    }

    #[test]
    fn test_get_missing_label() {
        let record = EmployeeRecord::new(0);
        assert!(record.get("Gross").is_none());
    }

    #[test]
    fn test_counts_is_empty() {
        assert!(AttendanceCounts::default().is_empty());
        let counts = AttendanceCounts {
            half: 1,
            ..Default::default()
        };
        assert!(!counts.is_empty());
    }
}
