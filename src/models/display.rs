//! The flattened, presentation-ready table shared by every output sink.

use serde::{Deserialize, Serialize};

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Cell texts in column order.
    pub cells: Vec<String>,
    /// Whether sinks should highlight this row (subject totals).
    pub emphasized: bool,
}

/// A flattened report: fixed headers and ordered display rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Rows in output order.
    pub rows: Vec<DisplayRow>,
    /// Indexes of the columns whose non-empty cells are numbers.
    #[serde(default)]
    pub numeric_columns: Vec<usize>,
}

impl DisplayTable {
    /// Returns the number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if cells of the column should be written as numbers.
    pub fn is_numeric(&self, column: usize) -> bool {
        self.numeric_columns.contains(&column)
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
