//! Sheet cell and raw row models.
//!
//! Spreadsheet readers hand the engine a sheet as an ordered list of rows,
//! each row an ordered list of mixed text/number cells addressed by position.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// A single cell value as delivered by a sheet reader.
///
/// In JSON a cell is `null`, a number, or a string.
///
/// # Example
///
/// ```
/// use report_engine::models::CellValue;
///
/// let cell: CellValue = serde_json::from_str("31000").unwrap();
/// assert_eq!(cell.as_text(), "31000");
/// assert!(CellValue::Empty.is_blank());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// An absent or null cell.
    #[default]
    Empty,
    /// A numeric cell.
    Number(f64),
    /// A text cell.
    Text(String),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// Returns true for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(_) => false,
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Renders the cell as display text.
    ///
    /// Integral numbers are printed without a fractional part.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Returns the exact text of a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the value of a numeric cell holding a whole number.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
            _ => None,
        }
    }

    /// Interprets the cell as a decimal amount.
    ///
    /// Numeric cells convert directly; text cells are parsed after trimming.
    /// Empty cells and non-numeric text yield `None`.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => Decimal::from_f64(*n),
            CellValue::Text(s) => Decimal::from_str(s.trim()).ok(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

/// One row of an input sheet.
///
/// Cells beyond the end of the row read as [`CellValue::Empty`].
///
/// # Example
///
/// ```
/// use report_engine::models::{CellValue, RawRow};
///
/// let row = RawRow::from(vec![CellValue::from(1), "Fix bug".into()]);
/// assert_eq!(row.cell(1).as_text(), "Fix bug");
/// assert_eq!(row.cell(3), &CellValue::Empty);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(Vec<CellValue>);

impl RawRow {
    /// Creates a row from its cells.
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self(cells)
    }

    /// Returns the cell at `index`, or an empty cell past the end of the row.
    pub fn cell(&self, index: usize) -> &CellValue {
        self.0.get(index).unwrap_or(&EMPTY_CELL)
    }

    /// Returns all cells in order.
    pub fn cells(&self) -> &[CellValue] {
        &self.0
    }

    /// Returns the number of cells physically present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<CellValue>> for RawRow {
    fn from(cells: Vec<CellValue>) -> Self {
        Self(cells)
    }
}
