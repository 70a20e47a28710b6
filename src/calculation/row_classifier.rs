//! Row classification for task sheets.

use crate::models::{Level, RawRow};

/// Column holding the level indicator.
pub const LEVEL_COLUMN: usize = 0;

/// Reads the level indicator of a task sheet row.
///
/// The level cell must be a number exactly equal to 0, 1 or 2. Anything
/// else (text, fractions, other numbers, an empty cell) returns `None`,
/// meaning the row is ignored.
///
/// # Examples
///
/// ```
/// use report_engine::calculation::classify_row;
/// use report_engine::models::{CellValue, Level, RawRow};
///
/// let row = RawRow::from(vec![CellValue::from(1), "Fix bug".into()]);
/// assert_eq!(classify_row(&row), Some(Level::Item));
///
/// let row = RawRow::from(vec![CellValue::from("1"), "Fix bug".into()]);
/// assert_eq!(classify_row(&row), None);
/// ```
pub fn classify_row(row: &RawRow) -> Option<Level> {
    match row.cell(LEVEL_COLUMN).as_integer()? {
        0 => Some(Level::Subject),
        1 => Some(Level::Item),
        2 => Some(Level::Annotation),
        _ => None,
    }
}
