//! Building employee records from attendance sheets.

use crate::config::SheetTemplate;
use crate::models::{EmployeeRecord, RawRow};

/// Pairs the template's header row with each data row.
///
/// Each data row from `data_start_index` on becomes one [`EmployeeRecord`],
/// keyed by the trimmed header text of its column. Columns with a blank
/// header are left out, cells missing at the end of a short row read as
/// empty, and a later duplicate header overwrites an earlier one. Rows
/// whose cells are all blank are not records. A sheet too short to have a
/// header row yields no records.
///
/// # Example
///
/// ```
/// use report_engine::calculation::build_employee_records;
/// use report_engine::config::SheetTemplate;
/// use report_engine::models::{CellValue, RawRow};
///
/// let template: SheetTemplate = serde_yaml::from_str(
///     "code: t\nname: T\nheader_row_index: 0\ndata_start_index: 1\nfield_aliases: {}\n",
/// )
/// .unwrap();
/// let rows = vec![
///     RawRow::from(vec!["NAME".into(), "1".into()]),
///     RawRow::from(vec!["Alice".into(), "P".into()]),
/// ];
///
/// let records = build_employee_records(&rows, &template);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].get("1"), Some(&CellValue::from("P")));
/// ```
pub fn build_employee_records(rows: &[RawRow], template: &SheetTemplate) -> Vec<EmployeeRecord> {
    let Some(header_row) = rows.get(template.header_row_index) else {
        return Vec::new();
    };

    let headers: Vec<(usize, String)> = header_row
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.is_blank())
        .map(|(column, cell)| (column, cell.as_text().trim().to_string()))
        .collect();

    rows.iter()
        .enumerate()
        .skip(template.data_start_index)
        .filter(|(_, row)| !row.cells().iter().all(|cell| cell.is_blank()))
        .map(|(row_index, row)| {
            EmployeeRecord::from_pairs(
                row_index,
                headers
                    .iter()
                    .map(|(column, label)| (label.clone(), row.cell(*column).clone())),
            )
        })
        .collect()
}
