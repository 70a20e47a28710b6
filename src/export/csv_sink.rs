//! CSV sink.

use std::io;

use crate::error::EngineResult;
use crate::models::DisplayTable;

use super::export_error;

/// Writes a display table as CSV: the header line, then one line per row.
pub fn write_csv<W: io::Write>(table: &DisplayTable, writer: W) -> EngineResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(&table.headers).map_err(export_error)?;
    for row in &table.rows {
        wtr.write_record(&row.cells).map_err(export_error)?;
    }

    wtr.flush().map_err(export_error)?;
    Ok(())
}

/// Renders a display table as CSV bytes.
pub fn csv_bytes(table: &DisplayTable) -> EngineResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}
