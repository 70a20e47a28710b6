//! Output sinks for flattened report tables.
//!
//! Every sink consumes the same [`DisplayTable`](crate::models::DisplayTable)
//! produced by [`flatten`](crate::calculation::flatten), so the CSV file,
//! the spreadsheet, the PDF, and the JSON `table` always agree on blanked
//! subjects.

mod csv_sink;
mod pdf;
mod xlsx;

pub use csv_sink::{csv_bytes, write_csv};
pub use pdf::pdf_bytes;
pub use xlsx::xlsx_bytes;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The output format requested for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// A JSON envelope with records, table and diagnostics.
    #[default]
    Json,
    /// The display table as comma-separated values.
    Csv,
    /// The display table as an Excel workbook.
    Xlsx,
    /// The display table as a paginated PDF document.
    Pdf,
}

impl ExportFormat {
    /// Returns the lowercase name of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Returns the HTTP content type of the format.
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Returns the file extension of the format, without the dot.
    pub fn file_extension(self) -> &'static str {
        self.as_str()
    }
}

fn export_error<E: std::fmt::Display>(e: E) -> EngineError {
    EngineError::ExportError {
        message: e.to_string(),
    }
}
