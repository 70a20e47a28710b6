//! Report engine for time-tracking and attendance sheets.
//!
//! This crate turns flat spreadsheet exports into structured reports:
//! per-person task rosters with rolled-up time totals from level-tagged
//! task sheets, per-employee payroll figures from daily attendance codes,
//! and time-based issue reports from tracker CSV exports. Every report is
//! flattened once into a display table shared by the JSON, CSV, XLSX and PDF
//! outputs.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
