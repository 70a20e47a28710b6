//! Configuration loading and management for the report engine.
//!
//! This module provides functionality to load sheet templates from YAML
//! files. A template fixes the header row, the first data row, the half-day
//! policy, and the header labels of the policy columns for one attendance
//! sheet layout.
//!
//! # Example
//!
//! ```no_run
//! use report_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Default template: {}", config.default_template().unwrap().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineMetadata, SheetTemplate};
