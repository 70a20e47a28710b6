//! Configuration types for the report engine.
//!
//! These types map directly to the YAML structure of the configuration files.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::models::{HalfDayPolicy, PolicyField};

/// Engine metadata from engine.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name of this configuration set.
    pub name: String,
    /// Version of this configuration set.
    pub version: String,
    /// Template used when a request does not name one.
    pub default_template: String,
}

/// Layout and policy description of one attendance sheet template.
///
/// Source spreadsheets differ in where the header row sits, where data
/// starts, and how the policy columns are labelled.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetTemplate {
    /// Unique template code (e.g. "monthly").
    pub code: String,
    /// Human-readable template name.
    pub name: String,
    /// Zero-based index of the header row.
    pub header_row_index: usize,
    /// Zero-based index of the first data row.
    pub data_start_index: usize,
    /// Treatment of an unpaired half-day.
    #[serde(default)]
    pub half_day_policy: HalfDayPolicy,
    /// Whether to drop employees with no attendance codes at all.
    #[serde(default)]
    pub drop_inactive_rows: bool,
    /// Header labels accepted for each normalized policy field, in priority order.
    pub field_aliases: BTreeMap<PolicyField, Vec<String>>,
}

impl SheetTemplate {
    /// Returns the header labels accepted for a policy field.
    pub fn aliases(&self, field: PolicyField) -> &[String] {
        self.field_aliases
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Engine metadata.
    metadata: EngineMetadata,
    /// Sheet templates keyed by code.
    templates: HashMap<String, SheetTemplate>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, templates: Vec<SheetTemplate>) -> Self {
        let templates = templates
            .into_iter()
            .map(|t| (t.code.clone(), t))
            .collect();
        Self {
            metadata,
            templates,
        }
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns all templates.
    pub fn templates(&self) -> &HashMap<String, SheetTemplate> {
        &self.templates
    }
}
