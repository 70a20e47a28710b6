//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EngineMetadata, SheetTemplate};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to look up sheet templates.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml          # Engine metadata and default template
/// └── templates/
///     ├── monthly.yaml     # One file per sheet template
///     └── register.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use report_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let template = loader.get_template("monthly").unwrap();
/// println!("Data starts at row {}", template.data_start_index);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - engine.yaml or the templates directory is missing
    /// - any file contains invalid YAML
    /// - no template files are found
    /// - the default template named in engine.yaml does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let metadata = Self::load_yaml::<EngineMetadata>(&engine_path)?;

        let templates_dir = path.join("templates");
        let templates = Self::load_templates(&templates_dir)?;
        debug!(
            count = templates.len(),
            dir = %templates_dir.display(),
            "Loaded sheet templates"
        );

        let config = EngineConfig::new(metadata, templates);
        let loader = Self { config };

        // Fail at load time rather than on the first request.
        loader.default_template()?;

        Ok(loader)
    }

    /// Builds a loader from already-constructed configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all template files from the templates directory.
    fn load_templates(templates_dir: &Path) -> EngineResult<Vec<SheetTemplate>> {
        let dir_str = templates_dir.display().to_string();

        if !templates_dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(templates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut templates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let template = Self::load_yaml::<SheetTemplate>(&path)?;
                if template.data_start_index <= template.header_row_index {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!(
                            "data_start_index ({}) must come after header_row_index ({})",
                            template.data_start_index, template.header_row_index
                        ),
                    });
                }
                templates.push(template);
            }
        }

        if templates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no template files found)", dir_str),
            });
        }

        Ok(templates)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Gets a template by its code.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use report_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let template = loader.get_template("register")?;
    /// assert_eq!(template.header_row_index, 3);
    /// # Ok::<(), report_engine::error::EngineError>(())
    /// ```
    pub fn get_template(&self, code: &str) -> EngineResult<&SheetTemplate> {
        self.config
            .templates()
            .get(code)
            .ok_or_else(|| EngineError::TemplateNotFound {
                code: code.to_string(),
            })
    }

    /// Gets the template named as default in engine.yaml.
    pub fn default_template(&self) -> EngineResult<&SheetTemplate> {
        self.get_template(&self.config.metadata().default_template)
    }

    /// Resolves an optional template code, falling back to the default.
    pub fn resolve_template(&self, code: Option<&str>) -> EngineResult<&SheetTemplate> {
        match code {
            Some(code) => self.get_template(code),
            None => self.default_template(),
        }
    }
}
