//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::{GenerateError, Result};
use std::path::Path;

/// Base class used when `output.extends` is not configured.
pub const DEFAULT_EXTENDS: &str = "Illuminate\\Database\\Eloquent\\Model";

/// Indent used when `output.indent` is not configured.
pub const DEFAULT_INDENT: &str = "    ";

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Serialize the configuration back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// A minimal valid configuration with one local MySQL connection.
    pub fn sample() -> Self {
        let mut config = Config {
            output: OutputConfig {
                path: Some("app/Models".into()),
                namespace: Some("App\\Models".into()),
                database_sub_directory: Some(true),
                extends: Some(DEFAULT_EXTENDS.to_string()),
                ..OutputConfig::default()
            },
            ..Config::default()
        };
        config.connections.insert(
            "main".to_string(),
            ConnectionConfig {
                database: "app".to_string(),
                user: "root".to_string(),
                ..ConnectionConfig::default()
            },
        );
        config
    }

    /// Root directory for model files.
    pub fn output_path(&self) -> Result<&Path> {
        self.output
            .path
            .as_deref()
            .ok_or_else(|| GenerateError::ConfigurationMissing("output.path".into()))
    }

    /// Root namespace for model classes.
    pub fn namespace(&self) -> Result<&str> {
        self.output
            .namespace
            .as_deref()
            .ok_or_else(|| GenerateError::ConfigurationMissing("output.namespace".into()))
    }

    /// Whether models go into one directory per connection.
    pub fn database_sub_directory(&self) -> Result<bool> {
        self.output.database_sub_directory.ok_or_else(|| {
            GenerateError::ConfigurationMissing("output.database_sub_directory".into())
        })
    }

    /// Fully qualified base class, falling back to the Eloquent model.
    pub fn extends(&self) -> &str {
        match self.output.extends.as_deref() {
            Some(extends) if !extends.trim().is_empty() => extends.trim(),
            _ => DEFAULT_EXTENDS,
        }
    }

    /// Indentation unit, falling back to four spaces.
    pub fn indent(&self) -> &str {
        match self.output.indent.as_deref() {
            Some(indent) if !indent.is_empty() => indent,
            _ => DEFAULT_INDENT,
        }
    }

    /// Look up a connection by name.
    pub fn connection(&self, name: &str) -> Result<&ConnectionConfig> {
        self.connections
            .get(name)
            .ok_or_else(|| GenerateError::ConnectionNotFound(name.to_string()))
    }
}
