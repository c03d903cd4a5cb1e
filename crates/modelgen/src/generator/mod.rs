//! Per-table model generation.
//!
//! [`Generator`] composes the pipeline for one connection:
//!
//! 1. Introspect columns and the primary key through a [`SchemaDriver`]
//! 2. [`classify`] the columns into fillable and guarded
//! 3. Stop with [`Artifact::Skipped`] if nothing is fillable
//! 4. Extract lookup [`constants`] when the table has a spec
//! 5. Parse the [`preserved`] region of the prior artifact
//! 6. Render the [`template`]
//!
//! Errors from any step are returned unchanged. The generator never reads
//! or writes files besides an optional custom stub at construction time.

pub mod classify;
pub mod constants;
pub mod preserved;
pub mod template;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::config::{Config, ConstantSpec};
use crate::core::traits::SchemaDriver;
use crate::error::Result;
use crate::naming;

pub use classify::classify;
pub use preserved::{PreservedContent, Sentinel, SENTINEL};
pub use template::{render, Bindings};

/// Template used when no custom stub is configured.
pub const DEFAULT_STUB: &str = include_str!("../../stubs/model.stub");

/// Outcome of generating one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Complete model source.
    Rendered(String),

    /// The table has no fillable columns; nothing should be written.
    Skipped,
}

impl Artifact {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Artifact::Skipped)
    }
}

/// Immutable generation settings for one connection.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Connection name as written into models.
    pub connection: String,

    /// Root namespace; the connection segment is appended.
    pub namespace_root: String,

    /// Root directory for model files.
    pub output_path: PathBuf,

    /// Whether models live in a per-connection sub directory.
    pub sub_directory: bool,

    /// Fully qualified base class.
    pub extends: String,

    /// Imports added to every model.
    pub uses: Vec<String>,

    pub indent: String,

    /// Stub template text.
    pub template: String,

    /// Constant specs for this connection by table.
    pub constants: IndexMap<String, ConstantSpec>,

    /// Tables with timestamp tracking.
    pub timestamps: Vec<String>,

    /// Configuration-wide constant name replacements.
    pub replace: IndexMap<String, String>,

    pub sentinel: Sentinel,
}

impl GeneratorSettings {
    /// Build settings for `connection` from the loaded configuration.
    ///
    /// Fails if a required output key is missing, the connection is not
    /// configured, or a custom stub cannot be read.
    pub fn from_config(config: &Config, connection: &str) -> Result<Self> {
        config.connection(connection)?;

        let template = match &config.output.stub {
            Some(path) => std::fs::read_to_string(path)?,
            None => DEFAULT_STUB.to_string(),
        };

        Ok(Self {
            connection: connection.to_string(),
            namespace_root: config.namespace()?.to_string(),
            output_path: config.output_path()?.to_path_buf(),
            sub_directory: config.database_sub_directory()?,
            extends: config.extends().to_string(),
            uses: config.output.uses.clone(),
            indent: config.indent().to_string(),
            template,
            constants: config.constants.get(connection).cloned().unwrap_or_default(),
            timestamps: config.timestamps.get(connection).cloned().unwrap_or_default(),
            replace: config.replace.clone(),
            sentinel: Sentinel::default(),
        })
    }

    /// Namespace of this connection's models.
    pub fn namespace(&self) -> String {
        naming::namespace(&self.namespace_root, &self.connection)
    }

    /// Target file of a table's model.
    pub fn model_path(&self, table: &str) -> PathBuf {
        naming::model_path(&self.output_path, &self.connection, table, self.sub_directory)
    }

    /// Constant spec of a lookup table, if one is configured.
    pub fn constant_spec(&self, table: &str) -> Option<&ConstantSpec> {
        self.constants.get(table)
    }

    pub fn has_timestamps(&self, table: &str) -> bool {
        self.timestamps.iter().any(|t| t == table)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

/// Generates models for the tables of one connection.
pub struct Generator<D> {
    driver: D,
    settings: GeneratorSettings,
}

impl<D: SchemaDriver> Generator<D> {
    pub fn new(driver: D, settings: GeneratorSettings) -> Self {
        Self { driver, settings }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Every table of the connection.
    pub async fn tables(&self) -> Result<Vec<String>> {
        self.driver.list_tables().await
    }

    /// Generate the model for one table.
    ///
    /// `prior` is the text of the previously generated file, if one exists.
    pub async fn generate(
        &self,
        table: &str,
        guarded: &[String],
        prior: Option<&str>,
    ) -> Result<Artifact> {
        let settings = &self.settings;

        let columns = self.driver.list_columns(table).await?;
        let primary_key = self.driver.primary_key(table).await?;
        debug!(
            "{}: {} columns, primary key {:?}",
            table,
            columns.len(),
            primary_key
        );

        let properties = classify(columns, primary_key, guarded, settings.has_timestamps(table));
        if properties.is_empty() {
            debug!("{}: no fillable columns, skipping", table);
            return Ok(Artifact::Skipped);
        }

        let constants = constants::extract(
            &self.driver,
            table,
            settings.constant_spec(table),
            &settings.replace,
        )
        .await?;

        let preserved = settings.sentinel.parse(prior);
        debug!(
            "{}: {} preserved lines, {} preserved imports",
            table,
            preserved.lines.len(),
            preserved.uses.len()
        );

        let namespace = settings.namespace();
        let ctx = template::ModelContext {
            connection: &settings.connection,
            namespace: &namespace,
            table,
            extends: &settings.extends,
            uses: &settings.uses,
            indent: &settings.indent,
            properties: &properties,
            constants: &constants,
            preserved: &preserved,
            sentinel: &settings.sentinel,
        };

        Ok(template::render_model(&settings.template, &ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;

    const YAML: &str = r#"
output:
  path: app/Models
  namespace: App\Models
  database_sub_directory: true
  indent: "\t"
connections:
  main: {}
constants:
  main:
    user_roles: { id: id, name: role_name }
timestamps:
  main: [orders]
"#;

    #[test]
    fn test_settings_from_config() {
        let config = Config::from_yaml(YAML).unwrap();
        let settings = GeneratorSettings::from_config(&config, "main").unwrap();
        assert_eq!(settings.namespace(), "App\\Models\\Main");
        assert_eq!(settings.model_path("user_roles"), PathBuf::from("app/Models/Main/UserRoles.php"));
        assert_eq!(settings.indent, "\t");
        assert_eq!(settings.extends, crate::config::DEFAULT_EXTENDS);
        assert_eq!(settings.template, DEFAULT_STUB);
        assert_eq!(settings.constant_spec("user_roles").unwrap().name.as_deref(), Some("role_name"));
        assert!(settings.constant_spec("orders").is_none());
        assert!(settings.has_timestamps("orders"));
        assert!(!settings.has_timestamps("user_roles"));
    }

    #[test]
    fn test_settings_are_per_connection() {
        let mut config = Config::from_yaml(YAML).unwrap();
        config
            .connections
            .insert("legacy".to_string(), crate::config::ConnectionConfig::default());
        let settings = GeneratorSettings::from_config(&config, "legacy").unwrap();
        assert!(settings.constant_spec("user_roles").is_none());
        assert!(!settings.has_timestamps("orders"));
        assert_eq!(settings.namespace(), "App\\Models\\Legacy");
    }

    #[test]
    fn test_settings_unknown_connection() {
        let config = Config::from_yaml(YAML).unwrap();
        let err = GeneratorSettings::from_config(&config, "other").unwrap_err();
        assert!(matches!(err, GenerateError::ConnectionNotFound(_)));
    }

    #[test]
    fn test_settings_missing_stub() {
        let mut config = Config::from_yaml(YAML).unwrap();
        config.output.stub = Some(PathBuf::from("/nonexistent/model.stub"));
        let err = GeneratorSettings::from_config(&config, "main").unwrap_err();
        assert!(matches!(err, GenerateError::Io(_)));
    }

    #[test]
    fn test_default_stub_tokens() {
        for token in [
            "namespace",
            "uses",
            "properties",
            "class",
            "shortNameExtends",
            "constants",
            "connection",
            "table",
            "primaryKey",
            "timestamps",
            "fillable",
            "guarded",
            "preserved",
        ] {
            assert!(DEFAULT_STUB.contains(&format!("{{{{{}}}}}", token)), "{}", token);
        }
        assert!(DEFAULT_STUB.ends_with("\n}\n"));
    }
}
