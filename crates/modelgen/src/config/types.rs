//! Configuration type definitions.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where and how model files are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Columns guarded by default when the caller supplies none.
    #[serde(default)]
    pub guarded: Vec<String>,

    /// Character replacements applied to every constant name.
    #[serde(default)]
    pub replace: IndexMap<String, String>,

    /// Database connections by name.
    #[serde(default)]
    pub connections: IndexMap<String, ConnectionConfig>,

    /// Constant specs keyed by connection, then table.
    #[serde(default)]
    pub constants: IndexMap<String, IndexMap<String, ConstantSpec>>,

    /// Tables with timestamp tracking, keyed by connection.
    #[serde(default)]
    pub timestamps: IndexMap<String, Vec<String>>,
}

/// Output settings for generated models.
///
/// The first three fields are mandatory; they are optional here so that
/// their absence is reported by name during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for model files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Root namespace for model classes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Put each connection's models in their own sub directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_sub_directory: Option<bool>,

    /// Fully qualified base class (default: Eloquent model).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Imports added to every model.
    #[serde(default)]
    pub uses: Vec<String>,

    /// Indentation unit (default: four spaces).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<String>,

    /// Custom stub template path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stub: Option<PathBuf>,
}

/// Database connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Driver name (default: "mysql").
    #[serde(default = "default_mysql")]
    pub driver: String,

    /// Database host (default: "localhost").
    #[serde(default = "default_localhost")]
    pub host: String,

    /// Database port (default: 3306).
    #[serde(default = "default_mysql_port")]
    pub port: u16,

    /// Database name.
    #[serde(default)]
    pub database: String,

    /// Username.
    #[serde(default)]
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            driver: default_mysql(),
            host: default_localhost(),
            port: default_mysql_port(),
            database: String::new(),
            user: String::new(),
            password: String::new(),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Instructions for turning a lookup table's rows into constants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantSpec {
    /// Column holding the constant value; also the sort column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Column holding the text the constant name is derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Literal prepended to every constant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Literal appended to every constant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Extra character replacements for this table.
    #[serde(default)]
    pub replace: IndexMap<String, String>,
}

impl ConstantSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

fn default_mysql() -> String {
    "mysql".to_string()
}

fn default_localhost() -> String {
    "localhost".to_string()
}

fn default_mysql_port() -> u16 {
    3306
}
