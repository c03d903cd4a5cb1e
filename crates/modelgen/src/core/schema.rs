//! Schema metadata types shared by the drivers and the generator.
//!
//! These types are produced fresh on every introspection call and are never
//! written back to the database.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// Database engine behind a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    Mysql,
    SqlServer,
    Sqlite,
    Postgres,
}

impl EngineKind {
    /// Canonical lowercase name of the engine.
    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Mysql => "mysql",
            EngineKind::SqlServer => "sqlserver",
            EngineKind::Sqlite => "sqlite",
            EngineKind::Postgres => "postgres",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(EngineKind::Mysql),
            "sqlsrv" | "sqlserver" | "sql_server" | "mssql" => Ok(EngineKind::SqlServer),
            "sqlite" => Ok(EngineKind::Sqlite),
            "pgsql" | "postgres" | "postgresql" => Ok(EngineKind::Postgres),
            _ => Err(GenerateError::UnsupportedDriver(s.to_string())),
        }
    }
}

/// A named connection and the engine it talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub name: String,
    pub engine: EngineKind,
}

impl ConnectionDescriptor {
    pub fn new(name: impl Into<String>, engine: EngineKind) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }

    /// Build a descriptor from a configured driver string.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedDriver` if the driver string names no known engine.
    pub fn parse(name: impl Into<String>, driver: &str) -> crate::error::Result<Self> {
        Ok(Self::new(name, driver.parse()?))
    }
}

/// Column metadata as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,

    /// Raw engine type, e.g. `varchar`.
    pub data_type: String,

    /// Full type signature, e.g. `varchar(255)`.
    pub column_type: String,

    /// Whether the column accepts NULL.
    pub is_nullable: bool,

    /// Default value, if any.
    pub default: Option<String>,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        let data_type = data_type.into();
        Self {
            name: name.into(),
            column_type: data_type.clone(),
            data_type,
            is_nullable: false,
            default: None,
        }
    }

    pub fn with_column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = column_type.into();
        self
    }

    pub fn nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = is_nullable;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Classified view of a table used to render its model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableProperties {
    /// Primary key column, only when it differs from the conventional `id`.
    pub primary_key: Option<String>,

    /// Columns open to mass assignment, in driver order.
    pub fillable: Vec<String>,

    /// Columns excluded from mass assignment, in driver order.
    pub guarded: Vec<String>,

    /// Whether the model tracks timestamps.
    pub timestamps: bool,

    /// Column metadata for every fillable column.
    pub fillable_columns: Vec<ColumnInfo>,
}

impl TableProperties {
    /// A table without fillable columns produces no model.
    pub fn is_empty(&self) -> bool {
        self.fillable.is_empty()
    }
}

/// One row of a lookup table, every value rendered as text.
pub type LookupRow = IndexMap<String, Option<String>>;
