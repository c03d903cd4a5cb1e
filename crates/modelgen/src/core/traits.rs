//! Core trait for database-agnostic schema introspection.
//!
//! [`SchemaDriver`] is the only seam between the generator and a database.
//! Every method is a read-only query against the connection the driver was
//! created for.

use async_trait::async_trait;

use crate::error::Result;

use super::schema::{ColumnInfo, EngineKind, LookupRow};

/// Read schema metadata and lookup rows from one connection.
#[async_trait]
pub trait SchemaDriver: Send + Sync {
    /// Engine this driver talks to.
    fn engine(&self) -> EngineKind;

    /// Names of every table in the connection's current database.
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// Columns of one table in declaration order.
    ///
    /// An unknown table yields an empty list rather than an error.
    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnInfo>>;

    /// Primary key column of a table.
    ///
    /// Composite keys and tables without a key both report `None`.
    async fn primary_key(&self, table: &str) -> Result<Option<String>>;

    /// Every row of a table with all values rendered as text.
    ///
    /// Rows are ordered ascending by `order_by` when it names an existing
    /// column; otherwise the engine's default order applies.
    async fn read_rows(&self, table: &str, order_by: Option<&str>) -> Result<Vec<LookupRow>>;
}
