//! Database driver implementations.
//!
//! - [`mysql`]: MySQL/MariaDB driver over `INFORMATION_SCHEMA`
//! - [`stub`]: recognized engines without introspection support
//!
//! # Dispatch
//!
//! [`DriverImpl`] is a closed enum over the driver types. The engine is
//! selected with an exhaustive match on [`EngineKind`], so adding an engine
//! variant fails to compile until it is routed somewhere.
//!
//! # Adding New Databases
//!
//! 1. Create a module under `drivers/` implementing [`SchemaDriver`]
//! 2. Add a variant to `DriverImpl` and route it in `DriverImpl::connect`

pub mod mysql;
pub mod stub;

pub use mysql::MysqlReader;
pub use stub::UnimplementedDriver;

use async_trait::async_trait;

use crate::config::ConnectionConfig;
use crate::core::schema::{ColumnInfo, ConnectionDescriptor, EngineKind, LookupRow};
use crate::core::traits::SchemaDriver;
use crate::error::Result;

/// Enum-based static dispatch for schema drivers.
pub enum DriverImpl {
    Mysql(MysqlReader),
    Unimplemented(UnimplementedDriver),
}

impl DriverImpl {
    /// Open a driver for a configured connection.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedDriver` for unknown driver strings and a pool
    /// error when a MySQL connection cannot be established. Recognized but
    /// unimplemented engines connect fine and fail on first use.
    pub async fn connect(name: &str, config: &ConnectionConfig) -> Result<Self> {
        let descriptor = ConnectionDescriptor::parse(name, &config.driver)?;
        match descriptor.engine {
            EngineKind::Mysql => Ok(DriverImpl::Mysql(MysqlReader::connect(config).await?)),
            EngineKind::SqlServer | EngineKind::Sqlite | EngineKind::Postgres => Ok(
                DriverImpl::Unimplemented(UnimplementedDriver::new(descriptor.engine)),
            ),
        }
    }

    /// Release any pooled connections.
    pub async fn close(&self) {
        if let DriverImpl::Mysql(d) = self {
            d.close().await;
        }
    }
}

#[async_trait]
impl SchemaDriver for DriverImpl {
    fn engine(&self) -> EngineKind {
        match self {
            DriverImpl::Mysql(d) => d.engine(),
            DriverImpl::Unimplemented(d) => d.engine(),
        }
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        match self {
            DriverImpl::Mysql(d) => d.list_tables().await,
            DriverImpl::Unimplemented(d) => d.list_tables().await,
        }
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        match self {
            DriverImpl::Mysql(d) => d.list_columns(table).await,
            DriverImpl::Unimplemented(d) => d.list_columns(table).await,
        }
    }

    async fn primary_key(&self, table: &str) -> Result<Option<String>> {
        match self {
            DriverImpl::Mysql(d) => d.primary_key(table).await,
            DriverImpl::Unimplemented(d) => d.primary_key(table).await,
        }
    }

    async fn read_rows(&self, table: &str, order_by: Option<&str>) -> Result<Vec<LookupRow>> {
        match self {
            DriverImpl::Mysql(d) => d.read_rows(table, order_by).await,
            DriverImpl::Unimplemented(d) => d.read_rows(table, order_by).await,
        }
    }
}
