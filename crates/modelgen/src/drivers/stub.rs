//! Placeholder driver for engines that are recognized but not introspected yet.

use async_trait::async_trait;

use crate::core::schema::{ColumnInfo, EngineKind, LookupRow};
use crate::core::traits::SchemaDriver;
use crate::error::{GenerateError, Result};

/// Driver whose every operation fails with `Unimplemented`.
#[derive(Debug, Clone)]
pub struct UnimplementedDriver {
    engine: EngineKind,
}

impl UnimplementedDriver {
    pub fn new(engine: EngineKind) -> Self {
        Self { engine }
    }

    fn unimplemented<T>(&self) -> Result<T> {
        Err(GenerateError::Unimplemented(self.engine.to_string()))
    }
}

#[async_trait]
impl SchemaDriver for UnimplementedDriver {
    fn engine(&self) -> EngineKind {
        self.engine
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        self.unimplemented()
    }

    async fn list_columns(&self, _table: &str) -> Result<Vec<ColumnInfo>> {
        self.unimplemented()
    }

    async fn primary_key(&self, _table: &str) -> Result<Option<String>> {
        self.unimplemented()
    }

    async fn read_rows(&self, _table: &str, _order_by: Option<&str>) -> Result<Vec<LookupRow>> {
        self.unimplemented()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_operation_names_the_engine() {
        let driver = UnimplementedDriver::new(EngineKind::Sqlite);

        let err = driver.list_tables().await.unwrap_err();
        assert!(matches!(err, GenerateError::Unimplemented(ref e) if e == "sqlite"));

        assert!(driver.list_columns("users").await.is_err());
        assert!(driver.primary_key("users").await.is_err());
        assert!(driver.read_rows("users", Some("id")).await.is_err());
    }
}
