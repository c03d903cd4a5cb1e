//! MySQL/MariaDB schema reader.
//!
//! Implements [`SchemaDriver`] over `INFORMATION_SCHEMA` using SQLx for
//! connection pooling and query execution. All queries are scoped to the
//! connection's current database (`DATABASE()`).

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::debug;

use crate::config::ConnectionConfig;
use crate::core::identifier::quote_mysql;
use crate::core::schema::{ColumnInfo, EngineKind, LookupRow};
use crate::core::traits::SchemaDriver;
use crate::error::{GenerateError, Result};

/// Connection pool timeout.
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Queries run one at a time.
const MAX_CONNECTIONS: u32 = 2;

const COLUMNS_QUERY: &str = r#"
    SELECT
        CAST(COLUMN_NAME AS CHAR(255)) AS COLUMN_NAME,
        CAST(DATA_TYPE AS CHAR(255)) AS DATA_TYPE,
        CAST(COLUMN_TYPE AS CHAR) AS COLUMN_TYPE,
        CAST(IS_NULLABLE AS CHAR(3)) AS IS_NULLABLE,
        CAST(COLUMN_DEFAULT AS CHAR) AS COLUMN_DEFAULT
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION
"#;

const PRIMARY_KEY_QUERY: &str = r#"
    SELECT CAST(COLUMN_NAME AS CHAR(255)) AS COLUMN_NAME
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_SCHEMA = DATABASE() AND COLUMN_KEY = 'PRI' AND TABLE_NAME = ?
"#;

/// MySQL/MariaDB schema reader.
pub struct MysqlReader {
    pool: MySqlPool,
    database: String,
}

impl MysqlReader {
    /// Connect to a MySQL database described by `config`.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        let pool = MySqlPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| GenerateError::pool(e, "creating MySQL pool"))?;

        sqlx::query("SELECT 1")
            .fetch_one(&pool)
            .await
            .map_err(|e| GenerateError::pool(e, "testing MySQL connection"))?;

        debug!(
            "Connected to MySQL: {}:{}/{}",
            config.host, config.port, config.database
        );

        Ok(Self {
            pool,
            database: config.database.clone(),
        })
    }

    /// Close the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Build the lookup query selecting every column as text.
    ///
    /// The ORDER BY is table-qualified so it sorts on the raw column rather
    /// than on its text alias.
    fn build_lookup_query(
        table: &str,
        columns: &[ColumnInfo],
        order_by: Option<&str>,
    ) -> Result<String> {
        let quoted_table = quote_mysql(table)?;

        let mut select = Vec::with_capacity(columns.len());
        for col in columns {
            let quoted = quote_mysql(&col.name)?;
            select.push(format!("CAST({} AS CHAR) AS {}", quoted, quoted));
        }

        let mut sql = format!("SELECT {} FROM {}", select.join(", "), quoted_table);

        match order_by {
            Some(order) if columns.iter().any(|c| c.name == order) => {
                sql.push_str(&format!(" ORDER BY {}.{}", quoted_table, quote_mysql(order)?));
            }
            Some(order) if !order.is_empty() => {
                debug!("{}: order column {} not found, using default order", table, order);
            }
            _ => {}
        }

        Ok(sql)
    }

    /// `SHOW TABLES` names its single column after the database, and some
    /// collations report it as binary.
    fn first_column_as_string(row: &MySqlRow) -> Result<String> {
        row.try_get::<String, _>(0)
            .or_else(|_| {
                row.try_get::<Vec<u8>, _>(0)
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            })
            .map_err(|e| GenerateError::pool(e, "decoding MySQL table name"))
    }
}

#[async_trait]
impl SchemaDriver for MysqlReader {
    fn engine(&self) -> EngineKind {
        EngineKind::Mysql
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let rows: Vec<MySqlRow> = sqlx::query("SHOW TABLES")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenerateError::pool(e, "listing MySQL tables"))?;

        let tables = rows
            .iter()
            .map(Self::first_column_as_string)
            .collect::<Result<Vec<_>>>()?;

        debug!("Found {} tables in {}", tables.len(), self.database);
        Ok(tables)
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let rows: Vec<MySqlRow> = sqlx::query(COLUMNS_QUERY)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenerateError::pool(e, "loading MySQL columns"))?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let is_nullable: String = row
                .try_get("IS_NULLABLE")
                .map_err(|e| GenerateError::pool(e, "decoding MySQL column"))?;
            columns.push(ColumnInfo {
                name: row
                    .try_get("COLUMN_NAME")
                    .map_err(|e| GenerateError::pool(e, "decoding MySQL column"))?,
                data_type: row
                    .try_get("DATA_TYPE")
                    .map_err(|e| GenerateError::pool(e, "decoding MySQL column"))?,
                column_type: row
                    .try_get("COLUMN_TYPE")
                    .map_err(|e| GenerateError::pool(e, "decoding MySQL column"))?,
                is_nullable: is_nullable.eq_ignore_ascii_case("YES"),
                default: row
                    .try_get::<Option<String>, _>("COLUMN_DEFAULT")
                    .map_err(|e| GenerateError::pool(e, "decoding MySQL column"))?,
            });
        }

        debug!("Loaded {} columns for {}", columns.len(), table);
        Ok(columns)
    }

    async fn primary_key(&self, table: &str) -> Result<Option<String>> {
        let rows: Vec<MySqlRow> = sqlx::query(PRIMARY_KEY_QUERY)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenerateError::pool(e, "loading MySQL primary key"))?;

        if rows.len() != 1 {
            debug!("{}: {} primary key columns, reporting none", table, rows.len());
            return Ok(None);
        }

        let name: String = rows[0]
            .try_get("COLUMN_NAME")
            .map_err(|e| GenerateError::pool(e, "decoding MySQL primary key"))?;
        Ok(Some(name))
    }

    async fn read_rows(&self, table: &str, order_by: Option<&str>) -> Result<Vec<LookupRow>> {
        let columns = self.list_columns(table).await?;
        if columns.is_empty() {
            return Ok(Vec::new());
        }

        let sql = Self::build_lookup_query(table, &columns, order_by)?;
        debug!("Lookup query: {}", sql);

        let rows: Vec<MySqlRow> = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GenerateError::pool(e, "reading MySQL lookup rows"))?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let mut values = LookupRow::with_capacity(columns.len());
            for (idx, col) in columns.iter().enumerate() {
                let value: Option<String> = row
                    .try_get(idx)
                    .map_err(|e| GenerateError::pool(e, "decoding MySQL lookup row"))?;
                values.insert(col.name.clone(), value);
            }
            result.push(values);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnInfo> {
        vec![
            ColumnInfo::new("id", "int"),
            ColumnInfo::new("role_name", "varchar"),
        ]
    }

    #[test]
    fn test_lookup_query_orders_by_qualified_column() {
        let sql = MysqlReader::build_lookup_query("user_roles", &columns(), Some("id")).unwrap();
        assert_eq!(
            sql,
            "SELECT CAST(`id` AS CHAR) AS `id`, CAST(`role_name` AS CHAR) AS `role_name` \
             FROM `user_roles` ORDER BY `user_roles`.`id`"
        );
    }

    #[test]
    fn test_lookup_query_skips_unknown_order_column() {
        let sql = MysqlReader::build_lookup_query("user_roles", &columns(), Some("code")).unwrap();
        assert!(!sql.contains("ORDER BY"));

        let sql = MysqlReader::build_lookup_query("user_roles", &columns(), Some("")).unwrap();
        assert!(!sql.contains("ORDER BY"));

        let sql = MysqlReader::build_lookup_query("user_roles", &columns(), None).unwrap();
        assert!(!sql.contains("ORDER BY"));
    }

    #[test]
    fn test_lookup_query_quotes_identifiers() {
        let cols = vec![ColumnInfo::new("weird`name", "varchar")];
        let sql = MysqlReader::build_lookup_query("t", &cols, None).unwrap();
        assert!(sql.contains("`weird``name`"));
    }

    #[test]
    fn test_lookup_query_rejects_bad_table() {
        assert!(MysqlReader::build_lookup_query("", &columns(), None).is_err());
    }
}
