//! SQLite database client implementation.
//!
//! Backs local database files and the in-memory databases used by the
//! integration tests, so the full pipeline can run without a server.

use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, DatabaseBackend, DatabaseClient, QueryResult, Row, Value};
use crate::error::{ReportError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Row as SqlxRow, TypeInfo, ValueRef};
use std::str::FromStr;
use std::time::Instant;
use tracing::debug;

/// SQLite database client.
#[derive(Debug)]
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    /// Creates a new SqliteClient from an existing connection pool.
    ///
    /// This is primarily useful for testing.
    #[allow(dead_code)]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (and creates, if missing) the database described by `config`.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let conn_str = config.to_connection_string()?;

        let options = SqliteConnectOptions::from_str(&conn_str)
            .map_err(|e| ReportError::connection(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true);

        // A single connection keeps an in-memory database alive and shared
        // for the whole run.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| ReportError::connection(format!("Cannot open SQLite database: {e}")))?;

        debug!("Opened SQLite database: {}", config.display_string());
        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::Sqlite
    }

    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let start = Instant::now();

        let result = bind_params(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ReportError::query(e.to_string()))?;

        let execution_time = start.elapsed();

        let columns: Vec<ColumnInfo> = result
            .first()
            .map(|first_row| {
                first_row
                    .columns()
                    .iter()
                    .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                    .collect()
            })
            .unwrap_or_default();

        let rows: Vec<Row> = result.iter().map(convert_row).collect();
        let row_count = rows.len();

        Ok(QueryResult {
            columns,
            rows,
            execution_time,
            row_count,
        })
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64> {
        let result = bind_params(sqlx::query(sql), params)
            .execute(&self.pool)
            .await
            .map_err(|e| ReportError::query(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Binds a slice of [`Value`] parameters onto a query, by type.
fn bind_params<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>,
    params: &[Value],
) -> sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>> {
    let mut query = query;
    for param in params {
        query = match param {
            Value::Null => query.bind(Option::<String>::None),
            Value::Bool(b) => query.bind(*b),
            Value::Int(i) => query.bind(*i),
            Value::Float(f) => query.bind(*f),
            Value::String(s) => query.bind(s.clone()),
            Value::Date(d) => query.bind(*d),
        };
    }
    query
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts a single column value from a SqliteRow to our Value type.
///
/// SQLite expression columns carry no declared type, so conversion follows
/// the runtime storage class of each cell rather than the column metadata.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let Ok(raw) = row.try_get_raw(index) else {
        return Value::Null;
    };
    if raw.is_null() {
        return Value::Null;
    }

    match raw.type_info().name().to_uppercase().as_str() {
        "INTEGER" | "BOOLEAN" => row
            .try_get::<i64, _>(index)
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" => row
            .try_get::<f64, _>(index)
            .map(Value::Float)
            .unwrap_or(Value::Null),

        // TEXT, BLOB and everything else comes back as a string
        _ => row
            .try_get::<String, _>(index)
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}
