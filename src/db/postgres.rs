//! PostgreSQL database client implementation.
//!
//! Provides the `PostgresClient` struct that implements the `DatabaseClient`
//! trait for PostgreSQL databases using sqlx.

use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, DatabaseBackend, DatabaseClient, QueryResult, Row, Value};
use crate::error::{ReportError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::{Column as SqlxColumn, Row as SqlxRow, TypeInfo};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Query timeout in seconds.
const QUERY_TIMEOUT_SECS: u64 = 30;

/// Maximum number of connection retry attempts.
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay between retry attempts (doubles each retry).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// PostgreSQL database client.
#[derive(Debug)]
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Creates a new PostgresClient from an existing connection pool.
    ///
    /// This is primarily useful for testing.
    #[allow(dead_code)]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database described by `config`.
    ///
    /// Transient failures (refused, timed out) are retried with exponential
    /// backoff; a final failure is returned as an explicit connection error.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let conn_str = config.to_connection_string()?;

        let mut last_error = None;
        let mut delay = Duration::from_millis(RETRY_BASE_DELAY_MS);

        for attempt in 1..=MAX_RETRY_ATTEMPTS {
            debug!("Connection attempt {} of {}", attempt, MAX_RETRY_ATTEMPTS);

            let result = PgPoolOptions::new()
                .max_connections(2)
                .acquire_timeout(Duration::from_secs(10))
                .connect(&conn_str)
                .await;

            match result {
                Ok(pool) => {
                    debug!("Successfully connected to database");
                    return Ok(Self { pool });
                }
                Err(e) => {
                    let is_transient = is_transient_error(&e);
                    last_error = Some(e);

                    if attempt < MAX_RETRY_ATTEMPTS && is_transient {
                        warn!(
                            "Connection attempt {} failed (transient error), retrying in {:?}",
                            attempt, delay
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2; // Exponential backoff
                    }
                }
            }
        }

        // All retries exhausted
        Err(map_connection_error(
            last_error.expect("at least one attempt was made"),
            config,
        ))
    }
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::Postgres
    }

    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let start = Instant::now();

        let result = tokio::time::timeout(
            Duration::from_secs(QUERY_TIMEOUT_SECS),
            bind_params(sqlx::query(sql), params).fetch_all(&self.pool),
        )
        .await
        .map_err(|_| {
            ReportError::query(format!(
                "Query timed out after {QUERY_TIMEOUT_SECS} seconds"
            ))
        })?
        .map_err(|e| ReportError::query(format_query_error(e)))?;

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
        let result = tokio::time::timeout(
            Duration::from_secs(QUERY_TIMEOUT_SECS),
            bind_params(sqlx::query(sql), params).execute(&self.pool),
        )
        .await
        .map_err(|_| {
            ReportError::query(format!(
                "Statement timed out after {QUERY_TIMEOUT_SECS} seconds"
            ))
        })?
        .map_err(|e| ReportError::query(format_query_error(e)))?;

        Ok(result.rows_affected())
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Binds a slice of [`Value`] parameters onto a query, by type.
fn bind_params<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    params: &[Value],
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
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

/// Converts a sqlx PgRow to our Row type.
fn convert_row(row: &PgRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Converts a single column value from a PgRow to our Value type.
fn convert_value(row: &PgRow, index: usize, type_name: &str) -> Value {
    match type_name.to_uppercase().as_str() {
        "BOOL" | "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        "INT2" | "SMALLINT" => row
            .try_get::<Option<i16>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(v as i64))
            .unwrap_or(Value::Null),

        "INT4" | "INT" | "INTEGER" => row
            .try_get::<Option<i32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(v as i64))
            .unwrap_or(Value::Null),

        "INT8" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "FLOAT4" | "REAL" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Float(v as f64))
            .unwrap_or(Value::Null),

        "FLOAT8" | "DOUBLE PRECISION" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)
            .ok()
            .flatten()
            .map(Value::Date)
            .unwrap_or(Value::Null),

        // For all other types, try to get as string
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Determines if an error is transient and worth retrying.
fn is_transient_error(error: &sqlx::Error) -> bool {
    let error_str = error.to_string().to_lowercase();

    // Connection refused or timeout are often transient
    if error_str.contains("connection refused")
        || error_str.contains("timed out")
        || error_str.contains("timeout")
        || error_str.contains("temporarily unavailable")
        || error_str.contains("connection reset")
        || error_str.contains("broken pipe")
    {
        return true;
    }

    // Authentication and database-not-found errors are not transient
    false
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &ConnectionConfig) -> ReportError {
    let host = config.host.as_deref().unwrap_or("localhost");
    let port = config.port;
    let user = config.user.as_deref().unwrap_or("unknown");
    let database = config.database.as_deref().unwrap_or("unknown");

    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") || error_str.contains("could not connect") {
        ReportError::connection(format!(
            "Cannot connect to {host}:{port}. Check that the server is running."
        ))
    } else if error_str.contains("password authentication failed")
        || error_str.contains("authentication failed")
    {
        ReportError::connection(format!(
            "Authentication failed for user '{user}'. Check your credentials."
        ))
    } else if error_str.contains("does not exist") && error_str.contains("database") {
        ReportError::connection(format!("Database '{database}' does not exist."))
    } else if error_str.contains("ssl") || error_str.contains("tls") {
        ReportError::connection(
            "Server requires SSL. Add '?sslmode=require' to connection string.".to_string(),
        )
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        ReportError::connection(format!(
            "Connection to {host}:{port} timed out. The server may be overloaded or unreachable."
        ))
    } else {
        ReportError::connection(error.to_string())
    }
}

/// Formats a query error with detail and hint if available.
fn format_query_error(error: sqlx::Error) -> String {
    let error_str = error.to_string();

    let mut result = String::new();

    if let Some(db_error) = error.as_database_error() {
        result.push_str("ERROR: ");
        result.push_str(db_error.message());

        if let Some(pg_error) = db_error.try_downcast_ref::<sqlx::postgres::PgDatabaseError>() {
            if let Some(detail) = pg_error.detail() {
                result.push_str("\n  DETAIL: ");
                result.push_str(detail);
            }

            if let Some(hint) = pg_error.hint() {
                result.push_str("\n  HINT: ");
                result.push_str(hint);
            }

            if let Some(table) = pg_error.table() {
                result.push_str("\n  TABLE: ");
                result.push_str(table);
            }

            if let Some(column) = pg_error.column() {
                result.push_str("\n  COLUMN: ");
                result.push_str(column);
            }
        }
    } else {
        result = error_str;
    }

    result
}
