//! Database abstraction layer for dorm-report.
//!
//! Provides a trait-based interface for database operations, allowing
//! different database backends to be used interchangeably. Postgres is the
//! production backend; SQLite exists for local files and self-contained
//! integration tests.

mod postgres;
mod sqlite;
mod types;

pub use postgres::PostgresClient;
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Postgres,
    Sqlite,
}

impl DatabaseBackend {
    /// Returns the backend as a string for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    /// Parses a backend from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }

    /// Returns the default port for this backend, if it is networked.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::Postgres => Some(5432),
            Self::Sqlite => None,
        }
    }

    /// Returns the URL scheme for this backend.
    pub fn url_scheme(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    /// Returns the placeholder for the 1-based statement parameter `n`.
    ///
    /// Postgres uses `$n`, SQLite uses `?n`.
    pub fn placeholder(&self, n: usize) -> String {
        match self {
            Self::Postgres => format!("${n}"),
            Self::Sqlite => format!("?{n}"),
        }
    }
}

/// Creates a database client for the given backend and configuration.
///
/// This is the central factory function for database connections. A
/// connection failure is an explicit error; callers never receive a
/// half-open handle.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    match config.backend {
        DatabaseBackend::Postgres => {
            let client = PostgresClient::connect(config).await?;
            Ok(Box::new(client))
        }
        DatabaseBackend::Sqlite => {
            let client = SqliteClient::connect(config).await?;
            Ok(Box::new(client))
        }
    }
}

/// Trait defining the interface for database clients.
///
/// All database operations are async and return Results with ReportError.
/// Statements are parameterized; values are bound by type via [`Value`],
/// never inlined into the SQL text.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Returns the backend this client talks to (determines SQL dialect).
    fn backend(&self) -> DatabaseBackend;

    /// Executes a read statement and returns the full row set.
    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Executes a write statement and returns the number of affected rows.
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}
