//! Error types for dorm-report.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for dorm-report operations.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Database connection errors (host unreachable, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Statement execution errors (syntax errors, type mismatches, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Dataset loading errors (unreadable file, bad JSON, non-flat records).
    #[error("Load error: {0}")]
    Load(String),

    /// Result export errors (unwritable output path, serialization failure).
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration errors (invalid config file, bad report selector, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReportError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a load error with the given message.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Creates an export error with the given message.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Load(_) => "Load Error",
            Self::Export(_) => "Export Error",
            Self::Config(_) => "Configuration Error",
        }
    }
}

/// Result type alias using ReportError.
pub type Result<T> = std::result::Result<T, ReportError>;
