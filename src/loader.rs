//! Dataset loading: JSON array files into relational tables.
//!
//! Each input file holds a JSON array of flat objects whose keys match the
//! target table's column names. Every object becomes one INSERT with the
//! column list taken from the object's keys (in their given order) and every
//! value bound as a typed statement parameter. Identifiers are validated, so
//! neither keys nor values can corrupt the generated statement.

use crate::db::{DatabaseClient, Value};
use crate::error::{ReportError, Result};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, info};

/// Loads a JSON array file into the named table, one INSERT per record.
///
/// Returns the number of records inserted. Fails fast on the first bad
/// record or failed insert; earlier inserts are not rolled back.
pub async fn load_table(
    client: &dyn DatabaseClient,
    path: &Path,
    table: &str,
) -> Result<usize> {
    validate_identifier(table)?;

    let content = std::fs::read_to_string(path)
        .map_err(|e| ReportError::load(format!("{}: {e}", path.display())))?;

    let records: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(&content).map_err(|e| {
            ReportError::load(format!(
                "{}: expected a JSON array of flat objects: {e}",
                path.display()
            ))
        })?;

    for (i, record) in records.iter().enumerate() {
        insert_record(client, table, record).await.map_err(|e| {
            ReportError::load(format!("{} record {i}: {e}", path.display()))
        })?;
    }

    info!(
        "Loaded {} records from {} into '{}'",
        records.len(),
        path.display(),
        table
    );
    Ok(records.len())
}

/// Deletes all rows from the named table.
pub async fn clear_table(client: &dyn DatabaseClient, table: &str) -> Result<u64> {
    validate_identifier(table)?;
    let deleted = client.execute(&format!("DELETE FROM {table}"), &[]).await?;
    debug!("Cleared {} rows from '{}'", deleted, table);
    Ok(deleted)
}

/// Inserts one flat JSON object as a row.
async fn insert_record(
    client: &dyn DatabaseClient,
    table: &str,
    record: &serde_json::Map<String, serde_json::Value>,
) -> Result<()> {
    if record.is_empty() {
        return Err(ReportError::load("record has no fields"));
    }

    let backend = client.backend();
    let mut columns = Vec::with_capacity(record.len());
    let mut placeholders = Vec::with_capacity(record.len());
    let mut params = Vec::with_capacity(record.len());

    for (n, (key, value)) in record.iter().enumerate() {
        validate_identifier(key)?;
        columns.push(key.as_str());
        placeholders.push(backend.placeholder(n + 1));
        params.push(json_to_value(value)?);
    }

    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    );

    client.execute(&sql, &params).await?;
    Ok(())
}

/// Converts a flat JSON value to a bindable database value.
///
/// Strings in `YYYY-MM-DD` form bind as dates, so date columns accept them
/// on backends with strict parameter typing. Nested objects and arrays are
/// rejected.
fn json_to_value(value: &serde_json::Value) -> Result<Value> {
    match value {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(ReportError::load(format!("unrepresentable number: {n}")))
            }
        }
        serde_json::Value::String(s) => {
            match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(date) => Ok(Value::Date(date)),
                Err(_) => Ok(Value::String(s.clone())),
            }
        }
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(ReportError::load(
            "records must be flat: nested arrays/objects are not supported",
        )),
    }
}

/// Validates a SQL identifier (table or column name).
///
/// Identifiers come from input file keys and must never reach the statement
/// text unchecked.
fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ReportError::load(format!("invalid identifier: '{name}'")))
    }
}
