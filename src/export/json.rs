//! JSON result writer.
//!
//! Serializes a row set as a pretty-printed JSON array of row objects with
//! 4-space indentation. Dates are coerced to `YYYY-MM-DD` strings.

use crate::db::QueryResult;
use crate::error::{ReportError, Result};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Converts a row set to a JSON array of column-name → value objects.
pub fn rows_to_json(result: &QueryResult) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = result
        .rows
        .iter()
        .map(|row| {
            let object: serde_json::Map<String, serde_json::Value> = result
                .columns
                .iter()
                .zip(row.iter())
                .map(|(col, value)| (col.name.clone(), value.to_json()))
                .collect();
            serde_json::Value::Object(object)
        })
        .collect();

    serde_json::Value::Array(rows)
}

/// Writes the row set to `path` as pretty-printed JSON.
pub fn write_json(result: &QueryResult, path: &Path) -> Result<()> {
    let data = rows_to_json(result);

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)
        .map_err(|e| ReportError::export(format!("JSON serialization failed: {e}")))?;

    std::fs::write(path, buf)
        .map_err(|e| ReportError::export(format!("{}: {e}", path.display())))?;

    debug!("Wrote {} rows to {}", result.row_count, path.display());
    Ok(())
}
