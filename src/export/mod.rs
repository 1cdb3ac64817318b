//! Result writers: serialize a row set to a JSON or XML file.

mod json;
mod xml;

pub use json::{rows_to_json, write_json};
pub use xml::write_xml;

use crate::db::QueryResult;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Output format for the result file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
}

impl OutputFormat {
    /// Maps a format token to a format.
    ///
    /// `json` selects JSON; any other token selects XML. This mirrors the
    /// original tool's behavior and is relied upon by callers.
    pub fn from_token(token: &str) -> Self {
        if token == "json" {
            Self::Json
        } else {
            Self::Xml
        }
    }

    /// Returns the default output filename for this format.
    pub fn default_filename(&self) -> PathBuf {
        match self {
            Self::Json => PathBuf::from("result.json"),
            Self::Xml => PathBuf::from("result.xml"),
        }
    }
}

/// Writes the row set to `path` in the given format.
///
/// An existing file at `path` is overwritten.
pub fn write_result(format: OutputFormat, result: &QueryResult, path: &Path) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(result, path),
        OutputFormat::Xml => write_xml(result, path),
    }
}
