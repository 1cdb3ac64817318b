//! XML result writer.
//!
//! Serializes a row set as a `<rows>` document with one `<row>` element per
//! row and one child element per column, the XML analogue of the JSON
//! writer's array of objects.

use crate::db::QueryResult;
use crate::error::{ReportError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::path::Path;
use tracing::debug;

/// Writes the row set to `path` as an indented XML document.
pub fn write_xml(result: &QueryResult, path: &Path) -> Result<()> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_event(&mut writer, Event::Start(BytesStart::new("rows")))?;

    for row in &result.rows {
        write_event(&mut writer, Event::Start(BytesStart::new("row")))?;

        for (col, value) in result.columns.iter().zip(row.iter()) {
            let tag = element_name(&col.name);
            if value.is_null() {
                // An immediate Start/End pair would get a newline inserted
                // between the tags by the indenting writer, so emit the
                // self-closing form for empty elements instead.
                write_event(&mut writer, Event::Empty(BytesStart::new(tag.as_str())))?;
            } else {
                write_event(&mut writer, Event::Start(BytesStart::new(tag.as_str())))?;
                let text = value.to_display_string();
                write_event(&mut writer, Event::Text(BytesText::new(&text)))?;
                write_event(&mut writer, Event::End(BytesEnd::new(tag.as_str())))?;
            }
        }

        write_event(&mut writer, Event::End(BytesEnd::new("row")))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new("rows")))?;

    std::fs::write(path, writer.into_inner())
        .map_err(|e| ReportError::export(format!("{}: {e}", path.display())))?;

    debug!("Wrote {} rows to {}", result.row_count, path.display());
    Ok(())
}

fn write_event<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| ReportError::export(format!("XML serialization failed: {e}")))
}

/// Maps a column name to a valid XML element name.
///
/// Column names from the report catalog are already plain identifiers, but
/// ad-hoc aliases may contain characters XML forbids in names.
fn element_name(column: &str) -> String {
    let mut name: String = column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
