//! CSV table reader and writer.
//!
//! The table is the hand-off format for renderers and lets a resolved tree be
//! reloaded without parsing the report again.

use super::prepare_output_path;
use crate::parser::schema::Row;
use crate::tree::AreaTree;
use crate::utils::config::TABLE_COLUMNS;
use crate::utils::error::OutputError;
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Row as stored on disk; `value` stays text until coerced
#[derive(Debug, Deserialize)]
struct TableRecord {
    id: String,
    #[serde(default)]
    parent: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    value: String,
    #[serde(default)]
    color: String,
}

/// Read a number, mapping blanks and anything unreadable to missing
fn coerce_value(raw: &str, id: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!("Non-numeric area '{}' for '{}' treated as missing", raw, id);
            None
        }
    }
}

/// Write a tree as CSV to any writer
///
/// **Public** - used by write_table and tests
pub fn write_table_to_writer<W: Write>(tree: &AreaTree, writer: W) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(TABLE_COLUMNS)?;

    for row in tree.rows() {
        let value = row.value.map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record([
            row.id.as_str(),
            row.parent.as_str(),
            row.label.as_str(),
            value.as_str(),
            row.color.as_deref().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a tree to a CSV file
///
/// **Public** - main entry point for table output
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent
///   cannot be created
/// * `OutputError::Csv` / `OutputError::WriteFailed` - I/O error during write
pub fn write_table(tree: &AreaTree, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing table to: {}", output_path.display());

    prepare_output_path(output_path)?;
    let file = File::create(output_path)?;
    write_table_to_writer(tree, file)?;

    debug!("Wrote {} rows", tree.len());
    Ok(())
}

/// Read a CSV table from any reader
///
/// **Public** - used by read_table and tests
///
/// # Errors
/// * `OutputError::InvalidTable` - `id` or `parent` column missing
/// * `OutputError::Csv` - Malformed CSV
pub fn read_table_from_reader<R: Read>(reader: R) -> Result<AreaTree, OutputError> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?.clone();
    for required in ["id", "parent"] {
        if !headers.iter().any(|h| h == required) {
            return Err(OutputError::InvalidTable(format!(
                "missing '{}' column",
                required
            )));
        }
    }

    let mut rows = Vec::new();
    for record in rdr.deserialize::<TableRecord>() {
        let record = record?;
        let value = coerce_value(&record.value, &record.id);
        rows.push(Row {
            value,
            color: (!record.color.is_empty()).then_some(record.color),
            id: record.id,
            parent: record.parent,
            label: record.label,
        });
    }

    Ok(AreaTree::from_rows(rows))
}

/// Read a CSV table from a file
///
/// **Public** - alternative input to report parsing
pub fn read_table(input_path: impl AsRef<Path>) -> Result<AreaTree, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading table from: {}", input_path.display());

    let file = File::open(input_path)?;
    let tree = read_table_from_reader(file)?;

    info!("Loaded {} rows from {}", tree.len(), input_path.display());
    Ok(tree)
}
