//! JSON snapshot writer.
//!
//! Writes TreeSnapshot structs to JSON files with proper formatting.

use super::prepare_output_path;
use crate::parser::schema::TreeSnapshot;
use crate::tree::AreaTree;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Wrap a finished tree with its metadata
///
/// **Public** - used by commands to create final output
pub fn to_snapshot(tree: &AreaTree, top_module: &str) -> TreeSnapshot {
    TreeSnapshot {
        version: SCHEMA_VERSION.to_string(),
        top_module: top_module.to_string(),
        total_area: tree.get(top_module).map(|row| row.area()).unwrap_or(0.0),
        rows: tree.rows().to_vec(),
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Write a snapshot to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_snapshot(
    snapshot: &TreeSnapshot,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing snapshot to: {}", output_path.display());

    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, snapshot).map_err(OutputError::SerializationFailed)?;

    info!(
        "Snapshot written successfully ({} bytes)",
        std::fs::metadata(output_path).map(|m| m.len()).unwrap_or(0)
    );

    Ok(())
}

/// Read a snapshot from a JSON file
///
/// **Public** - useful for validation and testing
pub fn read_snapshot(input_path: impl AsRef<Path>) -> Result<TreeSnapshot, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading snapshot from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let snapshot: TreeSnapshot =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Snapshot loaded: version {}, top {}",
        snapshot.version, snapshot.top_module
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::Row;
    use tempfile::NamedTempFile;

    fn sample() -> AreaTree {
        AreaTree::from_rows(vec![
            Row::new("top", "", "Top", 10.0),
            Row::new("a", "top", "A", 6.0),
        ])
    }

    #[test]
    fn test_to_snapshot() {
        let snapshot = to_snapshot(&sample(), "top");
        assert_eq!(snapshot.version, SCHEMA_VERSION);
        assert_eq!(snapshot.total_area, 10.0);
        assert_eq!(snapshot.rows.len(), 2);
    }

    #[test]
    fn test_write_and_read_snapshot() {
        let snapshot = to_snapshot(&sample(), "top");
        let temp_file = NamedTempFile::new().unwrap();

        write_snapshot(&snapshot, temp_file.path()).unwrap();
        let loaded = read_snapshot(temp_file.path()).unwrap();

        assert_eq!(loaded.top_module, "top");
        assert_eq!(loaded.rows, snapshot.rows);
    }
}
