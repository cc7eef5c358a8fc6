//! Output writers for finished trees.
//!
//! This module handles writing data to disk in various formats:
//! - CSV tables (`id,parent,label,value,color`), reloadable without re-parsing
//! - JSON snapshots with metadata
//! - Text summaries for the terminal

pub mod json;
pub mod summary;
pub mod table;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

// Re-export main functions
pub use json::{read_snapshot, to_snapshot, write_snapshot};
pub use summary::generate_text_summary;
pub use table::{read_table, read_table_from_reader, write_table, write_table_to_writer};

/// Check that `path` can be written and create its parent directories
///
/// **Private** - shared by the writers
fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
