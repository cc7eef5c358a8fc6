//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading an area report
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read report: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("No area found for component '{0}'")]
    ComponentNotFound(String),
}

/// Errors raised by the tree transforms
#[derive(Error, Debug, PartialEq)]
pub enum TreeError {
    #[error("Cannot choose among multiple instances of the top module '{id}'")]
    NamingConflict { id: String },

    #[error("Parent module '{0}' not found")]
    ParentNotFound(String),

    #[error("Top module '{0}' not found in the hierarchy")]
    RootNotFound(String),

    #[error("Invalid hex color '{0}', expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    #[error("Palette must contain at least one color")]
    EmptyPalette,
}

/// Errors that can occur during table and snapshot I/O
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Invalid table: {0}")]
    InvalidTable(String),
}
