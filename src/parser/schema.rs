//! Row and snapshot schema definitions.
//!
//! A hierarchy is carried between stages as a flat table of rows linked by
//! string parent pointers. The snapshot wraps a table with enough metadata to
//! reload it without re-parsing the report.

use serde::{Deserialize, Serialize};

/// One hierarchy instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Instance identity, unique once duplicates are resolved
    pub id: String,

    /// Id of the enclosing instance, empty for the root
    pub parent: String,

    /// Display name
    pub label: String,

    /// Area; `None` when the source field could not be read as a number
    pub value: Option<f64>,

    /// Display color, assigned by the color propagator
    pub color: Option<String>,
}

impl Row {
    /// Create an uncolored row
    ///
    /// **Public** - constructor
    pub fn new(
        id: impl Into<String>,
        parent: impl Into<String>,
        label: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            label: label.into(),
            value: Some(value),
            color: None,
        }
    }

    /// Whether this row has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_empty()
    }

    /// Area with missing values read as zero, for display only
    pub fn area(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

/// Serialized form of a finished tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// Schema version for compatibility checking
    pub version: String,

    /// Id of the displayed root
    pub top_module: String,

    /// Area of the top module
    pub total_area: f64,

    /// Rows in table order
    pub rows: Vec<Row>,

    /// Timestamp when the snapshot was generated
    pub generated_at: String,
}
