//! Structural checks on a row table.

use super::AreaTree;

/// Violations of the single-root, unique-id, resolvable-parent shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrityReport {
    /// Ids of rows with an empty parent
    pub roots: Vec<String>,

    /// Ids carried by more than one row
    pub duplicate_ids: Vec<String>,

    /// `(id, parent)` pairs whose parent is not an id in the table
    pub dangling: Vec<(String, String)>,

    /// Rows with a missing value
    pub missing_values: usize,

    /// Rows without a color
    pub uncolored: usize,
}

impl IntegrityReport {
    /// Exactly one root, unique ids and every parent resolvable
    pub fn is_valid(&self) -> bool {
        self.roots.len() == 1 && self.duplicate_ids.is_empty() && self.dangling.is_empty()
    }
}

/// Inspect a table for structural problems
///
/// **Public** - used by the validate command and tests
pub fn check_integrity(tree: &AreaTree) -> IntegrityReport {
    IntegrityReport {
        roots: tree.roots().map(|row| row.id.clone()).collect(),
        duplicate_ids: tree.duplicate_ids().into_iter().map(String::from).collect(),
        dangling: tree
            .rows()
            .iter()
            .filter(|row| !row.is_root() && !tree.contains(&row.parent))
            .map(|row| (row.id.clone(), row.parent.clone()))
            .collect(),
        missing_values: tree.rows().iter().filter(|row| row.value.is_none()).count(),
        uncolored: tree.rows().iter().filter(|row| row.color.is_none()).count(),
    }
}
