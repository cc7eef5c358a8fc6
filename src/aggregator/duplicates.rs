//! Disambiguation of instance names reused across subtrees.
//!
//! Reports name an instance by its leaf segment only, so the same memory
//! macro instantiated in two cores yields two rows with id `mem`, and their
//! children both point at `mem`. Every occurrence is renamed `mem_1`,
//! `mem_2`, ... and children are re-pointed to the occurrence that precedes
//! them in the table.

use crate::tree::AreaTree;
use crate::utils::error::TreeError;
use log::{debug, info, warn};

/// Give every duplicated id a unique, numbered identity
///
/// **Public** - main entry point for duplicate resolution
///
/// # Arguments
/// * `tree` - Parsed tree, possibly with repeated ids
/// * `root` - Id of the designated top module
///
/// # Returns
/// A tree whose ids are unique. An already-unique tree is returned unchanged.
///
/// # Scoping
/// Occurrence `k` of a duplicated id owns the rows between itself and the
/// next occurrence of the same id (or the end of the table). Rows in that run
/// whose parent is the duplicated id are re-pointed to `{id}_{k}`; rows
/// outside every run keep their parent.
///
/// # Errors
/// * `TreeError::NamingConflict` - The root id itself occurs more than once
pub fn resolve_duplicates(tree: &AreaTree, root: &str) -> Result<AreaTree, TreeError> {
    let duplicates = tree.duplicate_ids();

    if duplicates.is_empty() {
        debug!("No duplicate ids found");
        return Ok(tree.clone());
    }

    if duplicates.contains(&root) {
        return Err(TreeError::NamingConflict {
            id: root.to_string(),
        });
    }

    info!("Resolving {} duplicated ids", duplicates.len());

    let mut rows = tree.rows().to_vec();

    for id in duplicates {
        let positions = tree.occurrences(id);
        debug!("'{}' occurs {} times", id, positions.len());

        for (k, &start) in positions.iter().enumerate() {
            let end = positions.get(k + 1).copied().unwrap_or(rows.len());
            let new_id = format!("{}_{}", id, k + 1);

            if tree.contains(&new_id) {
                warn!("Renamed instance '{}' collides with an existing id", new_id);
            }

            for row in rows[start + 1..end].iter_mut() {
                if row.parent == id {
                    row.parent = new_id.clone();
                }
            }

            rows[start].id = new_id;
        }
    }

    Ok(AreaTree::from_rows(rows))
}
