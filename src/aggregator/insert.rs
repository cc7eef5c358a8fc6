//! Row insertion: caller-supplied modules and self-area remainders.

use crate::parser::schema::Row;
use crate::tree::AreaTree;
use crate::utils::config::REMAINDER_SUFFIX;
use crate::utils::error::TreeError;
use log::{debug, info};
use std::collections::HashSet;

/// Add a module the report does not list
///
/// **Public** - manual corrections to a parsed hierarchy
///
/// # Arguments
/// * `tree` - Input tree
/// * `module_name` - Id (and label) of the new row
/// * `parent_name` - Case-insensitive fragment of the parent's id; the first
///   matching row in table order becomes the parent
/// * `area` - Area of the new module
///
/// # Returns
/// The tree with the new row appended and `area` added to every ancestor up
/// to the root, so parents keep accounting for their children.
///
/// # Errors
/// * `TreeError::ParentNotFound` - No id contains `parent_name`
pub fn add_module(
    tree: &AreaTree,
    module_name: &str,
    parent_name: &str,
    area: f64,
) -> Result<AreaTree, TreeError> {
    let needle = parent_name.to_lowercase();
    let parent_id = tree
        .rows()
        .iter()
        .find(|row| row.id.to_lowercase().contains(&needle))
        .map(|row| row.id.clone())
        .ok_or_else(|| TreeError::ParentNotFound(parent_name.to_string()))?;

    info!("Adding '{}' ({}) under '{}'", module_name, area, parent_id);

    let mut rows = tree.rows().to_vec();
    rows.push(Row::new(module_name, parent_id.as_str(), module_name, area));

    let mut seen: HashSet<String> = HashSet::new();
    let mut current = parent_id;
    while !current.is_empty() && seen.insert(current.clone()) {
        let positions = tree.occurrences(&current);
        let Some(&first) = positions.first() else {
            break;
        };
        for &pos in positions {
            if let Some(value) = rows[pos].value.as_mut() {
                *value += area;
            }
        }
        current = rows[first].parent.clone();
    }

    Ok(AreaTree::from_rows(rows))
}

/// Insert a `{id}_cum` row for the area a parent does not hand to its children
///
/// **Public** - prepares a table for "remainder" rendering, where a parent's
/// value is drawn as the sum of its children
///
/// Each row is inserted directly after its parent and only when the
/// remainder is positive; parents whose children cover their whole area (or
/// more) are left alone.
pub fn fill_remainders(tree: &AreaTree) -> AreaTree {
    let mut rows = Vec::with_capacity(tree.len());
    let mut added = 0;

    for row in tree.rows() {
        rows.push(row.clone());

        let Some(value) = row.value else {
            continue;
        };
        if tree.child_positions(&row.id).is_empty() {
            continue;
        }

        let remainder = value - tree.children_area(&row.id);
        if remainder > 0.0 {
            let id = format!("{}{}", row.id, REMAINDER_SUFFIX);
            debug!("Self area of '{}': {:.4}", row.id, remainder);
            rows.push(Row {
                label: id.clone(),
                id,
                parent: row.id.clone(),
                value: Some(remainder),
                color: None,
            });
            added += 1;
        }
    }

    info!("Added {} remainder rows", added);
    AreaTree::from_rows(rows)
}
