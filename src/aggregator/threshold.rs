//! Significance pruning with "others" aggregation.
//!
//! Children smaller than a fraction of their parent are folded, together
//! with everything below them, into one synthetic `{parent}_others` child so
//! the parent's children still account for the same area.

use crate::parser::schema::Row;
use crate::tree::AreaTree;
use crate::utils::config::{OTHERS_LABEL, OTHERS_SUFFIX};
use crate::utils::error::TreeError;
use log::{debug, info};
use std::collections::{HashMap, HashSet};

/// Restrict the tree to `root`'s subtree and fold insignificant children
///
/// **Public** - main entry point for threshold aggregation
///
/// # Arguments
/// * `tree` - Tree with unique ids
/// * `root` - Id of the displayed top module
/// * `threshold` - Fraction τ in (0, 1) of the parent area a child needs to be kept
///
/// # Returns
/// The reachable rows in depth-first order (root's parent cleared), minus
/// pruned subtrees, followed by one "others" row per parent that lost
/// children. Rows not reachable from `root` are dropped.
///
/// A child with a missing value is never pruned and never counted; a parent
/// with a zero or missing value prunes nothing.
///
/// # Errors
/// * `TreeError::RootNotFound` - `root` is absent from a non-empty tree
pub fn apply_threshold(tree: &AreaTree, root: &str, threshold: f64) -> Result<AreaTree, TreeError> {
    if tree.is_empty() {
        return Ok(AreaTree::default());
    }

    let order = tree.subtree(root);
    let Some(&root_pos) = order.first() else {
        return Err(TreeError::RootNotFound(root.to_string()));
    };

    let unreachable = tree.len() - order.len();
    if unreachable > 0 {
        debug!("Dropping {} rows outside the '{}' subtree", unreachable, root);
    }

    let rows = tree.rows();
    let mut pruned: HashSet<usize> = HashSet::new();
    let mut processed: HashSet<&str> = HashSet::new();
    let mut others: Vec<Row> = Vec::new();
    let mut merged_others: HashMap<usize, f64> = HashMap::new();

    for &pos in &order {
        let parent = &rows[pos];
        if pruned.contains(&pos) || !processed.insert(parent.id.as_str()) {
            continue;
        }

        let Some(parent_value) = parent.value else {
            continue;
        };
        let limit = threshold * parent_value;
        let others_id = format!("{}{}", parent.id, OTHERS_SUFFIX);

        let mut other_value = 0.0;
        let mut existing_others = None;

        for &child_pos in tree.child_positions(&parent.id) {
            if child_pos == root_pos || pruned.contains(&child_pos) {
                continue;
            }
            let Some(child_value) = rows[child_pos].value else {
                continue;
            };

            if child_value < limit {
                other_value += child_value;
                prune_subtree(tree, child_pos, &mut pruned);
            } else if rows[child_pos].id == others_id {
                existing_others = Some(child_pos);
            }
        }

        if other_value > 0.0 {
            debug!(
                "Folding {:.4} of '{}' into {}",
                other_value, parent.id, others_id
            );
            match existing_others {
                Some(others_pos) => *merged_others.entry(others_pos).or_insert(0.0) += other_value,
                None => others.push(Row {
                    id: others_id,
                    parent: parent.id.clone(),
                    label: OTHERS_LABEL.to_string(),
                    value: Some(other_value),
                    color: None,
                }),
            }
        }
    }

    let mut kept: Vec<Row> = order
        .iter()
        .filter(|&&pos| !pruned.contains(&pos))
        .map(|&pos| {
            let mut row = rows[pos].clone();
            if let Some(extra) = merged_others.get(&pos) {
                row.value = row.value.map(|v| v + extra);
            }
            row
        })
        .collect();

    if let Some(first) = kept.first_mut() {
        first.parent.clear();
    }

    info!(
        "Threshold {:.3}: pruned {} rows, added {} others rows",
        threshold,
        pruned.len(),
        others.len()
    );

    kept.extend(others);
    Ok(AreaTree::from_rows(kept))
}

/// Mark `pos` and all of its descendants as pruned
fn prune_subtree(tree: &AreaTree, pos: usize, pruned: &mut HashSet<usize>) {
    if !pruned.insert(pos) {
        return;
    }
    for &child in tree.child_positions(&tree.rows()[pos].id) {
        prune_subtree(tree, child, pruned);
    }
}
