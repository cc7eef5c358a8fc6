//! Area shares and distribution statistics.
//!
//! Shares express every instance as a percentage of its parent; the
//! distribution summarizes a finished tree for logging and reports.

use crate::tree::AreaTree;
use crate::utils::config::OTHERS_SUFFIX;
use log::debug;

/// An instance's area relative to its parent
///
/// **Public** - returned from area_shares
#[derive(Debug, Clone, PartialEq)]
pub struct AreaShare {
    pub id: String,
    pub parent: String,
    pub value: Option<f64>,
    /// Percentage of the parent's area, 0 when the parent's area is 0 or unknown
    pub percent: f64,
}

/// Compute every non-root row's percentage of its parent
///
/// **Public** - main entry point for share calculation
///
/// # Returns
/// One share per non-root row, in table order
pub fn area_shares(tree: &AreaTree) -> Vec<AreaShare> {
    tree.rows()
        .iter()
        .filter(|row| !row.is_root())
        .map(|row| {
            let parent_value = tree.get(&row.parent).and_then(|p| p.value);
            let percent = match (row.value, parent_value) {
                (Some(v), Some(p)) if p != 0.0 => 100.0 * v / p,
                _ => 0.0,
            };

            AreaShare {
                id: row.id.clone(),
                parent: row.parent.clone(),
                value: row.value,
                percent,
            }
        })
        .collect()
}

/// Calculate distribution statistics for the subtree under `root`
///
/// **Public** - provides summary statistics
///
/// # Arguments
/// * `tree` - Finished tree
/// * `root` - Displayed top module
///
/// # Returns
/// Statistics about the area distribution
pub fn calculate_area_distribution(tree: &AreaTree, root: &str) -> AreaDistribution {
    let order = tree.subtree(root);
    if order.is_empty() {
        return AreaDistribution::default();
    }

    let rows = tree.rows();
    let depths = tree.depths(root);

    let total_area = rows[order[0]].value.unwrap_or(0.0);
    let leaf_count = order
        .iter()
        .filter(|&&pos| tree.child_positions(&rows[pos].id).is_empty())
        .count();
    let max_depth = depths.values().copied().max().unwrap_or(0);
    let missing_values = order.iter().filter(|&&pos| rows[pos].value.is_none()).count();
    let others_area: f64 = order
        .iter()
        .map(|&pos| &rows[pos])
        .filter(|row| row.id.ends_with(OTHERS_SUFFIX))
        .filter_map(|row| row.value)
        .sum();

    let largest_child = tree
        .children(root)
        .filter_map(|row| row.value.map(|v| (row.id.clone(), v)))
        .max_by(|a, b| a.1.total_cmp(&b.1));

    let dist = AreaDistribution {
        total_area,
        node_count: order.len(),
        leaf_count,
        max_depth,
        missing_values,
        others_area,
        largest_child,
    };

    debug!("Area distribution: {}", dist.summary());
    dist
}

/// Area distribution statistics
///
/// **Public** - returned from calculate_area_distribution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaDistribution {
    /// Area of the root
    pub total_area: f64,

    /// Number of reachable instances, root included
    pub node_count: usize,

    /// Instances without children
    pub leaf_count: usize,

    /// Deepest level below the root
    pub max_depth: usize,

    /// Instances whose area could not be read
    pub missing_values: usize,

    /// Area folded into "others" rows
    pub others_area: f64,

    /// Largest first-generation child and its area
    pub largest_child: Option<(String, f64)>,
}

impl AreaDistribution {
    /// Percentage of the total held by "others" rows
    pub fn others_percentage(&self) -> f64 {
        if self.total_area > 0.0 {
            100.0 * self.others_area / self.total_area
        } else {
            0.0
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {:.3} | Nodes: {} | Leaves: {} | Depth: {} | Others: {:.1}%",
            self.total_area,
            self.node_count,
            self.leaf_count,
            self.max_depth,
            self.others_percentage()
        )
    }
}
