//! Depth limiting below the displayed root.

use crate::tree::AreaTree;
use crate::utils::error::TreeError;
use log::debug;

/// Keep only rows at most `max_depth` levels below `root`
///
/// **Public** - applies the renderer's depth limit to the table itself
///
/// The root is level 0 and is not counted: `max_depth == 1` keeps the root
/// and its children.
///
/// Rows keep their table order. Rows not reachable from `root` are dropped,
/// and the root's parent is cleared.
///
/// # Errors
/// * `TreeError::RootNotFound` - `root` is absent from a non-empty tree
pub fn limit_depth(tree: &AreaTree, root: &str, max_depth: usize) -> Result<AreaTree, TreeError> {
    if tree.is_empty() {
        return Ok(AreaTree::default());
    }
    if !tree.contains(root) {
        return Err(TreeError::RootNotFound(root.to_string()));
    }

    let depths = tree.depths(root);
    let mut root_seen = false;

    let rows: Vec<_> = tree
        .rows()
        .iter()
        .filter(|row| depths.get(&row.id).is_some_and(|&d| d <= max_depth))
        .cloned()
        .map(|mut row| {
            if row.id == root && !root_seen {
                row.parent.clear();
                root_seen = true;
            }
            row
        })
        .collect();

    debug!(
        "Depth limit {}: kept {} of {} rows",
        max_depth,
        rows.len(),
        tree.len()
    );

    Ok(AreaTree::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::Row;

    #[test]
    fn test_limit_depth() {
        let tree = AreaTree::from_rows(vec![
            Row::new("top", "", "Top", 10.0),
            Row::new("a", "top", "A", 6.0),
            Row::new("b", "a", "B", 3.0),
            Row::new("c", "b", "C", 1.0),
        ]);

        let limited = limit_depth(&tree, "top", 2).unwrap();
        let ids: Vec<&str> = limited.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "a", "b"]);
    }

    #[test]
    fn test_limit_depth_reroots() {
        let tree = AreaTree::from_rows(vec![
            Row::new("top", "", "Top", 10.0),
            Row::new("a", "top", "A", 6.0),
            Row::new("b", "a", "B", 3.0),
        ]);

        let limited = limit_depth(&tree, "a", 1).unwrap();
        assert_eq!(limited.len(), 2);
        assert!(limited.get("a").unwrap().is_root());
    }

    #[test]
    fn test_limit_depth_does_not_count_root() {
        let tree = AreaTree::from_rows(vec![
            Row::new("top", "", "Top", 10.0),
            Row::new("a", "top", "A", 6.0),
            Row::new("b", "a", "B", 3.0),
        ]);

        let limited = limit_depth(&tree, "top", 1).unwrap();
        let ids: Vec<&str> = limited.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "a"]);
    }
}
