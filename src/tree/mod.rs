//! Rooted tree over a flat row table.
//!
//! The rows keep their table order, which several transforms rely on
//! (duplicate scoping, palette assignment). Two indexes are rebuilt on
//! every construction: rows by id and children by parent id, so "find
//! the children of X" never scans the table.

pub mod integrity;

use crate::parser::schema::Row;
use log::warn;
use std::collections::{HashMap, HashSet, VecDeque};

pub use integrity::{check_integrity, IntegrityReport};

/// Row table with parent/child adjacency
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaTree {
    rows: Vec<Row>,
    by_id: HashMap<String, Vec<usize>>,
    children: HashMap<String, Vec<usize>>,
}

impl AreaTree {
    /// Build a tree and its indexes from rows in table order
    ///
    /// **Public** - constructor
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut by_id: HashMap<String, Vec<usize>> = HashMap::new();
        let mut children: HashMap<String, Vec<usize>> = HashMap::new();

        for (pos, row) in rows.iter().enumerate() {
            by_id.entry(row.id.clone()).or_default().push(pos);
            if !row.parent.is_empty() {
                children.entry(row.parent.clone()).or_default().push(pos);
            }
        }

        Self {
            rows,
            by_id,
            children,
        }
    }

    /// Rows in table order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consume the tree, returning its rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row carrying `id`
    pub fn get(&self, id: &str) -> Option<&Row> {
        self.by_id
            .get(id)
            .and_then(|positions| positions.first())
            .map(|&pos| &self.rows[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Table positions of every row carrying `id`
    pub fn occurrences(&self, id: &str) -> &[usize] {
        self.by_id.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Table positions of the rows whose parent is `id`, in table order
    pub fn child_positions(&self, id: &str) -> &[usize] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows whose parent is `id`, in table order
    pub fn children<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Row> + 'a {
        self.child_positions(id).iter().map(move |&pos| &self.rows[pos])
    }

    /// Ids occurring on more than one row, in order of first appearance
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|row| self.occurrences(&row.id).len() > 1 && seen.insert(row.id.as_str()))
            .map(|row| row.id.as_str())
            .collect()
    }

    pub fn has_duplicates(&self) -> bool {
        self.by_id.values().any(|positions| positions.len() > 1)
    }

    /// Rows with an empty parent
    pub fn roots(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.is_root())
    }

    /// Table positions reachable from `root`, in depth-first pre-order
    ///
    /// Children are visited in table order. Each id is expanded once, so a
    /// cyclic parent chain terminates instead of recursing forever.
    pub fn subtree(&self, root: &str) -> Vec<usize> {
        let Some(&root_pos) = self.occurrences(root).first() else {
            return Vec::new();
        };

        let mut order = Vec::new();
        let mut visited: HashSet<usize> = HashSet::new();
        let mut expanded: HashSet<&str> = HashSet::new();
        let mut stack = vec![root_pos];

        while let Some(pos) = stack.pop() {
            if !visited.insert(pos) {
                warn!("Cycle detected at '{}', not descending again", self.rows[pos].id);
                continue;
            }
            order.push(pos);

            let id = self.rows[pos].id.as_str();
            if expanded.insert(id) {
                stack.extend(self.child_positions(id).iter().rev().copied());
            }
        }

        order
    }

    /// Depth of every id reachable from `root` (root is depth 0), breadth-first
    pub fn depths(&self, root: &str) -> HashMap<String, usize> {
        let mut depths = HashMap::new();
        if !self.contains(root) {
            return depths;
        }

        let mut queue = VecDeque::from([(root.to_string(), 0usize)]);
        depths.insert(root.to_string(), 0);

        while let Some((id, depth)) = queue.pop_front() {
            for child in self.children(&id) {
                if !depths.contains_key(&child.id) {
                    depths.insert(child.id.clone(), depth + 1);
                    queue.push_back((child.id.clone(), depth + 1));
                }
            }
        }

        depths
    }

    /// Sum of the known values of `id`'s direct children
    pub fn children_area(&self, id: &str) -> f64 {
        self.children(id).filter_map(|row| row.value).sum()
    }
}

impl From<Vec<Row>> for AreaTree {
    fn from(rows: Vec<Row>) -> Self {
        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AreaTree {
        AreaTree::from_rows(vec![
            Row::new("top", "", "Top", 10.0),
            Row::new("a", "top", "A", 6.0),
            Row::new("b", "top", "B", 0.3),
            Row::new("c", "a", "C", 1.0),
            Row::new("stray", "nowhere", "Stray", 2.0),
        ])
    }

    #[test]
    fn test_children_in_table_order() {
        let tree = sample();
        let ids: Vec<&str> = tree.children("top").map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_subtree_preorder_skips_unreachable() {
        let tree = sample();
        let ids: Vec<&str> = tree
            .subtree("top")
            .into_iter()
            .map(|pos| tree.rows()[pos].id.as_str())
            .collect();
        assert_eq!(ids, vec!["top", "a", "c", "b"]);
    }

    #[test]
    fn test_subtree_terminates_on_cycle() {
        let tree = AreaTree::from_rows(vec![
            Row::new("x", "y", "X", 1.0),
            Row::new("y", "x", "Y", 1.0),
        ]);
        assert_eq!(tree.subtree("x"), vec![0, 1]);
    }

    #[test]
    fn test_depths() {
        let depths = sample().depths("top");
        assert_eq!(depths["top"], 0);
        assert_eq!(depths["a"], 1);
        assert_eq!(depths["c"], 2);
        assert!(!depths.contains_key("stray"));
    }

    #[test]
    fn test_duplicate_ids() {
        let tree = AreaTree::from_rows(vec![
            Row::new("top", "", "Top", 10.0),
            Row::new("mem", "top", "Mem", 1.0),
            Row::new("mem", "top", "Mem", 1.0),
        ]);
        assert!(tree.has_duplicates());
        assert_eq!(tree.duplicate_ids(), vec!["mem"]);
        assert_eq!(tree.occurrences("mem"), &[1, 2]);
    }

    #[test]
    fn test_children_area_skips_missing() {
        let mut rows = sample().into_rows();
        rows[2].value = None;
        let tree = AreaTree::from_rows(rows);
        assert_eq!(tree.children_area("top"), 6.0);
    }
}
