//! Removal of pass-through hierarchy levels.
//!
//! Elided rows disappear and their direct children are attached to the
//! elided row's own parent, so no area becomes unreachable. The lookup is a
//! single hop on the pre-removal table: a child of a wrapper nested in
//! another wrapper ends up pointing at the outer wrapper, which survives
//! that pass and goes on the next one.

use crate::tree::AreaTree;
use crate::utils::config::DEFAULT_WRAPPER_PATTERN;
use log::{debug, info, warn};
use std::collections::HashSet;

/// Case-insensitive substring match on instance ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    needle: String,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            needle: pattern.to_lowercase(),
        }
    }

    /// Pattern for the conventional `wrapper` instances
    pub fn wrappers() -> Self {
        Self::new(DEFAULT_WRAPPER_PATTERN)
    }

    pub fn matches(&self, id: &str) -> bool {
        id.to_lowercase().contains(&self.needle)
    }
}

/// Remove every row selected by `predicate`, re-parenting its children
///
/// **Public** - generic elision over any id predicate
///
/// # Arguments
/// * `tree` - Input tree
/// * `predicate` - Returns true for ids to elide
///
/// # Returns
/// The tree without the selected rows; children of a removed row now point
/// at the removed row's pre-removal parent. When that parent is itself
/// selected it is kept for another pass, so no row is left pointing at a
/// missing parent. Each pass peels off one level of nested matches.
pub fn remove_matching<F>(tree: &AreaTree, predicate: F) -> AreaTree
where
    F: Fn(&str) -> bool,
{
    let matched: HashSet<&str> = tree
        .rows()
        .iter()
        .filter(|row| predicate(&row.id))
        .map(|row| row.id.as_str())
        .collect();

    if matched.is_empty() {
        return tree.clone();
    }

    let grandparent = |parent: &str| -> String {
        tree.get(parent)
            .map(|elided| elided.parent.clone())
            .unwrap_or_default()
    };

    // Matched rows that would receive children of another matched row
    let deferred: HashSet<String> = tree
        .rows()
        .iter()
        .filter(|row| matched.contains(row.parent.as_str()))
        .map(|row| grandparent(row.parent.as_str()))
        .filter(|target| matched.contains(target.as_str()))
        .collect();

    for id in &deferred {
        warn!("'{}' keeps nested matches below it until the next pass", id);
    }

    let removed: HashSet<&str> = matched
        .into_iter()
        .filter(|id| !deferred.contains(*id))
        .collect();

    debug!("Eliding {} instances", removed.len());

    let mut rows = Vec::with_capacity(tree.len());

    for row in tree.rows() {
        if removed.contains(row.id.as_str()) {
            continue;
        }

        let mut row = row.clone();
        if removed.contains(row.parent.as_str()) {
            row.parent = grandparent(row.parent.as_str());
        }
        rows.push(row);
    }

    info!("Removed {} rows", tree.len() - rows.len());
    AreaTree::from_rows(rows)
}

/// Repeat [`remove_matching`] until a pass removes nothing
///
/// **Public** - full elision of nested matches
pub fn remove_matching_all<F>(tree: &AreaTree, predicate: F) -> AreaTree
where
    F: Fn(&str) -> bool,
{
    let mut current = remove_matching(tree, &predicate);
    loop {
        let next = remove_matching(&current, &predicate);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

/// Elide all instances whose id contains `wrapper` (any case)
///
/// **Public** - applied by the build pipeline after thresholding
pub fn remove_wrappers(tree: &AreaTree) -> AreaTree {
    let pattern = NamePattern::wrappers();
    remove_matching(tree, |id| pattern.matches(id))
}

/// Elide all instances whose id contains `module_name` (any case)
///
/// **Public** - ad-hoc exclusions requested by the caller
pub fn remove_module(tree: &AreaTree, module_name: &str) -> AreaTree {
    let pattern = NamePattern::new(module_name);
    remove_matching(tree, |id| pattern.matches(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::Row;

    fn wrapped() -> AreaTree {
        AreaTree::from_rows(vec![
            Row::new("top", "", "Top", 10.0),
            Row::new("core_Wrapper", "top", "Core Wrapper", 8.0),
            Row::new("core", "core_Wrapper", "Core", 8.0),
            Row::new("alu", "core", "Alu", 3.0),
            Row::new("io", "top", "Io", 2.0),
        ])
    }

    #[test]
    fn test_name_pattern_case_insensitive() {
        let pattern = NamePattern::wrappers();
        assert!(pattern.matches("core_WRAPPER_i"));
        assert!(!pattern.matches("core"));
    }

    #[test]
    fn test_remove_wrappers_reparents_children() {
        let tree = remove_wrappers(&wrapped());
        assert!(tree.get("core_Wrapper").is_none());
        assert_eq!(tree.get("core").unwrap().parent, "top");
        assert_eq!(tree.get("alu").unwrap().parent, "core");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_remove_module_custom_pattern() {
        let once = remove_module(&wrapped(), "CORE");
        let ids: Vec<&str> = once.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "core_Wrapper", "alu", "io"]);
        assert_eq!(once.get("alu").unwrap().parent, "core_Wrapper");

        let twice = remove_module(&once, "CORE");
        let ids: Vec<&str> = twice.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "alu", "io"]);
        assert_eq!(twice.get("alu").unwrap().parent, "top");
    }

    #[test]
    fn test_no_match_is_noop() {
        let tree = wrapped();
        assert_eq!(remove_module(&tree, "fpu"), tree);
    }

    #[test]
    fn test_nested_wrappers_single_hop() {
        let tree = AreaTree::from_rows(vec![
            Row::new("top", "", "Top", 10.0),
            Row::new("outer_wrapper", "top", "Outer Wrapper", 8.0),
            Row::new("inner_wrapper", "outer_wrapper", "Inner Wrapper", 8.0),
            Row::new("leaf", "inner_wrapper", "Leaf", 8.0),
        ]);

        let once = remove_wrappers(&tree);
        let ids: Vec<&str> = once.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "outer_wrapper", "leaf"]);
        assert_eq!(once.get("leaf").unwrap().parent, "outer_wrapper");
        assert_eq!(once.get("outer_wrapper").unwrap().parent, "top");

        let twice = remove_wrappers(&once);
        assert_eq!(twice.len(), 2);
        assert_eq!(twice.get("leaf").unwrap().parent, "top");
    }

    #[test]
    fn test_remove_matching_all_three_levels() {
        let tree = AreaTree::from_rows(vec![
            Row::new("top", "", "Top", 10.0),
            Row::new("w1_wrapper", "top", "W1", 8.0),
            Row::new("w2_wrapper", "w1_wrapper", "W2", 8.0),
            Row::new("w3_wrapper", "w2_wrapper", "W3", 8.0),
            Row::new("leaf", "w3_wrapper", "Leaf", 8.0),
            Row::new("side", "w1_wrapper", "Side", 1.0),
        ]);

        let pattern = NamePattern::wrappers();
        let elided = remove_matching_all(&tree, |id| pattern.matches(id));

        let ids: Vec<&str> = elided.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "leaf", "side"]);
        assert_eq!(elided.get("leaf").unwrap().parent, "top");
        assert_eq!(elided.get("side").unwrap().parent, "top");
    }
}
