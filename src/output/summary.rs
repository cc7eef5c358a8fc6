//! Terminal summary of a finished tree.

use crate::tree::AreaTree;
use std::collections::HashSet;

const BAR_WIDTH: usize = 30;

/// Render the tree under `root` as an indented table
///
/// Each line shows the instance label, its area, its share of the parent and
/// a bar proportional to its share of the root. Levels deeper than
/// `max_depth` are omitted.
pub fn generate_text_summary(tree: &AreaTree, root: &str, max_depth: usize) -> String {
    let mut lines = Vec::new();

    lines.push("  AREA BREAKDOWN".to_string());
    lines.push(format!("  {}", "━".repeat(86)));
    lines.push(format!(
        "  {:<40} {:>14} {:>8}  {}",
        "Instance", "Area", "% parent", "% total"
    ));
    lines.push(format!("  {}", "━".repeat(86)));

    let Some(top) = tree.get(root) else {
        lines.push(format!("  (top module '{}' not found)", root));
        return lines.join("\n");
    };
    let total = top.area();

    let mut visited = HashSet::new();
    let mut stack = vec![(root.to_string(), 0usize, 100.0f64)];

    while let Some((id, depth, parent_share)) = stack.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }
        let Some(row) = tree.get(&id) else {
            continue;
        };

        let share_of_total = if total > 0.0 {
            100.0 * row.area() / total
        } else {
            0.0
        };
        let bar = "█".repeat(((share_of_total / 100.0) * BAR_WIDTH as f64) as usize);

        let name = format!("{}{}", "  ".repeat(depth), row.label);
        let name = if name.chars().count() > 40 {
            let head: String = name.chars().take(37).collect();
            format!("{}...", head)
        } else {
            name
        };

        let value = row
            .value
            .map(|v| format!("{:.3}", v))
            .unwrap_or_else(|| "-".to_string());

        lines.push(format!(
            "  {:<40} {:>14} {:>7.1}%  {}",
            name, value, parent_share, bar
        ));

        if depth < max_depth {
            let parent_area = row.area();
            let children: Vec<_> = tree.children(&id).collect();
            for child in children.into_iter().rev() {
                let share = if parent_area > 0.0 {
                    100.0 * child.area() / parent_area
                } else {
                    0.0
                };
                stack.push((child.id.clone(), depth + 1, share));
            }
        }
    }

    lines.push(format!("  {}", "━".repeat(86)));
    lines.join("\n")
}
