use crate::output::read_table;
use crate::tree::check_integrity;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a saved table file
pub fn validate_table_file(file_path: PathBuf) -> Result<()> {
    println!("Validating table: {}", file_path.display());

    let tree = read_table(&file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    let report = check_integrity(&tree);

    println!("  Rows: {}", tree.len());
    println!("  Roots: {}", report.roots.join(", "));
    println!("  Duplicate ids: {}", report.duplicate_ids.len());
    println!("  Dangling parents: {}", report.dangling.len());
    println!("  Missing values: {}", report.missing_values);
    println!("  Uncolored rows: {}", report.uncolored);

    for (id, parent) in report.dangling.iter().take(10) {
        println!("    {} -> {} (not found)", id, parent);
    }

    if !report.is_valid() {
        anyhow::bail!("Table is not a single-rooted tree with unique ids");
    }

    println!("✓ Valid table");
    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Area Plot Table Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Table Columns (CSV):");
        println!("  id: string      - Unique instance identifier");
        println!("  parent: string  - Id of the enclosing instance, empty for the root");
        println!("  label: string   - Display name");
        println!("  value: number   - Area, empty when unknown");
        println!("  color: string   - #RRGGBB or #RRGGBBAA, empty when uncolored");
        println!();
        println!("Snapshot (JSON):");
        println!("  version: string      - Schema version (e.g., '1.0.0')");
        println!("  top_module: string   - Id of the displayed root");
        println!("  total_area: number   - Area of the top module");
        println!("  rows: array          - Table rows as objects");
        println!("  generated_at: string - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Area Plot v{}", env!("CARGO_PKG_VERSION"));
    println!("Table Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Hierarchical area-report normalization for treemap and sunburst plots.");
}
