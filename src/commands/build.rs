//! Build command implementation.
//!
//! The build command:
//! 1. Loads the hierarchy (report or saved table)
//! 2. Resolves duplicate instance names
//! 3. Folds insignificant instances into "others"
//! 4. Elides wrappers and excluded modules, applies the depth limit
//! 5. Propagates colors
//! 6. Writes the table and snapshot

use super::models::{BuildArgs, InputSource};
use crate::aggregator::{
    apply_threshold, assign_colors, calculate_area_distribution, fill_remainders, limit_depth,
    remove_matching_all, resolve_duplicates, NamePattern, Rgba,
};
use crate::output::{generate_text_summary, read_table, to_snapshot, write_snapshot, write_table};
use crate::parser::{parse_report_file, ParseOptions};
use crate::tree::AreaTree;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Result of a successful build
///
/// **Public** - returned to main.rs and tests
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Top module the tree is rooted at
    pub top_module: String,

    /// Final pruned, colored tree
    pub tree: AreaTree,

    /// Table after duplicate resolution, before pruning
    pub resolved_table: PathBuf,

    /// Final table
    pub table: PathBuf,

    /// Final JSON snapshot
    pub snapshot: PathBuf,
}

/// Execute the build command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable input files
/// * Empty hierarchy or unknown top module
/// * Ambiguous top module during duplicate resolution
/// * File write errors
pub fn execute_build(args: BuildArgs) -> Result<BuildOutcome> {
    let start_time = Instant::now();

    // Step 1: Load hierarchy
    info!("Step 1/6: Loading hierarchy...");
    let tree = match args.input() {
        Some(InputSource::Report(path)) => {
            let options = ParseOptions {
                drop_total_line: !args.keep_total_line,
            };
            let rows = parse_report_file(&path, &options)
                .with_context(|| format!("Failed to parse report {}", path.display()))?;
            AreaTree::from_rows(rows)
        }
        Some(InputSource::Table(path)) => read_table(&path)
            .with_context(|| format!("Failed to load table {}", path.display()))?,
        None => anyhow::bail!("Exactly one of report or table must be given"),
    };

    let Some(first) = tree.rows().first() else {
        anyhow::bail!("No hierarchy rows found in input");
    };

    let top_module = args.top_module.clone().unwrap_or_else(|| first.id.clone());
    if !tree.contains(&top_module) {
        anyhow::bail!("Top module '{}' not found in the hierarchy", top_module);
    }
    info!("Selected top-level module: {}", top_module);

    // Step 2: Resolve duplicates
    let tree = if args.skip_rename {
        info!("Step 2/6: Skipping duplicate resolution (requested)");
        if tree.has_duplicates() {
            warn!("Duplicate ids present; parent links may be ambiguous");
        }
        tree
    } else {
        info!("Step 2/6: Resolving duplicate instance names...");
        resolve_duplicates(&tree, &top_module).context("Failed to resolve duplicates")?
    };

    let resolved_table = args.out_dir.join(format!("{}.csv", top_module));
    write_table(&tree, &resolved_table).context("Failed to write resolved table")?;

    // Step 3: Threshold
    let tree = if args.threshold > 0.0 && args.threshold < 1.0 {
        info!(
            "Step 3/6: Folding instances below {:.1}% of their parent...",
            args.threshold * 100.0
        );
        apply_threshold(&tree, &top_module, args.threshold)
            .context("Failed to apply threshold")?
    } else {
        info!("Step 3/6: Skipping threshold (no pruning requested)");
        tree
    };

    // Step 4: Elision and depth limit
    info!("Step 4/6: Removing wrappers and excluded modules...");
    // The top module is never elided, even when its name matches
    let wrappers = NamePattern::wrappers();
    let mut tree = remove_matching_all(&tree, |id| id != top_module && wrappers.matches(id));
    for module in &args.exclude {
        debug!("Excluding modules matching '{}'", module);
        let pattern = NamePattern::new(module);
        tree = remove_matching_all(&tree, |id| id != top_module && pattern.matches(id));
    }
    let mut tree = limit_depth(&tree, &top_module, args.max_depth)
        .context("Failed to apply depth limit")?;
    if args.remainder {
        tree = fill_remainders(&tree);
    }

    // Step 5: Colors
    info!("Step 5/6: Assigning colors...");
    let tree = assign_colors(&tree, &top_module, &args.palette, args.fade)
        .context("Failed to assign colors")?;

    let dist = calculate_area_distribution(&tree, &top_module);
    info!("Area distribution: {}", dist.summary());

    // Step 6: Write outputs
    info!("Step 6/6: Writing output files...");
    let table = args.out_dir.join(format!("{}_tree.csv", top_module));
    write_table(&tree, &table).context("Failed to write table")?;
    info!("✓ Table written to: {}", table.display());

    let snapshot = args.out_dir.join(format!("{}_tree.json", top_module));
    write_snapshot(&to_snapshot(&tree, &top_module), &snapshot)
        .context("Failed to write snapshot")?;
    info!("✓ Snapshot written to: {}", snapshot.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(90));
        println!("AREA SUMMARY");
        println!("{}", "=".repeat(90));
        println!("Top module:  {}", top_module);
        println!("Total area:  {:.3}", dist.total_area);
        println!("Instances:   {}", dist.node_count);
        println!("Depth:       {}", dist.max_depth);
        println!("\n{}", generate_text_summary(&tree, &top_module, args.max_depth));
        println!("{}", "=".repeat(90));
    }

    let elapsed = start_time.elapsed();
    info!("Build completed in {:.2}s", elapsed.as_secs_f64());

    Ok(BuildOutcome {
        top_module,
        tree,
        resolved_table,
        table,
        snapshot,
    })
}

/// Validate build arguments
///
/// **Public** - can be called before execute_build for early validation
///
/// A threshold outside (0, 1) is not an error: it means no pruning.
pub fn validate_args(args: &BuildArgs) -> Result<()> {
    if args.input().is_none() {
        anyhow::bail!("Specify exactly one of --filename or --load-from-csv");
    }

    if args.palette.is_empty() {
        anyhow::bail!("Palette must contain at least one color");
    }

    for color in &args.palette {
        color
            .parse::<Rgba>()
            .with_context(|| format!("Invalid palette entry '{}'", color))?;
    }

    if args.max_depth == 0 {
        anyhow::bail!("max depth must be greater than 0");
    }

    if let Some(top) = &args.top_module {
        if top.is_empty() {
            anyhow::bail!("Top module cannot be empty");
        }
    }

    Ok(())
}
