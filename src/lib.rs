//! Area Plot
//!
//! Converts a flat synthesis area report (one `path area` line per
//! instance) into a normalized hierarchy table for treemap and sunburst
//! visualization.
//!
//! The pipeline:
//! 1. [`parser`] turns report lines into parent/child rows
//! 2. [`aggregator::resolve_duplicates`] gives reused instance names unique ids
//! 3. [`aggregator::apply_threshold`] folds small instances into "others"
//! 4. [`aggregator::remove_wrappers`] elides pass-through levels
//! 5. [`aggregator::assign_colors`] propagates the palette down the tree
//!
//! Every stage takes an [`tree::AreaTree`] and returns a new one.

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod tree;
pub mod utils;
