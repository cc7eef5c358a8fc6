//! Report parsing and table schema definitions.
//!
//! This module handles:
//! - Matching hierarchy lines in a synthesis area report
//! - Turning slash-delimited paths into parent/child rows
//! - Prettifying instance names for display
//! - Defining the row and snapshot schema

pub mod name;
pub mod report;
pub mod schema;

// Re-export main types
pub use name::prettify_name;
pub use report::{find_component_areas, parse_report, parse_report_file, ParseOptions};
pub use schema::{Row, TreeSnapshot};
