//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod build;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use build::{execute_build, validate_args, BuildOutcome};
pub use models::{BuildArgs, InputSource};
pub use utils::{display_schema, display_version, validate_table_file};
