//! Tree transforms applied between parsing and output.
//!
//! Each stage takes a tree snapshot and returns a new one:
//! - Duplicate resolution (unique ids, scoped parent repair)
//! - Wrapper and module elision
//! - Threshold aggregation into "others" rows
//! - Color propagation
//! - Module insertion, depth limiting, remainder rows and statistics

pub mod color;
pub mod depth;
pub mod duplicates;
pub mod elision;
pub mod insert;
pub mod metrics;
pub mod threshold;

// Re-export main types and functions
pub use color::{assign_colors, lighten_color, make_transparent, Fade, Rgba};
pub use depth::limit_depth;
pub use duplicates::resolve_duplicates;
pub use elision::{
    remove_matching, remove_matching_all, remove_module, remove_wrappers, NamePattern,
};
pub use insert::{add_module, fill_remainders};
pub use metrics::{area_shares, calculate_area_distribution, AreaDistribution, AreaShare};
pub use threshold::apply_threshold;
