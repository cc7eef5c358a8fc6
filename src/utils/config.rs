//! Configuration and constants shared by the parser, the tree transforms and the CLI.

/// Current table/snapshot schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Pattern for one hierarchy line of an area report: `<path> <area>`.
///
/// Group 1 is the slash-delimited instance path, which may carry array
/// indices such as `u_mem/bank[0]`; group 2 is the decimal area.
pub const REPORT_LINE_PATTERN: &str = r"([\[A-Za-z_][\[\]A-Za-z0-9_/]*)\s+(\d+\.+\d+)";

/// Default root-level palette (one entry per first-generation child, reused cyclically)
pub const DEFAULT_PALETTE: &[&str] = &[
    "#d58936", "#39393a", "#90C290", "#6d1a36", "#39393a", "#007480",
];

/// Name fragment identifying pass-through wrapper instances
pub const DEFAULT_WRAPPER_PATTERN: &str = "wrapper";

/// Suffix appended to a parent id to name its synthetic "others" child
pub const OTHERS_SUFFIX: &str = "_others";

/// Display label of synthetic "others" rows
pub const OTHERS_LABEL: &str = "others";

/// Suffix of the self-area rows inserted in remainder mode
pub const REMAINDER_SUFFIX: &str = "_cum";

/// Alpha reduction applied per hierarchy level below the first generation
pub const DEFAULT_FADE_AMOUNT: f64 = 0.3;

/// Lightness increase applied per level when fading by lightening
pub const DEFAULT_LIGHTEN_AMOUNT: f64 = 0.5;

/// Default number of hierarchy levels kept below the top module (the top
/// module itself is not counted)
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Column order of the saved table
pub const TABLE_COLUMNS: &[&str] = &["id", "parent", "label", "value", "color"];
