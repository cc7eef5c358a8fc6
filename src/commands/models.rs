use crate::aggregator::Fade;
use crate::utils::config::{DEFAULT_MAX_DEPTH, DEFAULT_PALETTE};
use std::path::PathBuf;

/// Where the hierarchy comes from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Raw area report, parsed line by line
    Report(PathBuf),
    /// Previously saved `id,parent,label,value,color` table
    Table(PathBuf),
}

/// Arguments for the build command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct BuildArgs {
    /// Area report to parse (exclusive with `table`)
    pub report: Option<PathBuf>,

    /// Saved table to load (exclusive with `report`)
    pub table: Option<PathBuf>,

    /// Directory receiving the tables and snapshot
    pub out_dir: PathBuf,

    /// Top module id; the first row when unset
    pub top_module: Option<String>,

    /// Hierarchy levels kept below the top module
    pub max_depth: usize,

    /// Pruning threshold τ; only values in (0, 1) prune
    pub threshold: f64,

    /// Root-level colors
    pub palette: Vec<String>,

    /// Skip duplicate resolution (unsafe if duplicates are present)
    pub skip_rename: bool,

    /// Extra id fragments to elide
    pub exclude: Vec<String>,

    /// Blend deriving child colors
    pub fade: Fade,

    /// Insert self-area rows for remainder rendering
    pub remainder: bool,

    /// Keep the report's final line instead of treating it as the total
    pub keep_total_line: bool,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl BuildArgs {
    /// The single configured input, if exactly one is set
    pub fn input(&self) -> Option<InputSource> {
        match (&self.report, &self.table) {
            (Some(report), None) => Some(InputSource::Report(report.clone())),
            (None, Some(table)) => Some(InputSource::Table(table.clone())),
            _ => None,
        }
    }
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            report: Some(PathBuf::from("area.rpt")),
            table: None,
            out_dir: PathBuf::from("."),
            top_module: None,
            max_depth: DEFAULT_MAX_DEPTH,
            threshold: 0.0,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            skip_rename: false,
            exclude: Vec::new(),
            fade: Fade::default(),
            remainder: false,
            keep_total_line: false,
            print_summary: false,
        }
    }
}
