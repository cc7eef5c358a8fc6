//! Area report parser.
//!
//! Reads the flat, indentation-free hierarchy section of a synthesis area
//! report and turns every `<path> <area>` line into a row. The parent of a row
//! is recovered from its path: the second-to-last segment, or the report's
//! first instance for single-segment paths.

use super::name::prettify_name;
use super::schema::Row;
use crate::utils::config::REPORT_LINE_PATTERN;
use crate::utils::error::ParseError;
use log::{debug, info, warn};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Report parsing options
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Discard the last matching line, which reports conventionally use for
    /// the grand total rather than a hierarchy instance
    pub drop_total_line: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            drop_total_line: true,
        }
    }
}

fn line_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REPORT_LINE_PATTERN).expect("valid report line pattern"))
}

/// Parse report text into a flat row table
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `text` - Raw report contents
/// * `options` - Parsing options
///
/// # Returns
/// Rows in report order. The first row is the report's root (`parent == ""`).
/// A report without any hierarchy line yields an empty table.
pub fn parse_report(text: &str, options: &ParseOptions) -> Vec<Row> {
    let pattern = line_pattern();
    let mut rows: Vec<Row> = Vec::new();
    let mut top_name: Option<String> = None;

    for (line_no, line) in text.lines().enumerate() {
        let Some(caps) = pattern.captures(line) else {
            continue;
        };

        let path = &caps[1];
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some(&name) = segments.last() else {
            continue;
        };

        let value = match caps[2].parse::<f64>() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Line {}: unreadable area '{}': {}", line_no + 1, &caps[2], e);
                None
            }
        };

        let parent = match &top_name {
            None => {
                debug!("Report root: {}", name);
                top_name = Some(name.to_string());
                String::new()
            }
            Some(top) if segments.len() == 1 => {
                debug!("Attaching top-level instance {} to {}", name, top);
                top.clone()
            }
            Some(_) => segments[segments.len() - 2].to_string(),
        };

        rows.push(Row {
            id: name.to_string(),
            parent,
            label: prettify_name(name),
            value,
            color: None,
        });
    }

    if options.drop_total_line {
        if let Some(total) = rows.pop() {
            debug!("Dropped total line: {} ({:?})", total.id, total.value);
        }
    }

    info!("Parsed {} hierarchy rows", rows.len());
    rows
}

/// Read and parse a report file
///
/// **Public** - convenience wrapper around [`parse_report`]
pub fn parse_report_file(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<Vec<Row>, ParseError> {
    let path = path.as_ref();
    info!("Reading report: {}", path.display());
    let text = std::fs::read_to_string(path)?;
    Ok(parse_report(&text, options))
}

/// Look up the area of individual components by name
///
/// **Public** - flat lookup that ignores the hierarchy
///
/// For each name, returns the area on the first line where the name ends a
/// word followed by whitespace and a decimal number.
///
/// # Errors
/// * `ParseError::ComponentNotFound` - No line carries an area for a name
pub fn find_component_areas(text: &str, names: &[&str]) -> Result<Vec<f64>, ParseError> {
    let mut areas = Vec::with_capacity(names.len());

    for name in names {
        let pattern = Regex::new(&format!(r"\w*{}\s+(\d+\.\d+)", regex::escape(name)))
            .map_err(|_| ParseError::ComponentNotFound(name.to_string()))?;

        let area = text
            .lines()
            .find_map(|line| pattern.captures(line).and_then(|c| c[1].parse::<f64>().ok()))
            .ok_or_else(|| ParseError::ComponentNotFound(name.to_string()))?;

        areas.push(area);
    }

    Ok(areas)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
Report : area
Design : soc_top

Hierarchical cell                Absolute Total
---------------------------------------------------
soc_top                          1000.000
u_core                            600.500
u_core/u_alu                      200.250
u_core/u_lsu                      100.000
u_uncore                          300.000
---------------------------------------------------
Total                            1000.000
";

    #[test]
    fn test_first_match_is_root() {
        let rows = parse_report(REPORT, &ParseOptions::default());
        assert_eq!(rows[0].id, "soc_top");
        assert!(rows[0].is_root());
        assert_eq!(rows[0].value, Some(1000.0));
    }

    #[test]
    fn test_single_segment_attaches_to_root() {
        let rows = parse_report(REPORT, &ParseOptions::default());
        assert_eq!(rows[1].id, "u_core");
        assert_eq!(rows[1].parent, "soc_top");
        assert_eq!(rows[4].parent, "soc_top");
    }

    #[test]
    fn test_multi_segment_uses_second_to_last() {
        let rows = parse_report(REPORT, &ParseOptions::default());
        assert_eq!(rows[2].id, "u_alu");
        assert_eq!(rows[2].parent, "u_core");
        assert_eq!(rows[2].label, "Alu");
    }

    #[test]
    fn test_total_line_dropped() {
        let rows = parse_report(REPORT, &ParseOptions::default());
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.id != "Total"));
    }

    #[test]
    fn test_total_line_kept_when_disabled() {
        let options = ParseOptions {
            drop_total_line: false,
        };
        let rows = parse_report(REPORT, &options);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5].id, "Total");
    }

    #[test]
    fn test_no_matches_is_empty() {
        let rows = parse_report("nothing to see here\n", &ParseOptions::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_find_component_areas() {
        let areas = find_component_areas(REPORT, &["u_alu", "u_uncore"]).unwrap();
        assert_eq!(areas, vec![200.25, 300.0]);
    }

    #[test]
    fn test_find_component_areas_missing() {
        let err = find_component_areas(REPORT, &["u_fpu"]).unwrap_err();
        assert!(matches!(err, ParseError::ComponentNotFound(name) if name == "u_fpu"));
    }
}
