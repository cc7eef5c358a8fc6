use area_plot::commands::{execute_build, validate_args, validate_table_file, BuildArgs};
use area_plot::output::{read_snapshot, read_table};
use area_plot::tree::check_integrity;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const REPORT: &str = "\
Hierarchical cell                 Total
chip_top                          100.0000
u_core0                            40.0000
u_core0/u_mem                      20.0000
u_core0/u_mem/u_buf                 5.0000
u_core1                            40.0000
u_core1/u_mem                      20.0000
u_core1/u_mem/u_buf                 5.0000
u_io_wrapper                       18.0000
u_io_wrapper/u_uart                17.0000
u_misc                              2.0000
Total                             100.0000
";

fn write_report(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("area.rpt");
    fs::write(&path, REPORT).unwrap();
    path
}

fn args(dir: &TempDir) -> BuildArgs {
    BuildArgs {
        report: Some(write_report(dir.path())),
        out_dir: dir.path().join("out"),
        threshold: 0.1,
        ..Default::default()
    }
}

#[test]
fn test_build_end_to_end() {
    let dir = TempDir::new().unwrap();
    let args = args(&dir);
    validate_args(&args).unwrap();

    let outcome = execute_build(args).unwrap();

    assert_eq!(outcome.top_module, "chip_top");
    assert!(outcome.resolved_table.exists());
    assert!(outcome.table.exists());
    assert!(outcome.snapshot.exists());

    let mut ids: Vec<&str> = outcome.tree.rows().iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(
        ids,
        vec![
            "chip_top",
            "chip_top_others",
            "u_buf_1",
            "u_buf_2",
            "u_core0",
            "u_core1",
            "u_mem_1",
            "u_mem_2",
            "u_uart",
        ]
    );

    let uart = outcome.tree.get("u_uart").unwrap();
    assert_eq!(uart.parent, "chip_top");
    assert_eq!(outcome.tree.get("chip_top_others").unwrap().value, Some(2.0));
    assert_eq!(outcome.tree.get("u_buf_2").unwrap().parent, "u_mem_2");

    let report = check_integrity(&outcome.tree);
    assert!(report.is_valid());
    assert_eq!(report.uncolored, 0);
}

#[test]
fn test_build_outputs_reload() {
    let dir = TempDir::new().unwrap();
    let outcome = execute_build(args(&dir)).unwrap();

    let reloaded = read_table(&outcome.table).unwrap();
    assert_eq!(reloaded, outcome.tree);

    let snapshot = read_snapshot(&outcome.snapshot).unwrap();
    assert_eq!(snapshot.top_module, "chip_top");
    assert_eq!(snapshot.total_area, 100.0);
    assert_eq!(snapshot.rows.len(), outcome.tree.len());

    validate_table_file(outcome.table.clone()).unwrap();
}

#[test]
fn test_build_resolved_table_keeps_all_rows() {
    let dir = TempDir::new().unwrap();
    let outcome = execute_build(args(&dir)).unwrap();

    let resolved = read_table(&outcome.resolved_table).unwrap();
    assert_eq!(resolved.len(), 10);
    assert!(!resolved.has_duplicates());
}

#[test]
fn test_build_from_saved_table() {
    let dir = TempDir::new().unwrap();
    let first = execute_build(args(&dir)).unwrap();

    let args = BuildArgs {
        report: None,
        table: Some(first.resolved_table.clone()),
        out_dir: dir.path().join("again"),
        threshold: 0.1,
        ..Default::default()
    };
    let second = execute_build(args).unwrap();

    assert_eq!(second.tree, first.tree);
}

#[test]
fn test_build_subtree_top_module() {
    let dir = TempDir::new().unwrap();
    let args = BuildArgs {
        top_module: Some("u_core1".to_string()),
        threshold: 0.0,
        ..args(&dir)
    };
    let outcome = execute_build(args).unwrap();

    let ids: Vec<&str> = outcome.tree.rows().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["u_core1", "u_mem_2", "u_buf_2"]);
    assert!(outcome.tree.get("u_core1").unwrap().is_root());
    assert!(outcome.table.ends_with("u_core1_tree.csv"));
}

#[test]
fn test_build_depth_limit() {
    let dir = TempDir::new().unwrap();
    let args = BuildArgs {
        max_depth: 1,
        ..args(&dir)
    };
    let outcome = execute_build(args).unwrap();

    assert!(outcome.tree.get("u_mem_1").is_none());
    assert!(outcome.tree.get("u_core0").is_some());
    // wrapper removed before the limit, so its child moves up a level
    assert!(outcome.tree.get("u_uart").is_some());
}

#[test]
fn test_build_unknown_top_module() {
    let dir = TempDir::new().unwrap();
    let args = BuildArgs {
        top_module: Some("u_gpu".to_string()),
        ..args(&dir)
    };
    assert!(execute_build(args).is_err());
}

#[test]
fn test_build_empty_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.rpt");
    fs::write(&path, "no hierarchy here\n").unwrap();

    let args = BuildArgs {
        report: Some(path),
        out_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    assert!(execute_build(args).is_err());
}

#[test]
fn test_build_missing_report() {
    let dir = TempDir::new().unwrap();
    let args = BuildArgs {
        report: Some(dir.path().join("missing.rpt")),
        out_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    assert!(execute_build(args).is_err());
}

const WRAPPED_REPORT: &str = "\
chip                              10.0000
u_core_wrapper                     8.0000
u_core_wrapper/u_core              8.0000
u_core_wrapper/u_core/u_alu        3.0000
u_misc                             2.0000
Total                             10.0000
";

fn wrapped_args(dir: &TempDir, top: &str) -> BuildArgs {
    let path = dir.path().join("wrapped.rpt");
    fs::write(&path, WRAPPED_REPORT).unwrap();
    BuildArgs {
        report: Some(path),
        out_dir: dir.path().join("out"),
        top_module: Some(top.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_build_wrapper_top_module_kept() {
    let dir = TempDir::new().unwrap();
    let outcome = execute_build(wrapped_args(&dir, "u_core_wrapper")).unwrap();

    let ids: Vec<&str> = outcome.tree.rows().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["u_core_wrapper", "u_core", "u_alu"]);
    assert!(outcome.tree.get("u_core_wrapper").unwrap().is_root());
    assert!(check_integrity(&outcome.tree).is_valid());
}

#[test]
fn test_build_exclusion_skips_top_module() {
    let dir = TempDir::new().unwrap();
    let args = BuildArgs {
        exclude: vec!["core".to_string()],
        ..wrapped_args(&dir, "u_core")
    };
    let outcome = execute_build(args).unwrap();

    let ids: Vec<&str> = outcome.tree.rows().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["u_core", "u_alu"]);
}

#[test]
fn test_build_elides_wrappers_below_top() {
    let dir = TempDir::new().unwrap();
    let outcome = execute_build(wrapped_args(&dir, "chip")).unwrap();

    assert!(outcome.tree.get("u_core_wrapper").is_none());
    assert_eq!(outcome.tree.get("u_core").unwrap().parent, "chip");
}
