use std::fs;

use find_impure_data::commands::scan_to_writer;
use tempfile::tempdir;

#[test]
fn empty_tree_writes_nothing() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("a/b")).unwrap();
    fs::write(temp.path().join("a/readme.txt"), "x").unwrap();

    let mut out = Vec::new();
    let report = scan_to_writer(temp.path(), &mut out).expect("scan empty tree");
    assert!(out.is_empty());
    assert!(report.is_clean());
    assert_eq!(report.files_scanned, 0);
}

#[test]
fn missing_root_error_names_the_path() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("nowhere");
    let mut out = Vec::new();
    let err = scan_to_writer(&missing, &mut out).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("Failed to scan"), "unexpected error: {chain}");
    assert!(chain.contains("nowhere"), "unexpected error: {chain}");
    assert!(out.is_empty());
}

#[test]
fn init_logging_can_be_called_twice() {
    find_impure_data::init_logging();
    find_impure_data::init_logging();
}
