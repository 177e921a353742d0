#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use impure_core::model::SymbolRecord;
use impure_core::policy::ClassificationPolicy;
use impure_core::services::readers::{NmReader, ParseMode};
use impure_core::services::scan::{ScanError, Scanner, SymbolTableReader};
use tempfile::tempdir;

const FAKE_NM: &str = r#"#!/bin/sh
if [ "$1" != "--demangle" ] || [ "$2" != "--print-size" ] || [ "$3" != "--defined-only" ]; then
  echo "unexpected arguments: $*" >&2
  exit 2
fi
if [ -f "$4.syms" ]; then
  cat "$4.syms"
  if [ -f "$4.status" ]; then
    exit "$(cat "$4.status")"
  fi
else
  echo "nm: $4: file format not recognized" >&2
  exit 1
fi
"#;

static SCRIPT_LOCK: Mutex<()> = Mutex::new(());

/// Serializes writing and running fake tools, so no test executes a script while another
/// test's freshly written one is still open for writing in a forked child.
fn script_lock() -> MutexGuard<'static, ()> {
    SCRIPT_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Stand-in for `nm` that prints `<object>.syms` and exits with `<object>.status` if present.
fn fake_nm(dir: &Path) -> PathBuf {
    let script = dir.join("nm");
    fs::write(&script, FAKE_NM).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn object_with_symbols(dir: &Path, name: &str, listing: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"\x7fELF").unwrap();
    fs::write(dir.join(format!("{name}.syms")), listing).unwrap();
    path
}

#[test]
fn reader_parses_tool_output() {
    let temp = tempdir().unwrap();
    let obj = object_with_symbols(
        temp.path(),
        "a.o",
        "0000000000000010 0000000000000004 b myGlobalCounter\n\
         0000000000000000 0000000000000022 T main\n",
    );
    let _guard = script_lock();
    let reader = NmReader::new().with_program(fake_nm(temp.path()));

    let records = reader.read_symbols(&obj).expect("read symbols");
    assert_eq!(
        records,
        vec![
            SymbolRecord::new(0x10, 4, 'b', "myGlobalCounter"),
            SymbolRecord::new(0, 0x22, 'T', "main"),
        ]
    );
}

#[test]
fn non_object_file_yields_no_records() {
    let temp = tempdir().unwrap();
    let bogus = temp.path().join("bogus.o");
    fs::write(&bogus, "not an object").unwrap();
    let _guard = script_lock();
    let reader = NmReader::new().with_program(fake_nm(temp.path()));
    assert!(reader.read_symbols(&bogus).unwrap().is_empty());
}

#[test]
fn output_is_parsed_even_when_tool_exits_non_zero() {
    let temp = tempdir().unwrap();
    let obj = object_with_symbols(
        temp.path(),
        "partial.o",
        "0000000000000020 0000000000000010 D lookup\n",
    );
    fs::write(temp.path().join("partial.o.status"), "1").unwrap();
    let _guard = script_lock();
    let reader = NmReader::new().with_program(fake_nm(temp.path()));

    let records = reader.read_symbols(&obj).expect("non-zero exit is not an error");
    assert_eq!(records, vec![SymbolRecord::new(0x20, 0x10, 'D', "lookup")]);
}

#[test]
fn name_remainder_mode_is_passed_through() {
    let temp = tempdir().unwrap();
    let obj = object_with_symbols(
        temp.path(),
        "t.o",
        "0000000000000000 0000000000000008 d void run<int>(int, int)::state\n",
    );
    let _guard = script_lock();
    let strict = NmReader::new().with_program(fake_nm(temp.path()));
    assert!(strict.read_symbols(&obj).unwrap().is_empty());

    let lenient = strict.with_mode(ParseMode::NameRemainder);
    let records = lenient.read_symbols(&obj).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "void run<int>(int, int)::state");
}

#[test]
fn missing_tool_is_a_tool_invocation_error() {
    let temp = tempdir().unwrap();
    let obj = object_with_symbols(temp.path(), "a.o", "");
    let reader = NmReader::new().with_program(temp.path().join("no-such-nm"));
    let err = reader.read_symbols(&obj).unwrap_err();
    assert!(matches!(err, ScanError::ToolInvocation { .. }));
    assert!(err.to_string().contains("no-such-nm"), "unexpected error: {err}");
}

#[test]
fn scanner_with_nm_reader_reports_tree() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("root");
    fs::create_dir_all(root.join("sub")).unwrap();
    object_with_symbols(&root, "a.o", "0000000000000010 0000000000000004 b myGlobalCounter\n");
    object_with_symbols(
        &root.join("sub"),
        "b.o",
        "0000000000000000 0000000000000001 b std::__ioinit\n",
    );
    object_with_symbols(&root, "c.o", "c.o: no symbols\n");

    let _guard = script_lock();
    let reader = NmReader::new().with_program(fake_nm(temp.path()));
    let policy = ClassificationPolicy::default();
    let report = Scanner::new(&reader, &policy).scan_tree(&root).unwrap();

    let lines: Vec<String> = report.findings.iter().map(|f| f.to_string()).collect();
    assert_eq!(lines, vec![format!("{}:myGlobalCounter:4", root.join("a.o").display())]);
}
