#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use ptoccupancy::models::raw_row::RawLogRow;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test with HOME pointed at a private directory, so no real
/// config file is read or written.
pub fn pto(name: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("ptoccupancy");
    cmd.env("HOME", test_home(name));
    cmd
}

pub fn test_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_ptoccupancy_home", name));
    fs::create_dir_all(&path).expect("create test home");
    path
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_ptoccupancy.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Detail text the way the portal writes it.
pub fn detail(ts: &str, room: &str) -> String {
    format!("{ts} (PST) added session CS 124 Quiz 3 in {room} in CBTF Grainger Library")
}

pub fn add(ts: &str, room: &str) -> RawLogRow {
    RawLogRow::new("add session", detail(ts, room))
}

pub fn delete(ts: &str, room: &str) -> RawLogRow {
    RawLogRow::new("deleted session", detail(ts, room))
}

/// 10 rows: 6 adds on distinct slots, 2 deletes cancelling two of them,
/// 2 add rows whose detail text cannot be parsed.
pub fn ten_rows() -> Vec<RawLogRow> {
    vec![
        add("2025-02-03 09:00:00", "014"),
        add("2025-02-03 14:00:00", "014"),
        add("2025-02-03 14:00:00", "015"),
        add("2025-02-04 10:00:00", "008"),
        add("2025-02-04 16:00:00", "014"),
        add("2025-02-05 11:00:00", "015"),
        delete("2025-02-03 09:00:00", "014"),
        delete("2025-02-04 16:00:00", "014"),
        RawLogRow::new("add session", "2025-02-03 09:00 (PST) added session in 014 in CBTF"),
        RawLogRow::new("add session", "2025-02-06 08:00:00 (PST) added session somewhere else"),
    ]
}

/// Same rows as a TSV import file.
pub fn write_tsv(name: &str, rows: &[RawLogRow]) -> String {
    let path = temp_out(name, "tsv");
    let body: Vec<String> = rows
        .iter()
        .map(|r| format!("{}\t{}", r.label, r.detail))
        .collect();
    fs::write(&path, body.join("\n")).expect("write tsv fixture");
    path
}
