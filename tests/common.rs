#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn st() -> Command {
    cargo_bin_cmd!("shoptally")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shoptally.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    // init DB (creates tables)
    st().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    // a lunch break window that applies to everyone
    st().args([
        "--db", db_path, "breaks", "--add", "--label", "lunch", "--start", "12:00", "--end",
        "13:00",
    ])
    .assert()
    .success();

    // one attendance record
    st().args([
        "--db",
        db_path,
        "clock",
        "aoki",
        "2025-09-01",
        "--in",
        "09:00",
        "--out",
        "17:00",
    ])
    .assert()
    .success();

    // one closed session on the same day
    st().args([
        "--db",
        db_path,
        "session",
        "aoki",
        "--task",
        "restock",
        "--start",
        "2025-09-01 09:00",
        "--end",
        "2025-09-01 17:00",
    ])
    .assert()
    .success();
}
