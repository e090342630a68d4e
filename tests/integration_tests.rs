use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, setup_test_db, st};

use shoptally::core::calendar::business_days_ago;

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");

    st().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    st().args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Attendance records"));
}

#[test]
fn test_breaks_add_and_list() {
    let db_path = setup_test_db("breaks_add");

    st().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    st().args([
        "--db", &db_path, "breaks", "--add", "--label", "lunch", "--start", "12:00", "--end",
        "13:00",
    ])
    .assert()
    .success();

    st().args([
        "--db",
        &db_path,
        "breaks",
        "--add",
        "--label",
        "morning",
        "--start",
        "06:00",
        "--end",
        "08:30",
        "--kind",
        "pre-shift-exempt",
    ])
    .assert()
    .success();

    st().args(["--db", &db_path, "breaks", "--list"])
        .assert()
        .success()
        .stdout(contains("lunch"))
        .stdout(contains("morning"))
        .stdout(contains("pre_shift_exempt"));
}

#[test]
fn test_breaks_add_rejects_invalid_time() {
    let db_path = setup_test_db("breaks_invalid");

    st().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    st().args([
        "--db", &db_path, "breaks", "--add", "--label", "bad", "--start", "25:00", "--end",
        "13:00",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid time format"));
}

#[test]
fn test_breaks_disable_and_enable() {
    let db_path = setup_test_db("breaks_toggle");

    st().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    st().args([
        "--db", &db_path, "breaks", "--add", "--label", "lunch", "--start", "12:00", "--end",
        "13:00",
    ])
    .assert()
    .success();

    st().args(["--db", &db_path, "breaks", "--disable", "1"])
        .assert()
        .success()
        .stdout(contains("disabled"));

    st().args(["--db", &db_path, "breaks", "--enable", "1"])
        .assert()
        .success()
        .stdout(contains("enabled"));

    // unknown id → error
    st().args(["--db", &db_path, "breaks", "--disable", "99"])
        .assert()
        .failure()
        .stderr(contains("Break window not found"));
}

#[test]
fn test_clock_subtracts_break_overlap() {
    let db_path = setup_test_db("clock_breaks");
    init_db_with_data(&db_path);

    // 09:00–17:00 is 480 min, the seeded 12:00–13:00 lunch leaves 420
    st().args([
        "--db",
        &db_path,
        "clock",
        "sato",
        "2025-09-02",
        "--in",
        "09:00",
        "--out",
        "17:00",
    ])
    .assert()
    .success()
    .stdout(contains("07h 00m"));
}

#[test]
fn test_clock_single_stamp_is_zero_duration() {
    let db_path = setup_test_db("clock_single");

    st().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    st().args([
        "--db",
        &db_path,
        "clock",
        "sato",
        "2025-09-02",
        "--in",
        "09:15",
    ])
    .assert()
    .success()
    .stdout(contains("09:15 – 09:15"));
}

#[test]
fn test_clock_swapped_stamps_are_reordered() {
    let db_path = setup_test_db("clock_swapped");

    st().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    st().args([
        "--db",
        &db_path,
        "clock",
        "sato",
        "2025-09-02",
        "--in",
        "17:00",
        "--out",
        "08:00",
    ])
    .assert()
    .success()
    .stdout(contains("08:00 – 17:00"));
}

#[test]
fn test_session_add_and_list() {
    let db_path = setup_test_db("session_list");
    init_db_with_data(&db_path);

    st().args([
        "--db",
        &db_path,
        "session",
        "aoki",
        "--list",
        "--date",
        "2025-09-01",
    ])
    .assert()
    .success()
    .stdout(contains("restock"));
}

#[test]
fn test_session_open_and_stop() {
    let db_path = setup_test_db("session_stop");

    st().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    st().args([
        "--db",
        &db_path,
        "session",
        "aoki",
        "--task",
        "delivery",
        "--start",
        "2025-09-01 09:00",
    ])
    .assert()
    .success()
    .stdout(contains("open"));

    st().args(["--db", &db_path, "session", "aoki", "--stop"])
        .assert()
        .success()
        .stdout(contains("closed"));

    // nothing left open
    st().args(["--db", &db_path, "session", "aoki", "--stop"])
        .assert()
        .failure()
        .stderr(contains("No open session"));
}

#[test]
fn test_report_detail_json() {
    let db_path = setup_test_db("report_detail");
    init_db_with_data(&db_path);

    st().args([
        "--db",
        &db_path,
        "report",
        "--user",
        "aoki",
        "--date",
        "2025-09-01",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"difference_minutes\""))
    .stdout(contains("\"aoki\""));
}

#[test]
fn test_report_over_flags_and_clear_dismisses() {
    let db_path = setup_test_db("report_over");

    st().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    // seed on the most recent business day so the lookback finds it
    let day = business_days_ago(1)[0].format("%Y-%m-%d").to_string();

    st().args([
        "--db", &db_path, "clock", "aoki", &day, "--in", "09:00", "--out", "17:00",
    ])
    .assert()
    .success();

    st().args([
        "--db",
        &db_path,
        "session",
        "aoki",
        "--task",
        "restock",
        "--start",
        &format!("{} 09:00", day),
        "--end",
        &format!("{} 19:30", day),
    ])
    .assert()
    .success();

    // logged 630 vs attendance 480 → diff 150 > 60
    st().args(["--db", &db_path, "report", "--over"])
        .assert()
        .success()
        .stdout(contains("aoki").and(contains(&day)));

    st().args(["--db", &db_path, "clear", "aoki", &day, "--by", "tanaka"])
        .assert()
        .success()
        .stdout(contains("cleared"));

    st().args(["--db", &db_path, "report", "--over"])
        .assert()
        .success()
        .stdout(contains("No discrepancies"));
}

#[test]
fn test_report_under_direction() {
    let db_path = setup_test_db("report_under");

    st().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let day = business_days_ago(1)[0].format("%Y-%m-%d").to_string();

    // attendance 08:00–18:00 = 600, logged 09:00–17:00 = 480 → diff -120
    st().args([
        "--db", &db_path, "clock", "aoki", &day, "--in", "08:00", "--out", "18:00",
    ])
    .assert()
    .success();

    st().args([
        "--db",
        &db_path,
        "session",
        "aoki",
        "--task",
        "counter",
        "--start",
        &format!("{} 09:00", day),
        "--end",
        &format!("{} 17:00", day),
    ])
    .assert()
    .success();

    st().args(["--db", &db_path, "report", "--under"])
        .assert()
        .success()
        .stdout(contains("aoki"));

    // the over-direction report stays quiet for the same data
    st().args(["--db", &db_path, "report", "--over"])
        .assert()
        .success()
        .stdout(contains("No discrepancies"));
}

#[test]
fn test_report_custom_threshold() {
    let db_path = setup_test_db("report_threshold");

    st().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let day = business_days_ago(1)[0].format("%Y-%m-%d").to_string();

    // diff is exactly 30 minutes
    st().args([
        "--db", &db_path, "clock", "aoki", &day, "--in", "09:00", "--out", "17:00",
    ])
    .assert()
    .success();

    st().args([
        "--db",
        &db_path,
        "session",
        "aoki",
        "--task",
        "counter",
        "--start",
        &format!("{} 09:00", day),
        "--end",
        &format!("{} 17:30", day),
    ])
    .assert()
    .success();

    st().args(["--db", &db_path, "report", "--over"])
        .assert()
        .success()
        .stdout(contains("No discrepancies"));

    st().args(["--db", &db_path, "report", "--over", "--threshold", "15"])
        .assert()
        .success()
        .stdout(contains("aoki"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_print");
    init_db_with_data(&db_path);

    st().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("clock"));
}
