use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{add, pto, setup_test_db, temp_out, ten_rows, write_tsv};

/// init + import of the ten-row fixture
fn prepared_db(name: &str) -> String {
    let db_path = setup_test_db(name);

    pto(name)
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let tsv = write_tsv(name, &ten_rows());
    pto(name)
        .args(["--db", &db_path, "import", "--tsv", &tsv, "--note", "fixture"])
        .assert()
        .success()
        .stdout(contains("Imported 10 rows as snapshot 1"));

    db_path
}

#[test]
fn test_sessions_lists_reconciled_slots_and_warnings() {
    let db_path = prepared_db("cli_sessions_list");

    pto("cli_sessions_list")
        .args(["--db", &db_path, "sessions"])
        .assert()
        .success()
        .stdout(contains("6 adds, 2 deletes, 0 ignored, 2 malformed"))
        .stdout(contains("2025-02-05 11:00:00"))
        .stdout(contains("4 active sessions"))
        .stdout(contains("2025-02-04 16:00:00").not());
}

#[test]
fn test_sessions_checkpoint_csv() {
    let db_path = prepared_db("cli_sessions_csv");
    let out = temp_out("cli_sessions_csv", "csv");

    pto("cli_sessions_csv")
        .args(["--db", &db_path, "sessions", "--export", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read checkpoint");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Scheduled Date,Location");
    assert_eq!(lines.len(), 5);
    assert!(lines.contains(&"2025-02-03 14:00:00,014"));
    assert!(lines.contains(&"2025-02-04 10:00:00,008"));
}

#[test]
fn test_occupancy_csv_export() {
    let db_path = prepared_db("cli_occupancy_csv");
    let out = temp_out("cli_occupancy_csv", "csv");

    pto("cli_occupancy_csv")
        .args([
            "--db",
            &db_path,
            "occupancy",
            "--range",
            "2025-02-03:2025-02-05",
            "--locations",
            "008,014,015",
            "--format",
            "csv",
            "--file",
            &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read grid csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "date,hour,location,count");
    assert_eq!(lines.len(), 1 + 3 * 24 * 3);
    assert!(lines.contains(&"2025-02-03,14,014,1"));
    assert!(lines.contains(&"2025-02-03,9,014,0"));
    assert_eq!(lines.iter().filter(|l| l.ends_with(",1")).count(), 4);
}

#[test]
fn test_occupancy_from_checkpoint_json() {
    let db_path = prepared_db("cli_occupancy_json");
    let checkpoint = temp_out("cli_occupancy_json_sessions", "csv");
    let out = temp_out("cli_occupancy_json", "json");

    pto("cli_occupancy_json")
        .args(["--db", &db_path, "sessions", "--export", &checkpoint])
        .assert()
        .success();

    pto("cli_occupancy_json")
        .args([
            "--db",
            &db_path,
            "occupancy",
            "--from-csv",
            &checkpoint,
            "--range",
            "2025-02-04",
            "--locations",
            "008",
            "--format",
            "json",
            "--file",
            &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read grid json");
    let cells: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let cells = cells.as_array().expect("array of cells");
    assert_eq!(cells.len(), 24);

    let busy: Vec<&serde_json::Value> = cells.iter().filter(|c| c["count"] == 1).collect();
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0]["hour"], 10);
    assert_eq!(busy[0]["date"], "2025-02-04");
}

#[test]
fn test_occupancy_matrix_preview() {
    let db_path = prepared_db("cli_occupancy_preview");

    pto("cli_occupancy_preview")
        .args(["--db", &db_path, "occupancy", "--locations", "015"])
        .assert()
        .success()
        .stdout(contains("Location 015"))
        .stdout(contains("2025-02-05 Wed"))
        .stdout(contains("72 cells"));
}

#[test]
fn test_occupancy_rejects_reversed_range() {
    let db_path = setup_test_db("cli_occupancy_reversed");

    pto("cli_occupancy_reversed")
        .args([
            "--db",
            &db_path,
            "occupancy",
            "--range",
            "2025-02-05:2025-02-03",
        ])
        .assert()
        .failure()
        .stderr(contains("before start"));
}

#[test]
fn test_sessions_without_import_fails() {
    let db_path = setup_test_db("cli_no_snapshot");

    pto("cli_no_snapshot")
        .args(["--db", &db_path, "sessions"])
        .assert()
        .failure()
        .stderr(contains("No imported snapshot"));
}

#[test]
fn test_existing_output_needs_force() {
    let db_path = prepared_db("cli_force");
    let out = temp_out("cli_force", "csv");
    fs::write(&out, "keep me").expect("seed file");

    pto("cli_force")
        .args(["--db", &db_path, "sessions", "--export", &out])
        .write_stdin("n\n")
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    pto("cli_force")
        .args(["--db", &db_path, "sessions", "--export", &out, "--force"])
        .assert()
        .success();
    assert!(
        fs::read_to_string(&out)
            .expect("read")
            .starts_with("Scheduled Date,Location")
    );
}

#[test]
fn test_snapshots_and_internal_log() {
    let db_path = prepared_db("cli_log");

    pto("cli_log")
        .args(["--db", &db_path, "snapshots"])
        .assert()
        .success()
        .stdout(contains("fixture"));

    pto("cli_log")
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("10 rows from"))
        .stdout(contains("Database initialized"));
}

#[test]
fn test_occupancy_observed_locations_export() {
    let name = "cli_occupancy_observed";
    let db_path = setup_test_db(name);
    pto(name)
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let tsv = write_tsv(
        name,
        &[
            add("2025-02-03 14:00:00", "014"),
            add("2025-02-03 14:00:00", "ICCS 014"),
        ],
    );
    pto(name)
        .args(["--db", &db_path, "import", "--tsv", &tsv])
        .assert()
        .success();

    let out = temp_out(name, "csv");
    pto(name)
        .args([
            "--db", &db_path, "occupancy", "--observed", "--range", "2025-02-03", "--format",
            "csv", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read grid");
    assert_eq!(content.lines().count(), 1 + 24 * 2);
    assert!(content.contains("2025-02-03,14,014,1"));
    assert!(content.contains("2025-02-03,14,ICCS 014,1"));
}

#[test]
fn test_occupancy_explicit_locations_export() {
    let db_path = prepared_db("cli_occupancy_locations");
    let out = temp_out("cli_occupancy_locations", "csv");

    pto("cli_occupancy_locations")
        .args([
            "--db", &db_path, "occupancy", "--locations", "014", "--range", "2025-02-03",
            "--format", "csv", "--file", &out,
        ])
        .assert()
        .success()
        .stdout(contains("3 sessions matched no location code"));

    let content = fs::read_to_string(&out).expect("read grid");
    assert_eq!(content.lines().count(), 1 + 24);
    assert!(content.contains("2025-02-03,14,014,1"));
    assert!(!content.contains(",015,"));
}

#[test]
fn test_observed_and_locations_conflict() {
    let db_path = setup_test_db("cli_occupancy_conflict");

    pto("cli_occupancy_conflict")
        .args(["--db", &db_path, "occupancy", "--observed", "--locations", "014"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}

#[test]
fn test_occupancy_rejects_overlong_range() {
    let db_path = setup_test_db("cli_occupancy_overlong");

    pto("cli_occupancy_overlong")
        .args(["--db", &db_path, "occupancy", "--range", "0001:9999"])
        .assert()
        .failure()
        .stderr(contains("more than 3660"));
}

#[test]
fn test_html_import_records_log_url() {
    let name = "cli_import_html";
    let db_path = setup_test_db(name);
    pto(name)
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let page = temp_out(name, "html");
    fs::write(
        &page,
        r#"<table class="table table-hover"><tr><td>t</td><td>add session</td>
<td>2025-02-03 14:00:00 (PST) added session X in 014 in CBTF Grainger</td></tr></table>"#,
    )
    .expect("write page");

    pto(name)
        .args(["--db", &db_path, "import", "--html", &page])
        .assert()
        .success()
        .stdout(contains("Imported 1 rows as snapshot 1"));

    pto(name)
        .args(["--db", &db_path, "snapshots"])
        .assert()
        .success()
        .stdout(contains("prairietest.com/pt/center/1362/staff/log"));
}
