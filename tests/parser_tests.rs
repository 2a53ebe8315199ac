use chrono::NaiveDate;
use ptoccupancy::core::parser::{MalformReason, parse, parse_checked};
use ptoccupancy::models::event_kind::EventKind;
use ptoccupancy::models::raw_row::RawLogRow;

mod common;
use common::detail;

#[test]
fn test_well_formed_detail_round_trip() {
    let row = RawLogRow::new(
        "add session",
        "2025-02-03 14:00:00 (PST) added session X in 014 in CBTF Y",
    );
    let ev = parse(&row);

    assert_eq!(ev.kind, EventKind::Add);
    assert_eq!(
        ev.timestamp,
        NaiveDate::from_ymd_opt(2025, 2, 3).and_then(|d| d.and_hms_opt(14, 0, 0))
    );
    assert_eq!(ev.location.as_deref(), Some("014"));
    assert_eq!(ev.tz.as_deref(), Some("PST"));
    assert!(!ev.is_malformed());
}

#[test]
fn test_add_session_label_is_ignored() {
    let row = RawLogRow::new("Add session label", detail("2025-02-03 14:00:00", "014"));
    let (ev, problem) = parse_checked(&row);

    assert_eq!(ev.kind, EventKind::Ignored);
    assert!(ev.timestamp.is_none());
    assert!(problem.is_none());
}

#[test]
fn test_label_classification_is_case_insensitive() {
    let d = detail("2025-02-03 14:00:00", "014");
    assert_eq!(parse(&RawLogRow::new("ADD SESSION", d.clone())).kind, EventKind::Add);
    assert_eq!(
        parse(&RawLogRow::new("Deleted Session", d.clone())).kind,
        EventKind::Delete
    );
    assert_eq!(
        parse(&RawLogRow::new("edit reservation", d)).kind,
        EventKind::Ignored
    );
}

#[test]
fn test_modify_session_is_not_a_signal() {
    let row = RawLogRow::new("modify session", detail("2025-02-03 14:00:00", "014"));
    assert_eq!(parse(&row).kind, EventKind::Ignored);
}

#[test]
fn test_delete_row_extracts_key() {
    let row = RawLogRow::new("deleted session", detail("2025-03-10 08:00:00", "015"));
    let ev = parse(&row);

    assert_eq!(ev.kind, EventKind::Delete);
    let key = ev.key().expect("delete row has a key");
    assert_eq!(key.location, "015");
    assert_eq!(key.timestamp.to_string(), "2025-03-10 08:00:00");
}

#[test]
fn test_date_without_seconds_is_malformed() {
    let row = RawLogRow::new(
        "add session",
        "2025-02-03 14:00 (PST) added session X in 014 in CBTF Y",
    );
    let (ev, problem) = parse_checked(&row);

    assert!(ev.is_malformed());
    assert!(ev.timestamp.is_none());
    assert_eq!(ev.location.as_deref(), Some("014"));
    let problem = problem.expect("malformed row is reported");
    assert_eq!(
        problem.reasons,
        vec![MalformReason::BadTimestamp("2025-02-03 14:00".to_string())]
    );
}

#[test]
fn test_missing_zone_code_is_malformed() {
    let row = RawLogRow::new(
        "add session",
        "2025-02-03 14:00:00 added session X in 014 in CBTF Y",
    );
    let (ev, problem) = parse_checked(&row);

    assert!(ev.timestamp.is_none());
    assert_eq!(
        problem.map(|p| p.reasons),
        Some(vec![MalformReason::NoTimestamp])
    );
}

#[test]
fn test_missing_cbtf_span_is_malformed() {
    let row = RawLogRow::new(
        "add session",
        "2025-02-03 14:00:00 (PST) added session X in 014 in cbtf Y",
    );
    let (ev, problem) = parse_checked(&row);

    assert!(ev.timestamp.is_some());
    assert!(ev.location.is_none());
    assert!(ev.key().is_none());
    let p = problem.expect("malformed row is reported");
    assert_eq!(p.reasons, vec![MalformReason::NoLocation]);
    assert!(p.to_string().contains("malformed add row"));
}

#[test]
fn test_first_location_match_wins() {
    let row = RawLogRow::new(
        "add session",
        "2025-02-03 14:00:00 (CST) added session X in ICCS 014 in CBTF Y in 015 in CBTF Z",
    );
    assert_eq!(parse(&row).location.as_deref(), Some("ICCS 014"));
}

#[test]
fn test_parse_is_deterministic() {
    let row = RawLogRow::new("add session", detail("2025-02-03 14:00:00", "014"));
    assert_eq!(parse(&row), parse(&row));
}
