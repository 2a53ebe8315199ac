use ptoccupancy::core::logic::Core;
use ptoccupancy::core::parser::parse;
use ptoccupancy::core::reconcile::{net_counts, reconcile};
use ptoccupancy::models::event::ParsedEvent;
use ptoccupancy::models::raw_row::RawLogRow;

mod common;
use common::{add, delete, ten_rows};

fn events(rows: &[RawLogRow]) -> Vec<ParsedEvent> {
    rows.iter().map(parse).collect()
}

/// All orderings of `items` (Heap's algorithm); fine for a handful of events.
fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    fn heap<T: Clone>(k: usize, a: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if k <= 1 {
            out.push(a.clone());
            return;
        }
        for i in 0..k {
            heap(k - 1, a, out);
            if k % 2 == 0 {
                a.swap(i, k - 1);
            } else {
                a.swap(0, k - 1);
            }
        }
    }

    let mut a = items.to_vec();
    let mut out = Vec::new();
    heap(a.len(), &mut a, &mut out);
    out
}

#[test]
fn test_duplicate_add_survives_single_delete() {
    let evs = events(&[
        add("2025-02-03 14:00:00", "014"),
        add("2025-02-03 14:00:00", "014"),
        delete("2025-02-03 14:00:00", "014"),
    ]);

    let sessions = reconcile(&evs);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].location, "014");
    assert_eq!(sessions[0].net, 1);
}

#[test]
fn test_lone_delete_is_dropped_without_error() {
    let evs = events(&[delete("2025-02-04 10:00:00", "015")]);

    let totals = net_counts(&evs);
    assert_eq!(totals.values().copied().collect::<Vec<_>>(), vec![-1]);
    assert!(reconcile(&evs).is_empty());
}

#[test]
fn test_add_then_delete_cancels() {
    let evs = events(&[
        add("2025-02-03 14:00:00", "014"),
        delete("2025-02-03 14:00:00", "014"),
    ]);
    assert!(reconcile(&evs).is_empty());
}

#[test]
fn test_reconcile_is_order_independent() {
    let evs = events(&[
        add("2025-02-03 14:00:00", "014"),
        delete("2025-02-03 14:00:00", "014"),
        add("2025-02-03 14:00:00", "014"),
        add("2025-02-03 15:00:00", "015"),
        delete("2025-02-03 16:00:00", "008"),
        RawLogRow::new("add session label", "anything"),
    ]);

    let expected = reconcile(&evs);
    assert_eq!(expected.len(), 2);

    for perm in permutations(&evs) {
        assert_eq!(reconcile(&perm), expected);
    }
}

#[test]
fn test_same_time_different_room_are_distinct_keys() {
    let evs = events(&[
        add("2025-02-03 14:00:00", "014"),
        add("2025-02-03 14:00:00", "015"),
        delete("2025-02-03 14:00:00", "015"),
    ]);

    let sessions = reconcile(&evs);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].location, "014");
}

#[test]
fn test_ignored_and_malformed_events_do_not_count() {
    let evs = events(&[
        RawLogRow::new("add session label", common::detail("2025-02-03 14:00:00", "014")),
        RawLogRow::new("add session", "no timestamp in 014 in CBTF"),
        RawLogRow::new("deleted session", "garbage"),
    ]);

    assert!(net_counts(&evs).is_empty());
    assert!(reconcile(&evs).is_empty());
}

#[test]
fn test_empty_input_gives_empty_set() {
    let report = Core::reconcile_rows(&[]);
    assert_eq!(report.rows_seen, 0);
    assert!(report.sessions.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_end_to_end_ten_rows() {
    let report = Core::reconcile_rows(&ten_rows());

    assert_eq!(report.rows_seen, 10);
    assert_eq!(report.adds, 6);
    assert_eq!(report.deletes, 2);
    assert_eq!(report.ignored, 0);
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(report.sessions.len(), 4);

    let slots: Vec<String> = report
        .sessions
        .iter()
        .map(|s| format!("{} {}", s.scheduled_str(), s.location))
        .collect();
    assert_eq!(
        slots,
        vec![
            "2025-02-03 14:00:00 014",
            "2025-02-03 14:00:00 015",
            "2025-02-04 10:00:00 008",
            "2025-02-05 11:00:00 015",
        ]
    );
}
