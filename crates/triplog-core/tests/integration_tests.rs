//! Integration tests for triplog-core
//!
//! These tests drive the logbook end to end over both entry stores.

use chrono::NaiveDate;
use triplog_core::{
    BaselineRule, Database, EntryStore, Logbook, LogbookConfig, MemoryStore, NewEntry, Period,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn run_scenarios<S: EntryStore>(book: &Logbook<S>) {
    // Single trip from an empty ledger
    let first = book
        .add(NewEntry::trip(date("2024-01-01"), 100.0, 400.0))
        .expect("first trip");
    assert_eq!(first.distance(), 100.0);

    // Second trip measures from the first
    let second = book
        .add(NewEntry::trip(date("2024-01-02"), 150.0, 250.0))
        .expect("second trip");
    assert_eq!(second.distance(), 50.0);
    assert_eq!(
        book.previous_odometer(date("2024-01-03"), None).unwrap(),
        150.0
    );

    // Backdated fuel leaves trip distances alone
    book.add(NewEntry::fuel(date("2024-01-01"), 120.0, 5.0, 500.0))
        .expect("fuel");
    let distances: Vec<f64> = book
        .entries()
        .unwrap()
        .iter()
        .filter(|e| e.is_trip())
        .map(|e| e.distance())
        .collect();
    assert_eq!(distances, vec![100.0, 50.0]);
    assert_eq!(
        book.previous_odometer(date("2024-01-03"), None).unwrap(),
        150.0
    );

    // Going backwards is rejected and names the minimum
    let err = book
        .add(NewEntry::trip(date("2024-01-03"), 90.0, 0.0))
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("150"));

    // A second refuel closes one efficiency segment
    book.add(NewEntry::fuel(date("2024-01-04"), 320.0, 10.0, 1000.0))
        .expect("second fuel");
    let report = book.efficiency().unwrap();
    assert_eq!(report.segments.len(), 1);
    assert_eq!(report.segments[0].km, 200.0);
    assert_eq!(report.segments[0].efficiency, 20.0);

    let summary = book.summary(Period::All, date("2024-01-31")).unwrap();
    assert_eq!(summary.distance, 150.0);
    assert_eq!(summary.received, 650.0);
    assert_eq!(summary.fuel_cost, 1500.0);
    assert_eq!(summary.profit, -850.0);
}

#[test]
fn test_scenarios_memory_store() {
    let book = Logbook::new(MemoryStore::new(), LogbookConfig::default());
    run_scenarios(&book);
}

#[test]
fn test_scenarios_sqlite_store() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let book = Logbook::new(db, LogbookConfig::default());
    run_scenarios(&book);
}

#[test]
fn test_sqlite_distances_survive_reopen() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let path = db.path().to_string();
    {
        let book = Logbook::new(db, LogbookConfig::default());
        book.add(NewEntry::trip(date("2024-01-01"), 100.0, 0.0))
            .unwrap();
        book.add(NewEntry::trip(date("2024-01-03"), 300.0, 0.0))
            .unwrap();
        book.add(NewEntry::trip(date("2024-01-02"), 250.0, 0.0))
            .unwrap();
    }

    let reopened = Database::new(&path).expect("reopen database");
    let stored: Vec<f64> = reopened
        .list_entries()
        .unwrap()
        .iter()
        .map(|e| e.distance())
        .collect();
    // Insertion order: 100, 300, 250
    assert_eq!(stored, vec![100.0, 50.0, 150.0]);
}

#[test]
fn test_baseline_rules_disagree_on_readings() {
    let ledger = |rule: BaselineRule| {
        let config = LogbookConfig {
            baseline: rule,
            ..Default::default()
        };
        let book = Logbook::new(MemoryStore::new(), config);
        book.add(NewEntry::trip(date("2024-01-01"), 100.0, 0.0))
            .unwrap();
        book.add(NewEntry::reading(date("2024-01-01"), 90.0))
            .unwrap();
        book.add(NewEntry::trip(date("2024-01-02"), 150.0, 0.0))
            .unwrap();
        book.add(NewEntry::reading(date("2024-01-03"), 80.0))
            .unwrap();
        book
    };

    let as_of = date("2024-01-04");
    let checkpoint = ledger(BaselineRule::Checkpoint);
    let reading_aware = ledger(BaselineRule::ReadingAware);
    let trip_only = ledger(BaselineRule::TripOnly);

    assert_eq!(checkpoint.previous_odometer(as_of, None).unwrap(), 80.0);
    assert_eq!(reading_aware.previous_odometer(as_of, None).unwrap(), 80.0);
    assert_eq!(trip_only.previous_odometer(as_of, None).unwrap(), 150.0);

    let as_of = date("2024-01-02");
    assert_eq!(checkpoint.previous_odometer(as_of, None).unwrap(), 150.0);
    assert_eq!(reading_aware.previous_odometer(as_of, None).unwrap(), 90.0);
}
