//! Database tests

use super::*;
use crate::models::*;
use crate::store::EntryStore;

fn date(s: &str) -> chrono::NaiveDate {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert!(db.list_entries().unwrap().is_empty());
    assert!(db.path().contains("triplog_test_"));
}

#[test]
fn test_entries_schema_exists() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();

    let result: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('entries') WHERE name IN ('id', 'type', 'date', 'odometer', 'distance', 'amount_received', 'fuel_liters', 'fuel_cost', 'created_at')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(result, 9, "entries table should have 9 expected columns");
}

#[test]
fn test_entry_crud_round_trip() {
    let db = Database::in_memory().unwrap();

    let trip = db
        .insert_entry(&NewEntry::trip(date("2024-01-01"), 100.0, 250.0))
        .unwrap();
    assert!(trip.id > 0);
    assert_eq!(trip.kind(), EntryKind::Trip);
    assert_eq!(trip.amount_received(), 250.0);

    let fuel = db
        .insert_entry(&NewEntry::fuel(date("2024-01-02"), 120.0, 5.0, 500.0))
        .unwrap();
    assert_eq!(fuel.fuel_liters(), 5.0);
    assert_eq!(fuel.fuel_cost(), 500.0);

    let reading = db
        .insert_entry(&NewEntry::reading(date("2024-01-03"), 130.0))
        .unwrap();
    assert!(reading.is_reading());

    let entries = db.list_entries().unwrap();
    let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![trip.id, fuel.id, reading.id]);
    assert_eq!(entries[1].date, date("2024-01-02"));
}

#[test]
fn test_update_entry_can_change_kind() {
    let db = Database::in_memory().unwrap();
    let entry = db
        .insert_entry(&NewEntry::trip(date("2024-01-01"), 100.0, 250.0))
        .unwrap();

    db.update_entry(entry.id, &NewEntry::reading(date("2024-01-04"), 140.0))
        .unwrap();

    let updated = db.get_entry(entry.id).unwrap().unwrap();
    assert!(updated.is_reading());
    assert_eq!(updated.date, date("2024-01-04"));
    assert_eq!(updated.odometer, 140.0);
    assert_eq!(updated.amount_received(), 0.0);
}

#[test]
fn test_missing_entry_not_found() {
    let db = Database::in_memory().unwrap();
    let new = NewEntry::reading(date("2024-01-01"), 100.0);

    assert!(db.update_entry(999, &new).unwrap_err().is_not_found());
    assert!(db.delete_entry(999).unwrap_err().is_not_found());
    assert!(db.get_entry(999).unwrap().is_none());
}

#[test]
fn test_delete_entry() {
    let db = Database::in_memory().unwrap();
    let entry = db
        .insert_entry(&NewEntry::reading(date("2024-01-01"), 100.0))
        .unwrap();

    db.delete_entry(entry.id).unwrap();
    assert!(db.list_entries().unwrap().is_empty());
    assert!(db.delete_entry(entry.id).unwrap_err().is_not_found());
}

#[test]
fn test_save_distances_only_touches_trips() {
    let db = Database::in_memory().unwrap();
    let trip = db
        .insert_entry(&NewEntry::trip(date("2024-01-01"), 100.0, 0.0))
        .unwrap();
    let fuel = db
        .insert_entry(&NewEntry::fuel(date("2024-01-01"), 110.0, 5.0, 500.0))
        .unwrap();

    db.save_distances(&[(trip.id, 100.0), (fuel.id, 42.0)])
        .unwrap();

    assert_eq!(db.get_entry(trip.id).unwrap().unwrap().distance(), 100.0);

    let conn = db.conn().unwrap();
    let fuel_distance: Option<f64> = conn
        .query_row(
            "SELECT distance FROM entries WHERE id = ?",
            [fuel.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(fuel_distance, None);
}

#[test]
fn test_insert_entries_commits_together() {
    let db = Database::in_memory().unwrap();
    let stored = db
        .insert_entries(&[
            NewEntry::trip(date("2024-01-01"), 100.0, 250.0),
            NewEntry::reading(date("2024-01-01"), 100.0),
        ])
        .unwrap();

    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].amount_received(), 250.0);
    assert!(stored[1].is_reading());
    assert_eq!(db.list_entries().unwrap(), stored);
}

#[test]
fn test_update_entry_with_rolls_back_companions_on_missing_target() {
    let db = Database::in_memory().unwrap();
    let err = db
        .update_entry_with(
            999,
            &NewEntry::trip(date("2024-01-01"), 100.0, 0.0),
            &[NewEntry::reading(date("2024-01-01"), 100.0)],
        )
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(db.list_entries().unwrap().is_empty());
}

#[test]
fn test_update_entry_with_writes_companions() {
    let db = Database::in_memory().unwrap();
    let entry = db
        .insert_entry(&NewEntry::trip(date("2024-01-01"), 100.0, 0.0))
        .unwrap();
    db.update_entry_with(
        entry.id,
        &NewEntry::trip(date("2024-01-01"), 120.0, 0.0),
        &[NewEntry::reading(date("2024-01-01"), 120.0)],
    )
    .unwrap();

    let entries = db.list_entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].odometer, 120.0);
    assert!(entries[1].is_reading());
}

#[test]
fn test_count_entries() {
    let db = Database::in_memory().unwrap();
    db.insert_entry(&NewEntry::trip(date("2024-01-01"), 100.0, 0.0))
        .unwrap();
    db.insert_entry(&NewEntry::trip(date("2024-01-02"), 150.0, 0.0))
        .unwrap();
    db.insert_entry(&NewEntry::reading(date("2024-01-02"), 150.0))
        .unwrap();

    let counts = db.count_entries().unwrap();
    assert_eq!(
        counts,
        vec![(EntryKind::Reading, 1), (EntryKind::Trip, 2)]
    );
}

#[test]
fn test_audit_log() {
    let db = Database::in_memory().unwrap();

    db.log_audit("alice@example.com", "create_entry", Some("entry"), Some(1), None)
        .unwrap();
    db.log_audit("api-key", "list_entries", None, None, Some("{\"page\":0}"))
        .unwrap();

    let log = db.list_audit_log(10).unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].action, "list_entries");
    assert_eq!(log[1].user_email, "alice@example.com");
    assert_eq!(log[1].entity_id, Some(1));

    assert_eq!(db.list_audit_log(1).unwrap().len(), 1);
}
