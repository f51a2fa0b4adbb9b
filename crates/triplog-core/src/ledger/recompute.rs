//! Trip distance recompute pass

use std::collections::HashMap;

use super::sort_chronologically;
use crate::models::{Entry, EntryDetails};

/// Re-derive every trip's distance from `(date, odometer)` order.
///
/// Only trips advance the running odometer, and a zero odometer leaves it
/// where it was. Returns the entries in chronological order.
pub fn recompute(mut entries: Vec<Entry>) -> Vec<Entry> {
    sort_chronologically(&mut entries);

    let mut last_trip_odometer = 0.0_f64;
    for entry in entries.iter_mut() {
        let odometer = entry.odometer;
        if let EntryDetails::Trip { distance, .. } = &mut entry.details {
            *distance = (odometer - last_trip_odometer).max(0.0);
            if odometer > 0.0 {
                last_trip_odometer = odometer;
            }
        }
    }

    entries
}

/// Trip distances in `after` that differ from what `before` holds
pub fn changed_distances(before: &[Entry], after: &[Entry]) -> Vec<(i64, f64)> {
    let stored: HashMap<i64, f64> = before
        .iter()
        .filter(|e| e.is_trip())
        .map(|e| (e.id, e.distance()))
        .collect();

    after
        .iter()
        .filter(|e| e.is_trip())
        .filter(|e| stored.get(&e.id) != Some(&e.distance()))
        .map(|e| (e.id, e.distance()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::test_support::*;

    fn distances(entries: &[Entry]) -> Vec<(i64, f64)> {
        entries
            .iter()
            .filter(|e| e.is_trip())
            .map(|e| (e.id, e.distance()))
            .collect()
    }

    #[test]
    fn test_single_trip_from_zero() {
        let entries = recompute(vec![trip(1, "2024-01-01", 100.0, 0.0)]);
        assert_eq!(distances(&entries), vec![(1, 100.0)]);
    }

    #[test]
    fn test_second_trip_distance() {
        let entries = recompute(vec![
            trip(2, "2024-01-02", 150.0, 0.0),
            trip(1, "2024-01-01", 100.0, 0.0),
        ]);
        assert_eq!(distances(&entries), vec![(1, 100.0), (2, 50.0)]);
    }

    #[test]
    fn test_out_of_order_fuel_leaves_trip_distances() {
        let entries = recompute(vec![
            trip(1, "2024-01-01", 100.0, 0.0),
            trip(2, "2024-01-02", 150.0, 0.0),
            fuel(3, "2024-01-01", 120.0, 5.0, 500.0),
        ]);
        assert_eq!(distances(&entries), vec![(1, 100.0), (2, 50.0)]);
    }

    #[test]
    fn test_readings_do_not_move_running_odometer() {
        let entries = recompute(vec![
            trip(1, "2024-01-01", 100.0, 0.0),
            reading(2, "2024-01-02", 140.0),
            trip(3, "2024-01-03", 150.0, 0.0),
        ]);
        assert_eq!(distances(&entries), vec![(1, 100.0), (3, 50.0)]);
    }

    #[test]
    fn test_zero_odometer_trip_keeps_running_value() {
        let entries = recompute(vec![
            trip(1, "2024-01-01", 100.0, 0.0),
            trip(2, "2024-01-02", 0.0, 0.0),
            trip(3, "2024-01-03", 130.0, 0.0),
        ]);
        assert_eq!(distances(&entries), vec![(1, 100.0), (2, 0.0), (3, 30.0)]);
    }

    #[test]
    fn test_idempotent_and_non_negative() {
        let input = vec![
            trip(4, "2024-01-05", 90.0, 0.0),
            trip(1, "2024-01-01", 100.0, 0.0),
            fuel(2, "2024-01-02", 120.0, 5.0, 500.0),
            trip(3, "2024-01-03", 180.0, 0.0),
            reading(5, "2024-01-04", 185.0),
        ];
        let once = recompute(input);
        let twice = recompute(once.clone());
        assert_eq!(once, twice);
        assert!(once.iter().all(|e| e.distance() >= 0.0));
        // Trip 4 sits below the running odometer and clamps to 0
        assert_eq!(distances(&once), vec![(1, 100.0), (3, 80.0), (4, 0.0)]);
    }

    #[test]
    fn test_changed_distances() {
        let before = vec![
            trip(1, "2024-01-01", 100.0, 0.0),
            trip(2, "2024-01-02", 150.0, 0.0),
        ];
        let after = recompute(before.clone());
        assert_eq!(changed_distances(&before, &after), vec![(1, 100.0), (2, 50.0)]);
        assert!(changed_distances(&after, &recompute(after.clone())).is_empty());
    }
}
