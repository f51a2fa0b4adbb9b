//! Fuel efficiency between consecutive refuels

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Entry;

/// Odometer interval between two consecutive fuel entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencySegment {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub km: f64,
    /// Liters bought at the closing refuel
    pub liters: f64,
    pub cost: f64,
    /// km per liter, 0 when no liters were recorded
    pub efficiency: f64,
}

/// Segments across all fuel entries; `max(0, n - 1)` for `n` refuels
pub fn segments(entries: &[Entry]) -> Vec<EfficiencySegment> {
    let mut fuel: Vec<&Entry> = entries.iter().filter(|e| e.is_fuel()).collect();
    fuel.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.odometer.total_cmp(&b.odometer))
    });

    fuel.windows(2)
        .map(|pair| {
            let (last, this) = (pair[0], pair[1]);
            let liters = this.fuel_liters();
            let km = (this.odometer - last.odometer).max(0.0);
            EfficiencySegment {
                from_date: last.date,
                to_date: this.date,
                km,
                liters,
                cost: this.fuel_cost(),
                efficiency: if liters > 0.0 { km / liters } else { 0.0 },
            }
        })
        .collect()
}

/// Segments plus the overall km/l across them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EfficiencyReport {
    pub segments: Vec<EfficiencySegment>,
    pub total_km: f64,
    pub total_liters: f64,
    pub total_cost: f64,
    pub overall_efficiency: f64,
}

pub fn efficiency_report(entries: &[Entry]) -> EfficiencyReport {
    let segments = segments(entries);
    let total_km: f64 = segments.iter().map(|s| s.km).sum();
    let total_liters: f64 = segments.iter().map(|s| s.liters).sum();
    let total_cost: f64 = segments.iter().map(|s| s.cost).sum();

    EfficiencyReport {
        overall_efficiency: if total_liters > 0.0 {
            total_km / total_liters
        } else {
            0.0
        },
        segments,
        total_km,
        total_liters,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::test_support::*;

    #[test]
    fn test_two_refuels_one_segment() {
        let entries = vec![
            fuel(1, "2024-01-01", 100.0, 5.0, 500.0),
            fuel(2, "2024-01-05", 300.0, 10.0, 1000.0),
        ];
        let segs = segments(&entries);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].km, 200.0);
        assert_eq!(segs[0].liters, 10.0);
        assert_eq!(segs[0].cost, 1000.0);
        assert_eq!(segs[0].efficiency, 20.0);
        assert_eq!(segs[0].from_date, date("2024-01-01"));
        assert_eq!(segs[0].to_date, date("2024-01-05"));
    }

    #[test]
    fn test_segment_count() {
        for n in 0..5usize {
            let entries: Vec<Entry> = (0..n)
                .map(|i| {
                    fuel(
                        i as i64,
                        &format!("2024-01-{:02}", i + 1),
                        100.0 * (i + 1) as f64,
                        5.0,
                        500.0,
                    )
                })
                .collect();
            assert_eq!(segments(&entries).len(), n.saturating_sub(1));
        }
    }

    #[test]
    fn test_non_fuel_entries_ignored() {
        let entries = vec![
            fuel(1, "2024-01-01", 100.0, 5.0, 500.0),
            trip(2, "2024-01-02", 200.0, 300.0),
            reading(3, "2024-01-03", 250.0),
            fuel(4, "2024-01-04", 300.0, 10.0, 1000.0),
        ];
        let segs = segments(&entries);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].km, 200.0);
    }

    #[test]
    fn test_out_of_order_and_zero_liters() {
        let entries = vec![
            fuel(1, "2024-01-05", 300.0, 0.0, 0.0),
            fuel(2, "2024-01-01", 100.0, 5.0, 500.0),
        ];
        let segs = segments(&entries);
        assert_eq!(segs[0].km, 200.0);
        assert_eq!(segs[0].efficiency, 0.0);
    }

    #[test]
    fn test_report_overall() {
        let entries = vec![
            fuel(1, "2024-01-01", 100.0, 5.0, 500.0),
            fuel(2, "2024-01-05", 300.0, 10.0, 1000.0),
            fuel(3, "2024-01-09", 450.0, 10.0, 1000.0),
        ];
        let report = efficiency_report(&entries);
        assert_eq!(report.segments.len(), 2);
        assert_eq!(report.total_km, 350.0);
        assert_eq!(report.total_liters, 20.0);
        assert_eq!(report.overall_efficiency, 17.5);

        assert_eq!(efficiency_report(&[]).overall_efficiency, 0.0);
    }
}
