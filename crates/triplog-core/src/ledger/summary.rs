//! Period totals, fuel estimates, and the per-day series

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Entry, EntryDetails};

/// Assumed fuel economy for the estimate path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelAssumptions {
    pub km_per_liter: f64,
    pub price_per_liter: f64,
}

impl Default for FuelAssumptions {
    fn default() -> Self {
        Self {
            km_per_liter: 16.0,
            price_per_liter: 100.0,
        }
    }
}

impl FuelAssumptions {
    /// Estimated liters burned over `km`
    pub fn liters_for(&self, km: f64) -> f64 {
        if km > 0.0 && self.km_per_liter > 0.0 {
            km / self.km_per_liter
        } else {
            0.0
        }
    }

    /// Estimated fuel spend over `km`
    pub fn cost_for(&self, km: f64) -> f64 {
        self.liters_for(km) * self.price_per_liter
    }
}

/// Aggregate metrics for a set of entries
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub distance: f64,
    pub received: f64,
    /// Actual spend from fuel entries
    pub fuel_cost: f64,
    pub fuel_liters: f64,
    pub profit: f64,
    pub profit_per_km: f64,
    /// Estimated from distance and the configured fuel economy
    pub est_fuel_liters: f64,
    pub est_fuel_cost: f64,
    pub trip_count: usize,
    pub fuel_count: usize,
}

/// Reduce entries (normally already filtered to a period) to a summary
pub fn summarize(entries: &[Entry], fuel: &FuelAssumptions) -> Summary {
    let mut summary = Summary::default();

    for entry in entries {
        match entry.details {
            EntryDetails::Trip {
                distance,
                amount_received,
            } => {
                summary.distance += distance;
                summary.received += amount_received;
                summary.trip_count += 1;
            }
            EntryDetails::Fuel {
                fuel_liters,
                fuel_cost,
            } => {
                summary.fuel_liters += fuel_liters;
                summary.fuel_cost += fuel_cost;
                summary.fuel_count += 1;
            }
            EntryDetails::Reading => {}
        }
    }

    summary.profit = summary.received - summary.fuel_cost;
    summary.profit_per_km = if summary.distance > 0.0 {
        summary.profit / summary.distance
    } else {
        0.0
    };
    summary.est_fuel_liters = fuel.liters_for(summary.distance);
    summary.est_fuel_cost = fuel.cost_for(summary.distance);

    summary
}

/// One chart point
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub received: f64,
    pub distance: f64,
    pub fuel_cost: f64,
}

/// One point per distinct date present, ascending
pub fn daily_series(entries: &[Entry]) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, DailyPoint> = BTreeMap::new();

    for entry in entries {
        let point = days.entry(entry.date).or_insert_with(|| DailyPoint {
            date: entry.date,
            ..Default::default()
        });
        point.received += entry.amount_received();
        point.distance += entry.distance();
        point.fuel_cost += entry.fuel_cost();
    }

    days.into_values().collect()
}

/// Per-row figures for the log table
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RowMetrics {
    pub distance: f64,
    pub amount: f64,
    /// Estimated for trips, actual for fuel
    pub fuel_used: f64,
    pub fuel_cost: f64,
    pub profit: f64,
}

pub fn row_metrics(entry: &Entry, fuel: &FuelAssumptions) -> RowMetrics {
    match entry.details {
        EntryDetails::Trip {
            distance,
            amount_received,
        } => {
            let fuel_cost = fuel.cost_for(distance);
            RowMetrics {
                distance,
                amount: amount_received,
                fuel_used: fuel.liters_for(distance),
                fuel_cost,
                profit: amount_received - fuel_cost,
            }
        }
        EntryDetails::Fuel {
            fuel_liters,
            fuel_cost,
        } => RowMetrics {
            fuel_used: fuel_liters,
            fuel_cost,
            profit: -fuel_cost,
            ..Default::default()
        },
        EntryDetails::Reading => RowMetrics::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::recompute;
    use crate::ledger::test_support::*;
    use crate::ledger::Period;

    fn ledger() -> Vec<Entry> {
        recompute(vec![
            trip(1, "2024-01-01", 100.0, 500.0),
            trip(2, "2024-01-02", 150.0, 300.0),
            fuel(3, "2024-01-02", 160.0, 5.0, 400.0),
            reading(4, "2024-01-03", 170.0),
            trip(5, "2024-01-04", 230.0, 200.0),
        ])
    }

    #[test]
    fn test_summarize_totals() {
        let summary = summarize(&ledger(), &FuelAssumptions::default());
        assert_eq!(summary.distance, 230.0);
        assert_eq!(summary.received, 1000.0);
        assert_eq!(summary.fuel_cost, 400.0);
        assert_eq!(summary.fuel_liters, 5.0);
        assert_eq!(summary.profit, 600.0);
        assert!((summary.profit_per_km - 600.0 / 230.0).abs() < 1e-9);
        assert_eq!(summary.trip_count, 3);
        assert_eq!(summary.fuel_count, 1);
    }

    #[test]
    fn test_estimate_path() {
        let summary = summarize(&ledger(), &FuelAssumptions::default());
        assert!((summary.est_fuel_liters - 230.0 / 16.0).abs() < 1e-9);
        assert!((summary.est_fuel_cost - 230.0 / 16.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary_has_zero_rates() {
        let summary = summarize(&[], &FuelAssumptions::default());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_distance_additive_over_disjoint_ranges() {
        let entries = ledger();
        let reference = date("2024-01-15");
        let first = Period::range("2024-01-01", "2024-01-02").unwrap();
        let second = Period::range("2024-01-03", "2024-01-31").unwrap();
        let fuel = FuelAssumptions::default();

        let whole = summarize(&entries, &fuel);
        let a = summarize(&first.filter(&entries, reference), &fuel);
        let b = summarize(&second.filter(&entries, reference), &fuel);
        assert_eq!(whole.distance, a.distance + b.distance);
        assert_eq!(whole.received, a.received + b.received);
    }

    #[test]
    fn test_daily_series_one_point_per_date() {
        let series = daily_series(&ledger());
        let dates: Vec<String> = series.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(
            dates,
            vec!["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"]
        );
        assert_eq!(series[1].received, 300.0);
        assert_eq!(series[1].distance, 50.0);
        assert_eq!(series[1].fuel_cost, 400.0);
        assert_eq!(series[2], DailyPoint {
            date: date("2024-01-03"),
            ..Default::default()
        });
    }

    #[test]
    fn test_row_metrics() {
        let entries = ledger();
        let fuel = FuelAssumptions::default();

        let trip_row = row_metrics(&entries[0], &fuel);
        assert_eq!(trip_row.distance, 100.0);
        assert_eq!(trip_row.fuel_used, 6.25);
        assert_eq!(trip_row.fuel_cost, 625.0);
        assert_eq!(trip_row.profit, -125.0);

        let fuel_row = row_metrics(&entries[2], &fuel);
        assert_eq!(fuel_row.fuel_used, 5.0);
        assert_eq!(fuel_row.profit, -400.0);
    }
}
