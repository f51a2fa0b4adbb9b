//! Ledger reconciliation and derived metrics
//!
//! Pure functions over a full entry set:
//! - `baseline` - previous-odometer rules
//! - `reconcile` - trip/fuel/reading validation and distance preview
//! - `recompute` - derived trip distances from chronological order
//! - `period` - date windows for aggregation
//! - `summary` - period totals, estimates, per-day series
//! - `efficiency` - km/l between consecutive refuels
//! - `listing` - log list filtering, ordering, pagination

use crate::models::Entry;

mod baseline;
mod efficiency;
mod listing;
mod period;
mod reconcile;
mod recompute;
mod summary;

pub use baseline::{
    BaselineRule, BaselineStrategy, CheckpointBaseline, ReadingAwareBaseline, TripOnlyBaseline,
};
pub use efficiency::{efficiency_report, segments, EfficiencyReport, EfficiencySegment};
pub use listing::{
    list, readings, EntryFilter, EntryPage, KindFilter, SortOrder, DEFAULT_PAGE_SIZE,
};
pub use period::Period;
pub use reconcile::{validate_fuel, validate_reading, DistancePreview, Reconciler};
pub use recompute::{changed_distances, recompute};
pub use summary::{
    daily_series, row_metrics, summarize, DailyPoint, FuelAssumptions, RowMetrics, Summary,
};

/// Sort by `(date, odometer)` ascending.
///
/// Stable: entries with equal keys keep their store order.
pub fn sort_chronologically(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.odometer.total_cmp(&b.odometer))
    });
}
