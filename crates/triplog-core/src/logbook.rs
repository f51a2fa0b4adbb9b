//! Logbook service
//!
//! Every mutation follows the same flow: load the full entry set, validate
//! against it, persist, then recompute trip distances over the whole set and
//! write back the ones that moved. Views always recompute from the stored
//! set rather than trusting stored distances.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::LogbookConfig;
use crate::error::{Error, Result};
use crate::ledger::{
    self, changed_distances, daily_series, efficiency_report, recompute, summarize, BaselineRule,
    DailyPoint, DistancePreview, EfficiencyReport, EntryFilter, EntryPage, Period, Reconciler,
    RowMetrics, Summary,
};
use crate::models::{Entry, EntryKind, NewEntry};
use crate::store::EntryStore;

/// Summary and chart series for one period
#[derive(Debug, Clone, Serialize)]
pub struct PeriodReport {
    pub period: Period,
    pub label: String,
    /// Inclusive bounds, absent for `all`
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub summary: Summary,
    pub series: Vec<DailyPoint>,
}

/// A log list row with its per-row estimates
#[derive(Debug, Clone, Serialize)]
pub struct LogRow {
    #[serde(flatten)]
    pub entry: Entry,
    pub metrics: RowMetrics,
}

/// One page of the log list with per-row estimates
#[derive(Debug, Clone, Serialize)]
pub struct LogPage {
    pub rows: Vec<LogRow>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// Ledger operations over an entry store
pub struct Logbook<S> {
    store: S,
    config: LogbookConfig,
    reconciler: Reconciler<BaselineRule>,
}

impl<S: EntryStore> Logbook<S> {
    pub fn new(store: S, config: LogbookConfig) -> Self {
        Self {
            store,
            reconciler: Reconciler::new(config.baseline),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LogbookConfig {
        &self.config
    }

    /// All entries with freshly derived distances, in chronological order
    pub fn entries(&self) -> Result<Vec<Entry>> {
        Ok(recompute(self.store.list_entries()?))
    }

    pub fn get(&self, id: i64) -> Result<Entry> {
        self.entries()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("entry {}", id)))
    }

    /// Baseline odometer for a trip on `as_of`
    pub fn previous_odometer(&self, as_of: NaiveDate, exclude: Option<i64>) -> Result<f64> {
        let entries = self.store.list_entries()?;
        Ok(self.reconciler.previous_odometer(&entries, as_of, exclude))
    }

    /// Distance-so-far preview while a trip is being entered
    pub fn preview(
        &self,
        as_of: NaiveDate,
        odometer: f64,
        exclude: Option<i64>,
    ) -> Result<DistancePreview> {
        let entries = self.store.list_entries()?;
        Ok(self.reconciler.preview(&entries, as_of, odometer, exclude))
    }

    /// Validate and persist a new entry, with its mirrored reading if enabled
    pub fn add(&self, new: NewEntry) -> Result<Entry> {
        let entries = self.store.list_entries()?;
        let validated = self.reconciler.validate(&entries, new, None)?;

        let mirrored = self.mirrored_reading(&validated);
        let mut batch = vec![validated];
        batch.extend(mirrored);
        let stored = self.store.insert_entries(&batch)?;
        let entry = stored
            .first()
            .ok_or_else(|| Error::Storage("insert returned no entry".to_string()))?;
        info!(id = entry.id, kind = %entry.kind(), date = %entry.date, odometer = entry.odometer, "Added entry");
        if let Some(reading) = stored.get(1) {
            debug!(id = reading.id, trip_id = entry.id, "Mirrored trip odometer as reading");
        }

        self.settle(entry.id)
    }

    /// Replace the entry at `id`; the entry itself is left out of its own baseline
    pub fn update(&self, id: i64, new: NewEntry) -> Result<Entry> {
        let entries = self.store.list_entries()?;
        if !entries.iter().any(|e| e.id == id) {
            return Err(Error::NotFound(format!("entry {}", id)));
        }
        let validated = self.reconciler.validate(&entries, new, Some(id))?;

        let mirrored: Vec<NewEntry> = self.mirrored_reading(&validated).into_iter().collect();
        self.store.update_entry_with(id, &validated, &mirrored)?;
        info!(id, kind = %validated.kind(), date = %validated.date, odometer = validated.odometer, mirrored = !mirrored.is_empty(), "Updated entry");

        self.settle(id)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_entry(id)?;
        info!(id, "Deleted entry");
        self.reconcile()?;
        Ok(())
    }

    /// Recompute distances over the full set and write back what changed
    pub fn reconcile(&self) -> Result<Vec<Entry>> {
        let stored = self.store.list_entries()?;
        let entries = recompute(stored.clone());
        let changed = changed_distances(&stored, &entries);
        if !changed.is_empty() {
            self.store.save_distances(&changed)?;
        }
        debug!(total = entries.len(), changed = changed.len(), "Recomputed distances");
        Ok(entries)
    }

    fn settle(&self, id: i64) -> Result<Entry> {
        self.reconcile()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("entry {}", id)))
    }

    /// Standalone reading that shadows a trip when mirroring is on
    fn mirrored_reading(&self, entry: &NewEntry) -> Option<NewEntry> {
        (self.config.mirror_trip_readings && entry.kind() == EntryKind::Trip)
            .then(|| NewEntry::reading(entry.date, entry.odometer))
    }

    /// Summary and per-day series for `period` around `reference`
    pub fn report(&self, period: Period, reference: NaiveDate) -> Result<PeriodReport> {
        let filtered = period.filter(&self.entries()?, reference);
        let bounds = period.bounds(reference);
        Ok(PeriodReport {
            period,
            label: period.label(reference),
            from: bounds.map(|(from, _)| from),
            to: bounds.map(|(_, to)| to),
            summary: summarize(&filtered, &self.config.fuel),
            series: daily_series(&filtered),
        })
    }

    pub fn summary(&self, period: Period, reference: NaiveDate) -> Result<Summary> {
        let filtered = period.filter(&self.entries()?, reference);
        Ok(summarize(&filtered, &self.config.fuel))
    }

    pub fn series(&self, period: Period, reference: NaiveDate) -> Result<Vec<DailyPoint>> {
        let filtered = period.filter(&self.entries()?, reference);
        Ok(daily_series(&filtered))
    }

    pub fn efficiency(&self) -> Result<EfficiencyReport> {
        Ok(efficiency_report(&self.entries()?))
    }

    /// Log list page; standalone readings are never included
    pub fn list(&self, filter: &EntryFilter) -> Result<EntryPage> {
        Ok(ledger::list(&self.entries()?, filter))
    }

    /// Log list page with per-row fuel estimates and profit
    pub fn log_page(&self, filter: &EntryFilter) -> Result<LogPage> {
        let page = self.list(filter)?;
        let rows = page
            .entries
            .into_iter()
            .map(|entry| LogRow {
                metrics: ledger::row_metrics(&entry, &self.config.fuel),
                entry,
            })
            .collect();
        Ok(LogPage {
            rows,
            page: page.page,
            total_pages: page.total_pages,
            total: page.total,
        })
    }

    pub fn readings(&self) -> Result<Vec<Entry>> {
        Ok(ledger::readings(&self.store.list_entries()?))
    }
}
