use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use super::EntryStore;
use crate::error::{Error, Result};
use crate::models::{Entry, EntryDetails, NewEntry};

#[derive(Default)]
struct Inner {
    entries: BTreeMap<i64, Entry>,
    next_id: i64,
}

/// In-memory entry store; clones share the same entries
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(op: &str) -> Error {
        Error::Storage(format!("memory store lock poisoned ({})", op))
    }
}

impl Inner {
    fn insert(&mut self, entry: &NewEntry) -> Entry {
        self.next_id += 1;
        let id = self.next_id;
        let stored = entry.clone().into_entry(id, Utc::now());
        self.entries.insert(id, stored.clone());
        stored
    }

    fn update(&mut self, id: i64, entry: &NewEntry) -> Result<()> {
        let existing = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("entry {}", id)))?;
        existing.date = entry.date;
        existing.odometer = entry.odometer;
        existing.details = entry.details.clone();
        Ok(())
    }
}

impl EntryStore for MemoryStore {
    fn list_entries(&self) -> Result<Vec<Entry>> {
        let inner = self.inner.read().map_err(|_| Self::poisoned("read"))?;
        Ok(inner.entries.values().cloned().collect())
    }

    fn insert_entry(&self, entry: &NewEntry) -> Result<Entry> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned("write"))?;
        Ok(inner.insert(entry))
    }

    fn insert_entries(&self, entries: &[NewEntry]) -> Result<Vec<Entry>> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned("write"))?;
        Ok(entries.iter().map(|e| inner.insert(e)).collect())
    }

    fn update_entry(&self, id: i64, entry: &NewEntry) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned("write"))?;
        inner.update(id, entry)
    }

    fn update_entry_with(
        &self,
        id: i64,
        entry: &NewEntry,
        companions: &[NewEntry],
    ) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned("write"))?;
        // Only the update can fail, so it goes first
        inner.update(id, entry)?;
        for companion in companions {
            inner.insert(companion);
        }
        Ok(())
    }

    fn delete_entry(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned("write"))?;
        inner
            .entries
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("entry {}", id)))
    }

    fn save_distances(&self, distances: &[(i64, f64)]) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned("write"))?;
        for (id, value) in distances {
            if let Some(Entry {
                details: EntryDetails::Trip { distance, .. },
                ..
            }) = inner.entries.get_mut(id)
            {
                *distance = *value;
            }
        }
        Ok(())
    }
}
