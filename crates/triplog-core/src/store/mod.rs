//! Persistence contract for ledger entries
//!
//! `Database` (SQLite) is the durable implementation; `MemoryStore` backs
//! tests and throwaway sessions.

use crate::error::Result;
use crate::models::{Entry, NewEntry};

mod memory;

pub use memory::MemoryStore;

/// Durable mapping from entry id to ledger entry.
///
/// Stored distances are a cache of the last recompute pass; callers never
/// trust them once the set changes shape.
pub trait EntryStore {
    /// All entries in store (insertion) order
    fn list_entries(&self) -> Result<Vec<Entry>>;

    /// Persist a new entry, assigning its id
    fn insert_entry(&self, entry: &NewEntry) -> Result<Entry>;

    /// Persist several entries as one write: all of them or none
    fn insert_entries(&self, entries: &[NewEntry]) -> Result<Vec<Entry>>;

    /// Replace the entry at `id`; `NotFound` if absent
    fn update_entry(&self, id: i64, entry: &NewEntry) -> Result<()>;

    /// Replace the entry at `id` and insert `companions` as one write
    fn update_entry_with(&self, id: i64, entry: &NewEntry, companions: &[NewEntry])
        -> Result<()>;

    /// Remove the entry at `id`; `NotFound` if absent
    fn delete_entry(&self, id: i64) -> Result<()>;

    /// Write back recomputed trip distances
    fn save_distances(&self, distances: &[(i64, f64)]) -> Result<()>;

    fn get_entry(&self, id: i64) -> Result<Option<Entry>> {
        Ok(self.list_entries()?.into_iter().find(|e| e.id == id))
    }
}
