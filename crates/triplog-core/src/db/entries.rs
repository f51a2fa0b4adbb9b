//! Ledger entry operations

use rusqlite::{params, types::Type, Connection, Row};
use tracing::debug;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Entry, EntryDetails, EntryKind, NewEntry};
use crate::store::EntryStore;

const ENTRY_COLUMNS: &str =
    "id, type, date, odometer, distance, amount_received, fuel_liters, fuel_cost, created_at";

/// Variant columns: (distance, amount_received, fuel_liters, fuel_cost)
fn detail_columns(
    details: &EntryDetails,
) -> (Option<f64>, Option<f64>, Option<f64>, Option<f64>) {
    match *details {
        EntryDetails::Trip {
            distance,
            amount_received,
        } => (Some(distance), Some(amount_received), None, None),
        EntryDetails::Fuel {
            fuel_liters,
            fuel_cost,
        } => (None, None, Some(fuel_liters), Some(fuel_cost)),
        EntryDetails::Reading => (None, None, None, None),
    }
}

fn row_to_entry(row: &Row) -> rusqlite::Result<Entry> {
    let kind_str: String = row.get(1)?;
    let kind: EntryKind = kind_str
        .parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, e.into()))?;

    let date_str: String = row.get(2)?;
    let date = chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    let details = match kind {
        EntryKind::Trip => EntryDetails::Trip {
            distance: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
            amount_received: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
        },
        EntryKind::Fuel => EntryDetails::Fuel {
            fuel_liters: row.get::<_, Option<f64>>(6)?.unwrap_or(0.0),
            fuel_cost: row.get::<_, Option<f64>>(7)?.unwrap_or(0.0),
        },
        EntryKind::Reading => EntryDetails::Reading,
    };

    let created_at_str: String = row.get(8)?;
    Ok(Entry {
        id: row.get(0)?,
        date,
        odometer: row.get(3)?,
        details,
        created_at: parse_datetime(&created_at_str),
    })
}

fn insert_row(conn: &Connection, entry: &NewEntry) -> Result<Entry> {
    let (distance, amount_received, fuel_liters, fuel_cost) = detail_columns(&entry.details);

    conn.execute(
        r#"
        INSERT INTO entries (type, date, odometer, distance, amount_received, fuel_liters, fuel_cost)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            entry.kind().as_str(),
            entry.date.to_string(),
            entry.odometer,
            distance,
            amount_received,
            fuel_liters,
            fuel_cost
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, kind = %entry.kind(), "Inserted entry");

    let stored = conn.query_row(
        &format!("SELECT {} FROM entries WHERE id = ?", ENTRY_COLUMNS),
        params![id],
        row_to_entry,
    )?;
    Ok(stored)
}

/// `NotFound` when no row has `id`
fn update_row(conn: &Connection, id: i64, entry: &NewEntry) -> Result<()> {
    let (distance, amount_received, fuel_liters, fuel_cost) = detail_columns(&entry.details);

    let rows = conn.execute(
        r#"
        UPDATE entries
        SET type = ?, date = ?, odometer = ?, distance = ?,
            amount_received = ?, fuel_liters = ?, fuel_cost = ?
        WHERE id = ?
        "#,
        params![
            entry.kind().as_str(),
            entry.date.to_string(),
            entry.odometer,
            distance,
            amount_received,
            fuel_liters,
            fuel_cost,
            id
        ],
    )?;

    if rows == 0 {
        return Err(Error::NotFound(format!("entry {}", id)));
    }
    Ok(())
}

impl Database {
    /// Count entries of each kind, for status output
    pub fn count_entries(&self) -> Result<Vec<(EntryKind, i64)>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT type, COUNT(*) FROM entries GROUP BY type ORDER BY type")?;

        let counts = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        counts
            .into_iter()
            .map(|(kind, count)| {
                kind.parse::<EntryKind>()
                    .map(|k| (k, count))
                    .map_err(Error::Storage)
            })
            .collect()
    }
}

impl EntryStore for Database {
    fn list_entries(&self) -> Result<Vec<Entry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM entries ORDER BY id",
            ENTRY_COLUMNS
        ))?;

        let entries = stmt
            .query_map([], row_to_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn insert_entry(&self, entry: &NewEntry) -> Result<Entry> {
        let conn = self.conn()?;
        insert_row(&conn, entry)
    }

    fn insert_entries(&self, entries: &[NewEntry]) -> Result<Vec<Entry>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let stored = entries
            .iter()
            .map(|entry| insert_row(&tx, entry))
            .collect::<Result<Vec<_>>>()?;
        tx.commit()?;
        Ok(stored)
    }

    fn update_entry(&self, id: i64, entry: &NewEntry) -> Result<()> {
        let conn = self.conn()?;
        update_row(&conn, id, entry)
    }

    fn update_entry_with(
        &self,
        id: i64,
        entry: &NewEntry,
        companions: &[NewEntry],
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        update_row(&tx, id, entry)?;
        for companion in companions {
            insert_row(&tx, companion)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_entry(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM entries WHERE id = ?", params![id])?;

        if rows == 0 {
            return Err(Error::NotFound(format!("entry {}", id)));
        }
        Ok(())
    }

    fn save_distances(&self, distances: &[(i64, f64)]) -> Result<()> {
        if distances.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        {
            let mut stmt =
                tx.prepare("UPDATE entries SET distance = ? WHERE id = ? AND type = 'trip'")?;
            for (id, distance) in distances {
                stmt.execute(params![distance, id])?;
            }
        }
        tx.commit()?;

        debug!(count = distances.len(), "Saved recomputed distances");
        Ok(())
    }

    fn get_entry(&self, id: i64) -> Result<Option<Entry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM entries WHERE id = ?",
            ENTRY_COLUMNS
        ))?;

        let mut rows = stmt.query_map(params![id], row_to_entry)?;
        Ok(rows.next().transpose()?)
    }
}
