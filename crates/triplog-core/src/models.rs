//! Domain models for triplog

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind of ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A paid drive, distance derived from the odometer timeline
    Trip,
    /// A refuel
    Fuel,
    /// A standalone odometer checkpoint
    Reading,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trip => "trip",
            Self::Fuel => "fuel",
            Self::Reading => "reading",
        }
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trip" => Ok(Self::Trip),
            "fuel" => Ok(Self::Fuel),
            "reading" => Ok(Self::Reading),
            _ => Err(format!("Unknown entry type: {}", s)),
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Variant-specific fields of an entry.
///
/// Serialized inline with the entry, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntryDetails {
    Trip {
        /// Derived by the recompute pass, never user-entered
        #[serde(default)]
        distance: f64,
        #[serde(default)]
        amount_received: f64,
    },
    Fuel {
        fuel_liters: f64,
        fuel_cost: f64,
    },
    Reading,
}

impl EntryDetails {
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Trip { .. } => EntryKind::Trip,
            Self::Fuel { .. } => EntryKind::Fuel,
            Self::Reading => EntryKind::Reading,
        }
    }
}

/// A ledger record: trip, fuel, or standalone odometer reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub date: NaiveDate,
    pub odometer: f64,
    #[serde(flatten)]
    pub details: EntryDetails,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        self.details.kind()
    }

    pub fn is_trip(&self) -> bool {
        matches!(self.details, EntryDetails::Trip { .. })
    }

    pub fn is_fuel(&self) -> bool {
        matches!(self.details, EntryDetails::Fuel { .. })
    }

    pub fn is_reading(&self) -> bool {
        matches!(self.details, EntryDetails::Reading)
    }

    /// Trip distance, 0 for other kinds
    pub fn distance(&self) -> f64 {
        match self.details {
            EntryDetails::Trip { distance, .. } => distance,
            _ => 0.0,
        }
    }

    /// Trip earnings, 0 for other kinds
    pub fn amount_received(&self) -> f64 {
        match self.details {
            EntryDetails::Trip {
                amount_received, ..
            } => amount_received,
            _ => 0.0,
        }
    }

    /// Refuel volume, 0 for other kinds
    pub fn fuel_liters(&self) -> f64 {
        match self.details {
            EntryDetails::Fuel { fuel_liters, .. } => fuel_liters,
            _ => 0.0,
        }
    }

    /// Refuel cost, 0 for other kinds
    pub fn fuel_cost(&self) -> f64 {
        match self.details {
            EntryDetails::Fuel { fuel_cost, .. } => fuel_cost,
            _ => 0.0,
        }
    }

    /// The user-editable part of this entry
    pub fn to_new(&self) -> NewEntry {
        NewEntry {
            date: self.date,
            odometer: self.odometer,
            details: self.details.clone(),
        }
    }
}

/// Entry fields before an id is assigned (create and edit input)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub odometer: f64,
    #[serde(flatten)]
    pub details: EntryDetails,
}

impl NewEntry {
    pub fn trip(date: NaiveDate, odometer: f64, amount_received: f64) -> Self {
        Self {
            date,
            odometer,
            details: EntryDetails::Trip {
                distance: 0.0,
                amount_received,
            },
        }
    }

    pub fn fuel(date: NaiveDate, odometer: f64, fuel_liters: f64, fuel_cost: f64) -> Self {
        Self {
            date,
            odometer,
            details: EntryDetails::Fuel {
                fuel_liters,
                fuel_cost,
            },
        }
    }

    pub fn reading(date: NaiveDate, odometer: f64) -> Self {
        Self {
            date,
            odometer,
            details: EntryDetails::Reading,
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.details.kind()
    }

    /// Attach identity, producing a stored entry
    pub fn into_entry(self, id: i64, created_at: DateTime<Utc>) -> Entry {
        Entry {
            id,
            date: self.date,
            odometer: self.odometer,
            details: self.details,
            created_at,
        }
    }
}
