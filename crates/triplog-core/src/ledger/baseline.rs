//! Previous-odometer baseline rules
//!
//! Two rules grew up independently in the app: the checkpoint rule used when
//! validating a trip, and the trip-only walk used by the distance recompute.
//! They disagree once fuel or standalone readings sit between trips, so each
//! is kept as its own named strategy and the active one is configurable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Entry;

/// Resolves the odometer a new trip on `as_of` is measured from
pub trait BaselineStrategy {
    /// Previous odometer on or before `as_of`, 0 when there is none
    fn previous_odometer(&self, entries: &[Entry], as_of: NaiveDate) -> f64;

    /// Short identifier for logs and config
    fn name(&self) -> &'static str;
}

/// Latest candidate in `(date, odometer)` order; full ties go to the later
/// one in store order
fn latest_by_date<'a, I>(candidates: I) -> Option<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    candidates
        .into_iter()
        .fold(None::<&'a Entry>, |best, entry| match best {
            Some(b)
                if b.date
                    .cmp(&entry.date)
                    .then_with(|| b.odometer.total_cmp(&entry.odometer))
                    .is_gt() =>
            {
                Some(b)
            }
            _ => Some(entry),
        })
}

/// Trips and readings both count as checkpoints; fuel never does
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckpointBaseline;

impl BaselineStrategy for CheckpointBaseline {
    fn previous_odometer(&self, entries: &[Entry], as_of: NaiveDate) -> f64 {
        latest_by_date(
            entries
                .iter()
                .filter(|e| e.date <= as_of && !e.is_fuel()),
        )
        .map_or(0.0, |e| e.odometer)
    }

    fn name(&self) -> &'static str {
        "checkpoint"
    }
}

/// Prefer the latest standalone reading, fall back to the latest trip
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadingAwareBaseline;

impl BaselineStrategy for ReadingAwareBaseline {
    fn previous_odometer(&self, entries: &[Entry], as_of: NaiveDate) -> f64 {
        latest_by_date(
            entries
                .iter()
                .filter(|e| e.date <= as_of && e.is_reading()),
        )
        .or_else(|| latest_by_date(entries.iter().filter(|e| e.date <= as_of && e.is_trip())))
        .map_or(0.0, |e| e.odometer)
    }

    fn name(&self) -> &'static str {
        "reading-aware"
    }
}

/// The running trip odometer the recompute pass would have reached at the
/// end of `as_of`: last non-zero trip odometer in `(date, odometer)` order
#[derive(Debug, Clone, Copy, Default)]
pub struct TripOnlyBaseline;

impl BaselineStrategy for TripOnlyBaseline {
    fn previous_odometer(&self, entries: &[Entry], as_of: NaiveDate) -> f64 {
        entries
            .iter()
            .filter(|e| e.is_trip() && e.date <= as_of && e.odometer > 0.0)
            .max_by(|a, b| {
                a.date
                    .cmp(&b.date)
                    .then_with(|| a.odometer.total_cmp(&b.odometer))
            })
            .map_or(0.0, |e| e.odometer)
    }

    fn name(&self) -> &'static str {
        "trip-only"
    }
}

/// Configured baseline rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaselineRule {
    #[default]
    Checkpoint,
    ReadingAware,
    TripOnly,
}

impl BaselineRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checkpoint => "checkpoint",
            Self::ReadingAware => "reading-aware",
            Self::TripOnly => "trip-only",
        }
    }

    fn strategy(&self) -> &'static dyn BaselineStrategy {
        match self {
            Self::Checkpoint => &CheckpointBaseline,
            Self::ReadingAware => &ReadingAwareBaseline,
            Self::TripOnly => &TripOnlyBaseline,
        }
    }
}

impl BaselineStrategy for BaselineRule {
    fn previous_odometer(&self, entries: &[Entry], as_of: NaiveDate) -> f64 {
        self.strategy().previous_odometer(entries, as_of)
    }

    fn name(&self) -> &'static str {
        self.as_str()
    }
}

impl std::str::FromStr for BaselineRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "checkpoint" => Ok(Self::Checkpoint),
            "reading-aware" => Ok(Self::ReadingAware),
            "trip-only" => Ok(Self::TripOnly),
            _ => Err(format!(
                "Unknown baseline rule: {} (valid: checkpoint, reading-aware, trip-only)",
                s
            )),
        }
    }
}

impl std::fmt::Display for BaselineRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
