//! Mutation gate: baseline lookup and per-kind validation

use chrono::NaiveDate;
use serde::Serialize;

use super::baseline::{BaselineRule, BaselineStrategy};
use crate::error::ValidationError;
use crate::models::{Entry, EntryDetails, NewEntry};

/// Live distance preview for a trip being entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistancePreview {
    pub previous_odometer: f64,
    pub odometer: f64,
    pub distance: f64,
}

/// Validates new and edited entries against the current entry set
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler<B = BaselineRule> {
    baseline: B,
}

impl<B: BaselineStrategy> Reconciler<B> {
    pub fn new(baseline: B) -> Self {
        Self { baseline }
    }

    pub fn baseline(&self) -> &B {
        &self.baseline
    }

    /// Baseline odometer for `as_of`, leaving out the entry being edited
    pub fn previous_odometer(
        &self,
        entries: &[Entry],
        as_of: NaiveDate,
        exclude: Option<i64>,
    ) -> f64 {
        match exclude {
            Some(id) => {
                let others: Vec<Entry> =
                    entries.iter().filter(|e| e.id != id).cloned().collect();
                self.baseline.previous_odometer(&others, as_of)
            }
            None => self.baseline.previous_odometer(entries, as_of),
        }
    }

    /// Distance so far for an odometer value as the user types it
    pub fn preview(
        &self,
        entries: &[Entry],
        as_of: NaiveDate,
        odometer: f64,
        exclude: Option<i64>,
    ) -> DistancePreview {
        let previous_odometer = self.previous_odometer(entries, as_of, exclude);
        let distance = if odometer > 0.0 {
            (odometer - previous_odometer).max(0.0)
        } else {
            0.0
        };
        DistancePreview {
            previous_odometer,
            odometer,
            distance,
        }
    }

    /// Reject a trip whose odometer is non-positive or below the baseline.
    ///
    /// Returns the derived distance on success.
    pub fn validate_trip(
        &self,
        entries: &[Entry],
        date: NaiveDate,
        odometer: f64,
        exclude: Option<i64>,
    ) -> Result<f64, ValidationError> {
        let previous = self.previous_odometer(entries, date, exclude);
        if odometer <= 0.0 || odometer < previous {
            return Err(ValidationError::OdometerBelowPrevious { odometer, previous });
        }
        Ok(odometer - previous)
    }

    /// Validate any entry kind; trips come back with their derived distance set
    pub fn validate(
        &self,
        entries: &[Entry],
        new: NewEntry,
        exclude: Option<i64>,
    ) -> Result<NewEntry, ValidationError> {
        let details = match new.details {
            EntryDetails::Trip {
                amount_received, ..
            } => {
                let distance = self.validate_trip(entries, new.date, new.odometer, exclude)?;
                if amount_received < 0.0 {
                    return Err(ValidationError::NegativeAmount);
                }
                EntryDetails::Trip {
                    distance,
                    amount_received,
                }
            }
            EntryDetails::Fuel {
                fuel_liters,
                fuel_cost,
            } => {
                validate_fuel(new.odometer, fuel_liters, fuel_cost)?;
                EntryDetails::Fuel {
                    fuel_liters,
                    fuel_cost,
                }
            }
            EntryDetails::Reading => {
                validate_reading(new.odometer)?;
                EntryDetails::Reading
            }
        };
        Ok(NewEntry { details, ..new })
    }
}

/// Liters are checked before cost; the odometer may be left at 0
pub fn validate_fuel(odometer: f64, liters: f64, cost: f64) -> Result<(), ValidationError> {
    if liters <= 0.0 {
        return Err(ValidationError::MissingFuelLiters);
    }
    if cost <= 0.0 {
        return Err(ValidationError::MissingFuelCost);
    }
    if odometer < 0.0 {
        return Err(ValidationError::InvalidReading);
    }
    Ok(())
}

pub fn validate_reading(odometer: f64) -> Result<(), ValidationError> {
    if odometer <= 0.0 {
        return Err(ValidationError::InvalidReading);
    }
    Ok(())
}
