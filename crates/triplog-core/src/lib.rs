//! Triplog Core Library
//!
//! Shared functionality for the triplog trip and fuel ledger:
//! - Entry model (trip, fuel, standalone odometer reading)
//! - Odometer reconciliation and trip distance recompute
//! - Period aggregation and fuel efficiency segments
//! - Entry store contract with in-memory and SQLite implementations
//! - Logbook configuration

pub mod config;
pub mod db;
pub mod error;
pub mod input;
pub mod ledger;
pub mod logbook;
pub mod models;
pub mod store;

pub use config::LogbookConfig;
pub use db::{AuditEntry, Database};
pub use error::{Error, Result, ValidationError};
pub use ledger::{
    BaselineRule, BaselineStrategy, DailyPoint, DistancePreview, EfficiencyReport,
    EfficiencySegment, EntryFilter, EntryPage, FuelAssumptions, KindFilter, Period, SortOrder,
    Summary,
};
pub use logbook::{LogPage, LogRow, Logbook, PeriodReport};
pub use models::{Entry, EntryDetails, EntryKind, NewEntry};
pub use store::{EntryStore, MemoryStore};
