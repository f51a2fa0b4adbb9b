//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - init and shared utilities (open_db, open_logbook)
//! - `entries` - add, edit, delete, list, readings, previous odometer
//! - `reports` - summary, per-day series, fuel efficiency
//! - `serve` - Web server command

pub mod core;
pub mod entries;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use self::core::*;
pub use entries::*;
pub use reports::*;
pub use serve::*;

/// Today's date in local time, the reference for periods and default dates
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
