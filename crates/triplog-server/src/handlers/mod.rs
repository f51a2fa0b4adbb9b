//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analytics;
pub mod audit;
pub mod auth;
pub mod entries;

// Re-export all handlers for use in router
pub use analytics::*;
pub use audit::*;
pub use auth::*;
pub use entries::*;

/// Reference date for periods and default entry dates
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
