//! Error types for triplog

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// User-correctable input problem; nothing was written
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Edit/delete target no longer exists; callers should reload
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Rejected mutation or query input.
///
/// Display strings are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Odometer must be greater than previous ({previous}).")]
    OdometerBelowPrevious { odometer: f64, previous: f64 },

    #[error("Please enter a valid odometer reading")]
    InvalidReading,

    #[error("Amount received cannot be negative")]
    NegativeAmount,

    #[error("Please enter fuel in liters")]
    MissingFuelLiters,

    #[error("Please enter fuel cost")]
    MissingFuelCost,

    #[error("Select a valid date range")]
    InvalidRange,

    #[error("Invalid date: {0} (use YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown period: {0} (valid: today, week, month, all)")]
    UnknownPeriod(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odometer_message_names_minimum() {
        let err = ValidationError::OdometerBelowPrevious {
            odometer: 90.0,
            previous: 150.0,
        };
        assert_eq!(
            err.to_string(),
            "Odometer must be greater than previous (150)."
        );
    }

    #[test]
    fn test_error_classification() {
        let err: Error = ValidationError::MissingFuelCost.into();
        assert!(err.is_validation());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Please enter fuel cost");

        let err = Error::NotFound("entry 7".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: entry 7");
    }
}
