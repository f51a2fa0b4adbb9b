//! Logbook configuration
//!
//! Resolution order:
//! 1. Explicit path (`--config`), if it exists
//! 2. `<data_local_dir>/triplog/config.toml`, if it exists
//! 3. The embedded `config/triplog.toml`
//!
//! Environment variables then override individual settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ledger::{BaselineRule, FuelAssumptions};

/// Embedded default configuration
const DEFAULT_CONFIG: &str = include_str!("../../../config/triplog.toml");

pub const BASELINE_ENV: &str = "TRIPLOG_BASELINE";
pub const KM_PER_LITER_ENV: &str = "TRIPLOG_KM_PER_LITER";
pub const PRICE_PER_LITER_ENV: &str = "TRIPLOG_PRICE_PER_LITER";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LogbookConfig {
    /// Rule used for the trip validation baseline
    pub baseline: BaselineRule,
    pub fuel: FuelAssumptions,
    /// Record a standalone reading whenever a trip is saved
    pub mirror_trip_readings: bool,
}

impl LogbookConfig {
    /// Load from the override file (or the embedded default), then apply env
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let config = load_config(override_path)?;
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Parse TOML content over the built-in defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(baseline) = raw.baseline {
            if let Some(rule) = baseline.rule {
                config.baseline = rule.parse().map_err(Error::Config)?;
            }
            if let Some(mirror) = baseline.mirror_trip_readings {
                config.mirror_trip_readings = mirror;
            }
        }

        if let Some(fuel) = raw.fuel {
            if let Some(km_per_liter) = fuel.km_per_liter {
                config.fuel.km_per_liter = positive(km_per_liter, "fuel.km_per_liter")?;
            }
            if let Some(price) = fuel.price_per_liter {
                config.fuel.price_per_liter = positive(price, "fuel.price_per_liter")?;
            }
        }

        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rule) = lookup(BASELINE_ENV) {
            self.baseline = rule.parse().map_err(Error::Config)?;
        }
        if let Some(value) = lookup(KM_PER_LITER_ENV) {
            self.fuel.km_per_liter = parse_env_number(KM_PER_LITER_ENV, &value)?;
        }
        if let Some(value) = lookup(PRICE_PER_LITER_ENV) {
            self.fuel.price_per_liter = parse_env_number(PRICE_PER_LITER_ENV, &value)?;
        }
        Ok(self)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("triplog").join("config.toml"))
}

fn load_config(override_path: Option<&Path>) -> Result<LogbookConfig> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .filter(|p| p.exists());

    let content = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading logbook config");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        None => {
            if let Some(requested) = override_path {
                warn!(path = %requested.display(), "Config file not found, using defaults");
            }
            DEFAULT_CONFIG.to_string()
        }
    };

    LogbookConfig::parse(&content)
}

fn positive(value: f64, field: &str) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Config(format!("{} must be positive, got {}", field, value)))
    }
}

fn parse_env_number(key: &str, value: &str) -> Result<f64> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::Config(format!("{} is not a number: {}", key, value)))?;
    positive(parsed, key)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    baseline: Option<RawBaseline>,
    fuel: Option<RawFuel>,
}

#[derive(Debug, Deserialize)]
struct RawBaseline {
    rule: Option<String>,
    mirror_trip_readings: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawFuel {
    km_per_liter: Option<f64>,
    price_per_liter: Option<f64>,
}
