//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `open_logbook` - Database plus resolved logbook config
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use triplog_core::{Database, Logbook, LogbookConfig};

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn load_config(config_path: Option<&Path>) -> Result<LogbookConfig> {
    LogbookConfig::load(config_path).context("Failed to load logbook config")
}

pub fn open_logbook(db_path: &Path, config_path: Option<&Path>) -> Result<Logbook<Database>> {
    let config = load_config(config_path)?;
    let db = open_db(db_path)?;
    tracing::debug!(
        db = %db_path.display(),
        baseline = %config.baseline,
        mirror_trip_readings = config.mirror_trip_readings,
        "Opened logbook"
    );
    Ok(Logbook::new(db, config))
}

pub fn cmd_init(db_path: &Path, config_path: Option<&Path>) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let config = load_config(config_path)?;

    let counts = db.count_entries().context("Failed to count entries")?;
    if counts.is_empty() {
        println!("   No entries yet");
    } else {
        for (kind, count) in counts {
            println!("   {:8} {}", kind, count);
        }
    }
    println!("   Baseline rule: {}", config.baseline);
    println!(
        "   Fuel estimate: {} km/l at {} per liter",
        config.fuel.km_per_liter, config.fuel.price_per_liter
    );

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Log a trip: triplog add trip --odometer 12500 --amount 800");
    println!("  2. Log a refuel: triplog add fuel --odometer 12520 --liters 30 --cost 3000");
    println!("  3. Start web API: triplog serve");

    Ok(())
}
