//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use triplog_core::input::{parse_date, parse_number};
use triplog_core::{NewEntry, Period, ValidationError};

/// Triplog - trip, fuel and odometer ledger
#[derive(Parser)]
#[command(name = "triplog")]
#[command(about = "Personal trip and fuel logbook", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "triplog.db", global = true)]
    pub db: PathBuf,

    /// Logbook config file (defaults to ~/.local/share/triplog/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a trip, refuel, or odometer reading
    Add {
        #[command(subcommand)]
        entry: EntryArgs,
    },

    /// Replace an existing entry
    Edit {
        /// Entry ID
        id: i64,

        #[command(subcommand)]
        entry: EntryArgs,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: i64,
    },

    /// Show the trip/fuel log
    List {
        /// Entry kind: all, trip, fuel
        #[arg(short, long, default_value = "all")]
        kind: String,

        /// Sort order: asc, desc
        #[arg(short, long, default_value = "desc")]
        order: String,

        /// Page number (starting at 1)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Rows per page
        #[arg(long, default_value = "5")]
        page_size: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show standalone odometer readings
    Readings,

    /// Show the previous odometer baseline for a date
    Prev {
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,

        /// Odometer value to preview the trip distance for
        #[arg(long)]
        odometer: Option<String>,

        /// Entry being edited (left out of the baseline)
        #[arg(long)]
        exclude: Option<i64>,
    },

    /// Distance, earnings, fuel and profit for a period
    Summary {
        #[command(flatten)]
        period: PeriodArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Per-day amounts for a period
    Series {
        #[command(flatten)]
        period: PeriodArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fuel efficiency between consecutive refuels
    Efficiency {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires an access-proxy header or API key.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

/// Entry fields as typed on the command line.
///
/// Numbers are taken as text and parsed leniently: blank or malformed
/// values become 0 and are then caught by validation.
#[derive(Subcommand, Clone)]
pub enum EntryArgs {
    /// A paid trip
    Trip {
        /// Odometer reading at the end of the trip
        #[arg(long, default_value = "")]
        odometer: String,

        /// Amount received
        #[arg(short, long, default_value = "0")]
        amount: String,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// A refuel
    Fuel {
        /// Odometer reading at the pump
        #[arg(long, default_value = "0")]
        odometer: String,

        /// Liters bought
        #[arg(short, long, default_value = "")]
        liters: String,

        /// Total cost
        #[arg(short, long, default_value = "")]
        cost: String,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// A standalone odometer reading
    Reading {
        /// Odometer reading
        #[arg(long, default_value = "")]
        odometer: String,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

impl EntryArgs {
    pub fn to_new_entry(&self, today: NaiveDate) -> Result<NewEntry, ValidationError> {
        let date = |d: &Option<String>| d.as_deref().map(parse_date).unwrap_or(Ok(today));

        Ok(match self {
            Self::Trip {
                odometer,
                amount,
                date: d,
            } => NewEntry::trip(date(d)?, parse_number(odometer), parse_number(amount)),
            Self::Fuel {
                odometer,
                liters,
                cost,
                date: d,
            } => NewEntry::fuel(
                date(d)?,
                parse_number(odometer),
                parse_number(liters),
                parse_number(cost),
            ),
            Self::Reading { odometer, date: d } => {
                NewEntry::reading(date(d)?, parse_number(odometer))
            }
        })
    }
}

/// Report window: a named period or an explicit range
#[derive(Args, Clone, Default)]
pub struct PeriodArgs {
    /// Period: today, week, month, all
    #[arg(long)]
    pub period: Option<String>,

    /// Range start (YYYY-MM-DD), overrides --period
    #[arg(long)]
    pub from: Option<String>,

    /// Range end (YYYY-MM-DD), overrides --period
    #[arg(long)]
    pub to: Option<String>,
}

impl PeriodArgs {
    pub fn resolve(&self) -> Result<Period, ValidationError> {
        Period::resolve(
            self.period.as_deref(),
            self.from.as_deref(),
            self.to.as_deref(),
        )
    }
}
