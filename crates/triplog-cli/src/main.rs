//! Triplog CLI - trip and fuel logbook
//!
//! Usage:
//!   triplog init                                Initialize database
//!   triplog add trip --odometer 150 --amount 300
//!   triplog add fuel --odometer 160 --liters 5 --cost 500
//!   triplog summary --period week               Period totals
//!   triplog serve --port 3000                   Start web API

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();
    let today = commands::today();
    let open = || commands::open_logbook(&cli.db, config_path);

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, config_path),
        Commands::Add { entry } => commands::cmd_add(&open()?, &entry, today),
        Commands::Edit { id, entry } => commands::cmd_edit(&open()?, id, &entry, today),
        Commands::Delete { id } => commands::cmd_delete(&open()?, id),
        Commands::List {
            kind,
            order,
            page,
            page_size,
            json,
        } => commands::cmd_list(&open()?, &kind, &order, page, page_size, json),
        Commands::Readings => commands::cmd_readings(&open()?),
        Commands::Prev {
            date,
            odometer,
            exclude,
        } => commands::cmd_prev(
            &open()?,
            date.as_deref(),
            odometer.as_deref(),
            exclude,
            today,
        ),
        Commands::Summary { period, json } => commands::cmd_summary(&open()?, &period, today, json),
        Commands::Series { period, json } => commands::cmd_series(&open()?, &period, today, json),
        Commands::Efficiency { json } => commands::cmd_efficiency(&open()?, json),
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => {
            commands::cmd_serve(
                &cli.db,
                config_path,
                &host,
                port,
                no_auth,
                static_dir.as_deref(),
            )
            .await
        }
    }
}
