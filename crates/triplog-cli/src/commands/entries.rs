//! Entry commands: add, edit, delete, list, readings, previous odometer

use anyhow::{Context, Result};
use chrono::NaiveDate;
use triplog_core::input::{parse_date, parse_number};
use triplog_core::{Entry, EntryDetails, EntryFilter, EntryStore, KindFilter, Logbook, SortOrder};

use crate::cli::EntryArgs;

fn describe(entry: &Entry) -> String {
    match entry.details {
        EntryDetails::Trip {
            distance,
            amount_received,
        } => format!(
            "trip #{} on {}: odometer {}, distance {} km, received {:.2}",
            entry.id, entry.date, entry.odometer, distance, amount_received
        ),
        EntryDetails::Fuel {
            fuel_liters,
            fuel_cost,
        } => format!(
            "fuel #{} on {}: odometer {}, {} L for {:.2}",
            entry.id, entry.date, entry.odometer, fuel_liters, fuel_cost
        ),
        EntryDetails::Reading => format!(
            "reading #{} on {}: odometer {}",
            entry.id, entry.date, entry.odometer
        ),
    }
}

pub fn cmd_add<S: EntryStore>(book: &Logbook<S>, args: &EntryArgs, today: NaiveDate) -> Result<()> {
    let new = args.to_new_entry(today)?;
    let entry = book.add(new)?;
    println!("✅ Added {}", describe(&entry));
    Ok(())
}

pub fn cmd_edit<S: EntryStore>(
    book: &Logbook<S>,
    id: i64,
    args: &EntryArgs,
    today: NaiveDate,
) -> Result<()> {
    let new = args.to_new_entry(today)?;
    let entry = book
        .update(id, new)
        .with_context(|| format!("Failed to update entry {}", id))?;
    println!("✅ Updated {}", describe(&entry));
    Ok(())
}

pub fn cmd_delete<S: EntryStore>(book: &Logbook<S>, id: i64) -> Result<()> {
    book.delete(id)
        .with_context(|| format!("Failed to delete entry {}", id))?;
    println!("🗑️  Deleted entry #{}", id);
    Ok(())
}

pub fn cmd_list<S: EntryStore>(
    book: &Logbook<S>,
    kind: &str,
    order: &str,
    page: usize,
    page_size: usize,
    json: bool,
) -> Result<()> {
    let filter = EntryFilter {
        kind: kind.parse::<KindFilter>().map_err(anyhow::Error::msg)?,
        order: order.parse::<SortOrder>().map_err(anyhow::Error::msg)?,
        page: page.saturating_sub(1),
        page_size,
    };
    let log = book.log_page(&filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
        return Ok(());
    }

    println!();
    println!("🚗 Log (page {} of {}, {} entries)", log.page + 1, log.total_pages, log.total);
    println!("   ─────────────────────────────────────────────────────────────────────────────────");

    if log.rows.is_empty() {
        println!("   No entries yet.");
        return Ok(());
    }

    println!(
        "   {:>5} │ {:10} │ {:4} │ {:>9} │ {:>8} │ {:>9} │ {:>8} │ {:>9} │ {:>9}",
        "ID", "Date", "Type", "Odometer", "Distance", "Amount", "Fuel L", "Fuel cost", "Profit"
    );
    println!("   ──────┼────────────┼──────┼───────────┼──────────┼───────────┼──────────┼───────────┼──────────");

    for row in &log.rows {
        let m = &row.metrics;
        println!(
            "   {:>5} │ {:10} │ {:4} │ {:>9.0} │ {:>8.1} │ {:>9.2} │ {:>8.2} │ {:>9.2} │ {:>9.2}",
            row.entry.id,
            row.entry.date,
            row.entry.kind(),
            row.entry.odometer,
            m.distance,
            m.amount,
            m.fuel_used,
            m.fuel_cost,
            m.profit
        );
    }

    Ok(())
}

pub fn cmd_readings<S: EntryStore>(book: &Logbook<S>) -> Result<()> {
    let readings = book.readings()?;

    println!();
    println!("📍 Odometer readings");
    println!("   ──────────────────────────────");

    if readings.is_empty() {
        println!("   No readings recorded.");
        return Ok(());
    }

    for reading in &readings {
        println!("   #{:<5} {}  {:>10}", reading.id, reading.date, reading.odometer);
    }

    Ok(())
}

pub fn cmd_prev<S: EntryStore>(
    book: &Logbook<S>,
    date: Option<&str>,
    odometer: Option<&str>,
    exclude: Option<i64>,
    today: NaiveDate,
) -> Result<()> {
    let as_of = date.map(parse_date).transpose()?.unwrap_or(today);
    let preview = book.preview(as_of, odometer.map(parse_number).unwrap_or(0.0), exclude)?;

    println!(
        "Previous odometer for {} ({} rule): {}",
        as_of,
        book.config().baseline,
        preview.previous_odometer
    );
    if odometer.is_some() {
        println!(
            "Distance at {}: {} km",
            preview.odometer, preview.distance
        );
    }

    Ok(())
}
