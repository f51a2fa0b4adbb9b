//! Report commands: period summary, per-day series, fuel efficiency

use anyhow::Result;
use chrono::NaiveDate;
use triplog_core::{EntryStore, Logbook};

use crate::cli::PeriodArgs;

pub fn cmd_summary<S: EntryStore>(
    book: &Logbook<S>,
    period: &PeriodArgs,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let report = book.report(period.resolve()?, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let s = &report.summary;
    println!();
    println!("📊 Summary: {}", report.label);
    println!("   ─────────────────────────────────────────");
    println!("   Trips:            {:>12}", s.trip_count);
    println!("   Distance:         {:>12.1} km", s.distance);
    println!("   Received:         {:>12.2}", s.received);
    println!("   Fuel cost:        {:>12.2} ({:.2} L, {} refuels)", s.fuel_cost, s.fuel_liters, s.fuel_count);
    println!("   Profit:           {:>12.2}", s.profit);
    println!("   Profit per km:    {:>12.2}", s.profit_per_km);
    println!();
    println!(
        "   Estimated fuel:   {:>12.2} L ({:.2}) at {} km/l",
        s.est_fuel_liters,
        s.est_fuel_cost,
        book.config().fuel.km_per_liter
    );

    Ok(())
}

pub fn cmd_series<S: EntryStore>(
    book: &Logbook<S>,
    period: &PeriodArgs,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let report = book.report(period.resolve()?, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.series)?);
        return Ok(());
    }

    println!();
    println!("📈 Daily: {}", report.label);
    println!("   ─────────────────────────────────────────────");

    if report.series.is_empty() {
        println!("   No entries in this period.");
        return Ok(());
    }

    println!(
        "   {:10} │ {:>10} │ {:>9} │ {:>9}",
        "Date", "Received", "Distance", "Fuel cost"
    );
    println!("   ───────────┼────────────┼───────────┼──────────");
    for point in &report.series {
        println!(
            "   {:10} │ {:>10.2} │ {:>9.1} │ {:>9.2}",
            point.date, point.received, point.distance, point.fuel_cost
        );
    }

    Ok(())
}

pub fn cmd_efficiency<S: EntryStore>(book: &Logbook<S>, json: bool) -> Result<()> {
    let report = book.efficiency()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("⛽ Fuel efficiency");
    println!("   ─────────────────────────────────────────────────────────────");

    if report.segments.is_empty() {
        println!("   Need at least two refuels to measure efficiency.");
        return Ok(());
    }

    println!(
        "   {:10} → {:10} │ {:>8} │ {:>7} │ {:>9} │ {:>6}",
        "From", "To", "km", "Liters", "Cost", "km/l"
    );
    println!("   ─────────────────────────┼──────────┼─────────┼───────────┼───────");
    for seg in &report.segments {
        println!(
            "   {:10} → {:10} │ {:>8.1} │ {:>7.2} │ {:>9.2} │ {:>6.2}",
            seg.from_date, seg.to_date, seg.km, seg.liters, seg.cost, seg.efficiency
        );
    }
    println!();
    println!(
        "   Overall: {:.1} km on {:.2} L = {:.2} km/l",
        report.total_km, report.total_liters, report.overall_efficiency
    );

    Ok(())
}
