//! # Catalog Audit
//!
//! Sanity pass over the bundled content before a deploy.
//!
//! ## Checks
//! - Every week touched by the date range has a published menu
//! - No dish shows up twice in the same week once names are sanitized
//!   (`Cacio e Pepe` and `cacio_e_pepe!` are the same dish)
//! - Dishes without dietary tags are counted, not rejected
//!
//! ## Usage
//! ```sh
//! cargo run -p process -- 7 21
//! ```
//! Walks from 7 days ago to 21 days ahead. Exits non-zero when a week is missing or a
//! duplicate is found.
use std::collections::BTreeSet;

use catalog::{
    Catalog,
    weeks::{MenuWeek, first_supported, last_supported, today, week_start},
};
use chrono::{Duration, NaiveDate};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

pub mod models;
pub mod utils;

use models::AuditReport;
use utils::duplicate_dishes;

pub fn audit_catalog(days_before: u32, days_after: u32) -> anyhow::Result<AuditReport> {
    let catalog = Catalog::bundled()?;

    println!("Loaded Menus: {}", catalog.menus.len());
    println!("Loaded Reviews: {}", catalog.reviews.len());
    println!("Loaded Suppliers: {}\n", catalog.suppliers.len());

    let mut report = audit_range(&catalog, today(), days_before, days_after)?;

    for menu in &catalog.menus {
        for name in duplicate_dishes(menu) {
            report.duplicate_dishes.push((menu.week_of, name));
        }

        report.untagged_dishes += menu.dishes.iter().filter(|d| d.tags.is_empty()).count();
    }

    print_report(&report);

    Ok(report)
}

/// Walks every day in the range and records which menu weeks exist. The range is
/// clipped to the years the calendar helpers support.
pub fn audit_range(
    catalog: &Catalog,
    anchor: NaiveDate,
    days_before: u32,
    days_after: u32,
) -> anyhow::Result<AuditReport> {
    let first = first_supported().context("calendar lower bound")?;
    let last = last_supported().context("calendar upper bound")?;

    let from = (-i64::from(days_before)).max((first - anchor).num_days());
    let to = i64::from(days_after).min((last - anchor).num_days());

    let pb = ProgressBar::new(u64::try_from(to - from + 1).unwrap_or(0));
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );

    let mut seen = BTreeSet::new();
    let mut report = AuditReport::default();

    for offset in from..=to {
        let date = anchor + Duration::days(offset);
        pb.set_message(format!("Checking {date}"));

        report.days_checked += 1;

        let start = week_start(date);
        if seen.insert(start) {
            #[cfg(feature = "verbose")]
            println!("Week of {start}");

            let week = MenuWeek::containing(start);
            if catalog.menu_for(start).is_some() {
                report.weeks_covered.push(week);
            } else {
                report.missing_weeks.push(week);
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    Ok(report)
}

fn print_report(report: &AuditReport) {
    println!("\nDays Checked: {}", report.days_checked);
    println!("Weeks Covered: {}", report.weeks_covered.len());

    if report.missing_weeks.is_empty() {
        println!("No missing weeks.");
    } else {
        println!("Missing Weeks: {}", report.missing_weeks.len());
        for week in &report.missing_weeks {
            println!("  - {}", week.label);
        }
    }

    if report.duplicate_dishes.is_empty() {
        println!("No duplicate dishes.");
    } else {
        println!("Duplicate Dishes: {}", report.duplicate_dishes.len());
        for (week_of, name) in &report.duplicate_dishes {
            println!("  - {name} (week of {week_of})");
        }
    }

    println!("Untagged Dishes: {}", report.untagged_dishes);
}
