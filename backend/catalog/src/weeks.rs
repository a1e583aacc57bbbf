//! # Menu Weeks
//!
//! Menus run Monday through Sunday. Everything here works on [`NaiveDate`] so the
//! server and the audit CLI agree on what "this week" means.
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuWeek {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl MenuWeek {
    pub fn containing(date: NaiveDate) -> Self {
        let (start, end) = week_range(date);

        Self {
            start,
            end,
            label: format_range(start, end),
        }
    }
}

/// Years the calendar helpers accept from outside input. Week arithmetic near
/// [`NaiveDate::MIN`] or [`NaiveDate::MAX`] would overflow.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

pub fn is_supported(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

pub fn first_supported() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1)
}

pub fn last_supported() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = week_start(date);
    (start, start + Duration::days(6))
}

pub fn next_week(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::weeks(1)
}

pub fn previous_week(date: NaiveDate) -> NaiveDate {
    week_start(date) - Duration::weeks(1)
}

pub fn format_range(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() {
        format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
    } else {
        format!("{} - {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .ok()
        .filter(|date| is_supported(*date))
}
