use crate::error::{LedgerError, Result};
use chrono::{Local, Month, NaiveDate};

pub fn clamp_month(month: u32) -> u32 {
    month.clamp(1, 12)
}

pub fn clamp_quarter(quarter: u32) -> u32 {
    quarter.clamp(1, 4)
}

/// First calendar month (1-based) of a quarter.
pub fn quarter_start_month(quarter: u32) -> u32 {
    (clamp_quarter(quarter) - 1) * 3 + 1
}

pub fn quarter_of_month(month: u32) -> u32 {
    (clamp_month(month) - 1) / 3 + 1
}

pub fn first_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        LedgerError::DateError(format!("{:04}-{:02} is not a representable month", year, month))
    })
}

/// Last day of the month, taken as the day before the first of the following month.
pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year.checked_add(1) } else { Some(year) };

    next_year
        .and_then(|y| NaiveDate::from_ymd_opt(y, next_month, 1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| {
            LedgerError::DateError(format!(
                "Cannot determine last day of {:04}-{:02}",
                year, month
            ))
        })
}

/// Parses a `YYYY-MM-DD` string into a calendar date built from its
/// year/month/day components. No timezone is involved, so the result is the
/// same local "accounting day" on every host.
///
/// A trailing time component (`2025-06-01T10:00:00`) is ignored.
pub fn parse_local_ymd(ymd: &str) -> Option<NaiveDate> {
    let date_part = ymd.trim().split('T').next()?;
    let mut parts = date_part.split('-');

    let year: i32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;

    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn format_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Today as a local `YYYY-MM-DD` string.
pub fn today_local_ymd() -> String {
    format_ymd(today_local())
}

/// English month name for a 1-based month, clamped into range.
pub fn month_name(month: u32) -> &'static str {
    Month::try_from(clamp_month(month) as u8)
        .map(|m| m.name())
        .unwrap_or("January")
}
