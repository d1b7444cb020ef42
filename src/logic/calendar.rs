//! Month-span arithmetic.
//!
//! Spans use a fixed non-leap calendar (February is always 28 days). Concrete
//! dates are only produced once a year is supplied, and those use the real
//! calendar.

use crate::error::CalendarError;
use crate::models::{Month, MonthRange};
use chrono::{Duration, NaiveDate};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_month(name: &str) -> Result<Month, CalendarError> {
    if name.trim().is_empty() {
        return Err(CalendarError::BlankMonth);
    }
    Month::from_str(name).ok_or_else(|| CalendarError::UnknownMonth {
        name: name.to_string(),
    })
}

pub fn days_in_month(name: &str) -> Result<u32, CalendarError> {
    Ok(parse_month(name)?.days())
}

pub fn month_order(name: &str) -> Result<u32, CalendarError> {
    Ok(parse_month(name)?.order())
}

/// Inclusive day count from the first day of `start` to the last day of `end`.
///
/// Errors when either name is unrecognized or `end` comes before `start`;
/// ranges crossing New Year are not supported.
pub fn month_span(start: &str, end: &str) -> Result<u32, CalendarError> {
    range_span(&MonthRange::new(start, end))
}

pub fn range_span(range: &MonthRange) -> Result<u32, CalendarError> {
    let (start, end) = range.months()?;
    Ok(span_between(start, end))
}

fn span_between(start: Month, end: Month) -> u32 {
    Month::all()
        .iter()
        .filter(|m| **m >= start && **m <= end)
        .map(|m| m.days())
        .sum()
}

/// `None` only for years chrono cannot represent.
pub fn first_day_of_month(month: Month, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.order(), 1)
}

/// Real last day of the month in `year` (leap Februaries included).
pub fn last_day_of_month(month: Month, year: i32) -> Option<NaiveDate> {
    match Month::from_order(month.order() + 1) {
        Some(next) => first_day_of_month(next, year)?.pred_opt(),
        None => NaiveDate::from_ymd_opt(year, 12, 31),
    }
}

/// Signed number of whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// Parse a calendar date. Accepts `YYYY-MM-DD` and ISO timestamps, whose
/// time part is dropped.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Some(date);
    }
    match trimmed.split_once('T') {
        Some((date_part, _)) => NaiveDate::parse_from_str(date_part, ISO_DATE_FORMAT).ok(),
        None => None,
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
