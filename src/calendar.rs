use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{PayoffError, Result};

/// latest day-of-month a schedule ever lands on
pub const MAX_SCHEDULE_DAY: u32 = 28;

/// advance one calendar month, clamping the day to 28
///
/// Every month has a 28th, so schedules never overflow into the next month.
pub fn add_month_clamped(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let day = date.day().min(MAX_SCHEDULE_DAY);
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// lenient `YYYY-MM-DD` parsing; anything malformed is `None`
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// one month laid out in Sunday-started weeks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub weeks: Vec<[NaiveDate; 7]>,
}

impl MonthGrid {
    /// whether a grid cell belongs to the displayed month
    pub fn in_month(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }
}

/// weeks covering the given month, padded with neighbouring days
pub fn month_grid(year: i32, month: u32) -> Result<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| PayoffError::InvalidDate {
        message: format!("no such month: {}-{:02}", year, month),
    })?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| PayoffError::InvalidDate {
        message: format!("month out of range: {}-{:02}", year, month),
    })?;
    let last = next_first - Duration::days(1);

    let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
    let end = last + Duration::days(6 - last.weekday().num_days_from_sunday() as i64);

    let mut weeks = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        let mut week = [cursor; 7];
        for (offset, slot) in week.iter_mut().enumerate() {
            *slot = cursor + Duration::days(offset as i64);
        }
        weeks.push(week);
        cursor += Duration::days(7);
    }

    Ok(MonthGrid { first, last, weeks })
}
