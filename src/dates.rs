use chrono::{Datelike, Local, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    Format(String),
}

/// `num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAY: i64 = 719_163;

pub fn parse_date(value: &str) -> Result<NaiveDate, DateError> {
    let format_err = || DateError::Format(value.to_string());

    let mut parts = value.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format_err());
    };

    let year: i32 = year.trim().parse().map_err(|_| format_err())?;
    let month: u32 = month.trim().parse().map_err(|_| format_err())?;
    let day: u32 = day.trim().parse().map_err(|_| format_err())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(format_err)
}

/// Days since 1970-01-01, counted on calendar fields only. Never goes
/// through a local-timezone conversion.
pub fn day_index(value: &str) -> Result<i64, DateError> {
    parse_date(value).map(day_number)
}

pub fn day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAY
}

// drops any time suffix that slipped into storage
pub fn normalize_date(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed.get(..10).unwrap_or(trimmed)
}

pub fn today_date() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today() -> String {
    date_key(today_date())
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// `Mon, Jan 1`
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}
