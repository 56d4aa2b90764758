//! Date parameter validation and helpers for the daily endpoints

use chrono::{Duration, NaiveDate, Utc};

use crate::error::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Checks that `date` is exactly `YYYY-MM-DD` and names a real calendar day.
///
/// # Example
/// ```
/// use soccer_dashboard::data_fetcher::api::validate_date;
///
/// assert!(validate_date("2024-01-15").is_ok());
/// assert!(validate_date("2024-13-01").is_err());
/// assert!(validate_date("2024-1-1").is_err());
/// ```
pub fn validate_date(date: &str) -> Result<NaiveDate, AppError> {
    let bytes = date.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(AppError::invalid_date(date));
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| AppError::invalid_date(date))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn today() -> String {
    format_date(Utc::now().date_naive())
}

pub fn yesterday() -> String {
    format_date(Utc::now().date_naive() - Duration::days(1))
}

pub fn tomorrow() -> String {
    format_date(Utc::now().date_naive() + Duration::days(1))
}

/// Every date from `start` to `end`, both included. Empty when `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(format_date)
        .collect()
}
