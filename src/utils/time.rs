//! Date/time parsing and formatting helpers
//!
//! Forms speak local naive time ("2024-03-04 10:00"); records store UTC
//! RFC 3339. Conversion happens here so repository and views stay simple.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}")))
}

/// Parse a time string (HH:MM)
pub fn parse_hm(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {time}")))
}

/// Parse a local datetime string (YYYY-MM-DD HH:MM) into a UTC timestamp.
///
/// DST gap fallback: if the local time does not exist, interpret it as UTC.
pub fn parse_local_datetime(value: &str) -> AppResult<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d %H:%M")
        .map_err(|_| AppError::validation(format!("Invalid datetime format: {value}")))?;
    Ok(Local
        .from_local_datetime(&naive)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive)))
}

/// Local calendar date of a stored UTC timestamp
pub fn local_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

/// Display formatting: "04/03/2024"
pub fn fmt_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%d/%m/%Y").to_string()
}

/// Display formatting: "10:30"
pub fn fmt_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M").to_string()
}

/// Form-field formatting: "2024-03-04 10:30"
pub fn fmt_form_datetime(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
