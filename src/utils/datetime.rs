//! Date and time utility functions
//!
//! Timestamps are stored as ISO-8601 strings in UTC with millisecond precision,
//! the same shape browsers produce for `lastUpdated` and `joinDate` values.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Calendar date format used in export file names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a timestamp as ISO-8601 with milliseconds and a `Z` suffix.
pub fn format_iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current UTC time as an ISO-8601 string.
pub fn now_iso() -> String {
    format_iso(Utc::now())
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Current UTC date as YYYY-MM-DD.
pub fn format_today() -> String {
    format_ymd(Utc::now().date_naive())
}

/// Parse an ISO-8601 timestamp, returning `None` for anything malformed.
pub fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Time-based local identifier, e.g. `user_1718000000000`.
pub fn time_based_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Utc::now().timestamp_millis())
}
