//! Timestamp helpers.
//!
//! Log entries store their timestamp as local time text with second
//! precision (`YYYY-MM-DD HH:MM:SS`); no timezone is recorded.

use chrono::{Local, NaiveDateTime};

/// Format used for log entry timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time as a log entry timestamp.
#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

/// Format a naive local time as a log entry timestamp.
#[must_use]
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp. Returns `None` for text in any other shape.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}
