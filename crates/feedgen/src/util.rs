//! Shared helpers for the renderers.

use chrono::{DateTime, SecondsFormat, Utc};

/// Value of an optional string field, treating empty strings as absent.
pub(crate) fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// RFC 7231 HTTP-date, e.g. `Sat, 13 Jul 2013 23:00:00 GMT`.
pub(crate) fn http_date(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// ISO 8601 with milliseconds, e.g. `2013-07-13T23:00:00.000Z`.
pub(crate) fn iso_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Podcast duration as `M:SS` or `H:MM:SS`.
pub(crate) fn format_duration(seconds: u64) -> String {
    let secs = seconds % 60;
    let total_minutes = seconds / 60;
    let minutes = total_minutes % 60;
    let hours = total_minutes / 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
