//! Human-readable sizes and dates.

use chrono::{DateTime, NaiveDateTime, Utc};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y, %H:%M";

/// Format a byte count using powers of 1024, rounded to two decimals.
///
/// Trailing zeros are dropped (`1024 -> "1 KB"`, `1536 -> "1.5 KB"`).
/// Values of 1024 GB and above stay expressed in GB.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Parse a gateway timestamp. Accepts RFC 3339 and naive ISO-8601 (taken as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .map(|naive| naive.and_utc())
}

/// Day/month/year hour:minute in UTC, or the raw string when it cannot be parsed.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => format_datetime(&dt),
        None => raw.to_string(),
    }
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(DISPLAY_DATE_FORMAT).to_string()
}
