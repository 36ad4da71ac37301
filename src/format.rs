//! Human-readable figures for byte counts, rates and timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// 1024-based size with two decimals, e.g. 1,572,864 → "1.50 MB".
pub fn format_bytes(bytes: u64) -> String {
    scale(bytes as f64)
}

/// Transfer rate in bytes per second, e.g. "12.00 KB/s".
pub fn format_speed(bytes_per_sec: f64) -> String {
    format!("{}/s", scale(bytes_per_sec))
}

/// Fixed-megabyte figure used by the admin client table.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

fn scale(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut scaled = value;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", scaled.round() as u64)
    } else {
        format!("{:.2} {}", scaled, UNITS[unit])
    }
}

/// Parses the timestamp shapes the backend emits: RFC 3339, naive ISO-8601
/// (read as UTC), bare dates and RFC 2822.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }

    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// "19 Oct 2026, 14:05". Missing dates render as "—", unparseable ones verbatim.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return "—".to_string();
    };

    match parse_timestamp(raw) {
        Some(parsed) => parsed.format("%d %b %Y, %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Relative "last seen" text for a Unix timestamp.
pub fn format_last_seen(last_seen: f64, online: bool, now: DateTime<Utc>) -> String {
    if online {
        return "now".to_string();
    }
    if last_seen <= 0.0 {
        return "-".to_string();
    }

    let delta = (now.timestamp() - last_seen.floor() as i64).max(0);
    if delta < 60 {
        return "less than a minute ago".to_string();
    }
    if delta < 3600 {
        return format!("{} min ago", delta / 60);
    }
    if delta < 86400 {
        return format!("{} h ago", delta / 3600);
    }

    match Utc.timestamp_opt(last_seen.floor() as i64, 0).single() {
        Some(seen) => seen.format("%d.%m %H:%M").to_string(),
        None => "-".to_string(),
    }
}
