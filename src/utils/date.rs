// src/utils/date.rs

//! Posting date parsing and recency checks.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use regex::Regex;

/// Parse a relative "3 hours ago" / "2 days ago" phrase or an ISO-8601
/// timestamp into an absolute UTC instant.
///
/// Only "hour" and "day" are recognized as relative units, hour checked
/// first; feeds that say "posted 5 minutes ago" fall through to the ISO
/// parse and yield `None`. Intentionally narrow vocabulary.
pub fn parse_relative_or_absolute(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();

    if let Some(hours) = capture_amount(&lower, r"(\d+)\s*hour") {
        return Some(Utc::now() - Duration::hours(hours));
    }
    if let Some(days) = capture_amount(&lower, r"(\d+)\s*day") {
        return Some(Utc::now() - Duration::days(days));
    }

    parse_iso(trimmed)
}

/// True iff the instant falls within the trailing window. Absent instants
/// never pass; the boundary is inclusive. The clock is read fresh per call.
pub fn within_window(instant: Option<DateTime<Utc>>, window_hours: u64) -> bool {
    let Some(instant) = instant else {
        return false;
    };
    let age_secs = (Utc::now() - instant).num_seconds();
    age_secs <= window_hours as i64 * 3600
}

fn capture_amount(text: &str, pattern: &str) -> Option<i64> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Strict ISO-8601 parse. A trailing `Z` is treated as `+00:00`; timestamps
/// without an offset are interpreted as UTC.
fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    let normalized = match text.strip_suffix('Z') {
        Some(prefix) => format!("{prefix}+00:00"),
        None => text.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_relative_hours() {
        let parsed = parse_relative_or_absolute("3 hours ago").unwrap();
        let expected = Utc::now() - Duration::hours(3);
        assert!((parsed - expected).num_seconds().abs() <= 1);
    }

    #[test]
    fn parses_relative_days() {
        let parsed = parse_relative_or_absolute("2 days ago").unwrap();
        let expected = Utc::now() - Duration::hours(48);
        assert!((parsed - expected).num_seconds().abs() <= 1);
    }

    #[test]
    fn hour_takes_precedence_over_day() {
        // "1 hour" appears alongside "day"; hour is checked first
        let parsed = parse_relative_or_absolute("1 hour into the day").unwrap();
        let expected = Utc::now() - Duration::hours(1);
        assert!((parsed - expected).num_seconds().abs() <= 1);
    }

    #[test]
    fn parses_iso_with_zulu_suffix() {
        let parsed = parse_relative_or_absolute("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn parses_iso_with_offset() {
        let parsed = parse_relative_or_absolute("2024-01-15T10:30:00+05:30").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T05:00:00+00:00");
    }

    #[test]
    fn parses_naive_iso_as_utc() {
        let parsed = parse_relative_or_absolute("2024-01-15T10:30:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_relative_or_absolute("not a date").is_none());
        assert!(parse_relative_or_absolute("").is_none());
        assert!(parse_relative_or_absolute("5 minutes ago").is_none());
    }

    #[test]
    fn window_accepts_recent_instant() {
        let instant = Utc::now() - Duration::hours(47) - Duration::minutes(59);
        assert!(within_window(Some(instant), 48));
    }

    #[test]
    fn window_rejects_stale_instant() {
        let instant = Utc::now() - Duration::hours(48) - Duration::minutes(1);
        assert!(!within_window(Some(instant), 48));
    }

    #[test]
    fn window_rejects_absent_instant() {
        assert!(!within_window(None, 48));
    }

    #[test]
    fn window_accepts_future_instant() {
        // Negative age is within any window; upstream clocks can run ahead
        let instant = Utc::now() + Duration::minutes(5);
        assert!(within_window(Some(instant), 48));
    }
}
