//! Date/time utilities for Stowage.
//!
//! All timestamps are stored as UTC strings in SQLite format
//! (`YYYY-MM-DD HH:MM:SS`). The fixed-width format makes lexicographic
//! comparison equivalent to chronological comparison, both in Rust and in
//! SQL (`expiry < datetime('now')`).

use chrono::{DateTime, Duration, Utc};

/// Timestamp format used in the database.
pub const DB_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC time as a database timestamp string.
pub fn now_string() -> String {
    format_db(&Utc::now())
}

/// Format a `DateTime<Utc>` as a database timestamp string.
pub fn format_db(dt: &DateTime<Utc>) -> String {
    dt.format(DB_FORMAT).to_string()
}

/// Database timestamp for `days` days from now.
///
/// `days` may be zero or negative; the result is then a timestamp in the
/// past, which the next expiry sweep will collect.
pub fn days_from_now(days: i64) -> String {
    format_db(&(Utc::now() + Duration::days(days)))
}

/// Whether a database timestamp string lies in the past.
pub fn is_past(timestamp: &str) -> bool {
    timestamp < now_string().as_str()
}

/// Convert a database timestamp string (YYYY-MM-DD HH:MM:SS) to RFC3339.
///
/// Useful for Web API responses where clients expect RFC3339 timestamps.
/// The database stores times in UTC, so this appends 'Z' to indicate UTC.
pub fn to_rfc3339(timestamp: &str) -> String {
    format!("{}Z", timestamp.replace(' ', "T"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_string_format() {
        let now = now_string();
        assert_eq!(now.len(), 19);
        assert_eq!(&now[4..5], "-");
        assert_eq!(&now[10..11], " ");
    }

    #[test]
    fn test_days_from_now_positive() {
        let future = days_from_now(7);
        assert!(future > now_string());
    }

    #[test]
    fn test_days_from_now_negative() {
        let past = days_from_now(-1);
        assert!(past < now_string());
    }

    #[test]
    fn test_days_from_now_zero_is_not_future() {
        // "now + 0 days" is at or before the next now_string() call
        let expiry = days_from_now(0);
        assert!(expiry <= now_string());
    }

    #[test]
    fn test_is_past() {
        assert!(is_past("2000-01-01 00:00:00"));
        assert!(!is_past("2099-12-31 23:59:59"));
    }

    #[test]
    fn test_to_rfc3339() {
        let dt = "2024-01-15 10:30:00";
        assert_eq!(to_rfc3339(dt), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_format_db_roundtrip() {
        use chrono::TimeZone;
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_db(&dt), "2024-01-15 10:30:00");
    }
}
