use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use anyhow::{bail, Result};

/// Accepted layouts for user-entered filter times (order matters: more
/// specific layouts first).
const LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Parse a filter time like "2024-11-23 10:00", "2024-11-23T10:00" or a
/// bare date "2024-11-23". RFC 3339 timestamps are accepted as-is.
pub fn parse_time(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for layout in LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    // A bare date means midnight at the start of that day.
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    bail!("Unknown time format: {}", s)
}

/// Format a timestamp for table display.
pub fn format_time(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_and_time() {
        let t = parse_time("2024-11-23 10:30").unwrap();
        assert_eq!(format_time(t), "2024-11-23 10:30:00");
    }

    #[test]
    fn test_parse_t_separator() {
        let t = parse_time("2024-11-23T10:30").unwrap();
        assert_eq!(format_time(t), "2024-11-23 10:30:00");
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let t = parse_time("2024-11-23").unwrap();
        assert_eq!(format_time(t), "2024-11-23 00:00:00");
    }

    #[test]
    fn test_parse_rfc3339() {
        let t = parse_time("2024-11-23T10:30:15Z").unwrap();
        assert_eq!(format_time(t), "2024-11-23 10:30:15");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_time("yesterday").is_err());
        assert!(parse_time("").is_err());
    }
}
