use chrono::{DateTime, NaiveDate, Utc};

/// Parse a backend timestamp.
///
/// The backend emits RFC 3339 (`2025-01-31T12:30:00.000Z`); plain dates
/// (`2025-01-31`) are accepted and pinned to midnight UTC. Anything else is
/// logged and dropped rather than failing the whole record.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    tracing::warn!(value = %value, "Unparsable timestamp in backend record");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_timestamp("2025-03-14T09:26:53.000Z").unwrap();
        assert_eq!(dt.year(), 2025);
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn test_parse_offset_is_normalized() {
        let dt = parse_timestamp("2025-03-14T10:00:00+05:30").unwrap();
        assert_eq!(dt.hour(), 4);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_plain_date() {
        let dt = parse_timestamp("2025-03-14").unwrap();
        assert_eq!(dt.day(), 14);
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
    }
}
