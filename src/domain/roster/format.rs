//! Display formatting for roster entries

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::user::DATE_OF_BIRTH_FORMAT;

/// Shown when a stored date cannot be read
pub const INVALID_DATE: &str = "Invalid Date";

const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

/// Render an ISO date as a long English calendar date
///
/// `"1990-01-05"` becomes `"January 5, 1990"`. Full ISO datetimes are
/// accepted and their calendar date (as written, no timezone shift) is used.
pub fn format_date(date: &str) -> String {
    parse_calendar_date(date.trim())
        .map(|d| d.format(LONG_DATE_FORMAT).to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_OF_BIRTH_FORMAT) {
        return Some(date);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_plain_date() {
        assert_eq!(format_date("1990-01-05"), "January 5, 1990");
        assert_eq!(format_date("2001-12-31"), "December 31, 2001");
    }

    #[test]
    fn test_format_datetime_keeps_written_date() {
        assert_eq!(format_date("1990-01-05T00:00:00.000Z"), "January 5, 1990");
        assert_eq!(format_date("1990-01-05T23:30:00-05:00"), "January 5, 1990");
        assert_eq!(format_date("1990-01-05T08:15:00"), "January 5, 1990");
    }

    #[test]
    fn test_format_invalid() {
        assert_eq!(format_date(""), INVALID_DATE);
        assert_eq!(format_date("yesterday"), INVALID_DATE);
        assert_eq!(format_date("1990-13-01"), INVALID_DATE);
    }

    #[test]
    fn test_format_does_not_touch_input() {
        let stored = String::from("1990-01-05");
        let _ = format_date(&stored);
        assert_eq!(stored, "1990-01-05");
    }
}
