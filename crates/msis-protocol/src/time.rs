//! Date handling for model inputs.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Accepted date format, e.g. `2024-03-20T12:30`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parse a `YYYY-MM-DDTHH:MM` date (UTC).
pub fn parse_date(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), DATE_FORMAT)
}

/// Day of year, 1-based.
pub fn day_of_year(date: &NaiveDateTime) -> f64 {
    date.ordinal() as f64
}

/// Universal time in seconds since midnight.
pub fn seconds_of_day(date: &NaiveDateTime) -> f64 {
    date.num_seconds_from_midnight() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-03-20T12:30").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.hour(), 12);
        assert_eq!(date.minute(), 30);
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("2024-03-20").is_err());
        assert!(parse_date("2024-03-20 12:30").is_err());
        assert!(parse_date("not a date").is_err());
    }

    #[test]
    fn test_day_of_year_and_seconds() {
        let date = parse_date("2024-12-31T01:02").unwrap();
        // 2024 is a leap year
        assert_eq!(day_of_year(&date), 366.0);
        assert_eq!(seconds_of_day(&date), 3720.0);

        let new_year = parse_date("2023-01-01T00:00").unwrap();
        assert_eq!(day_of_year(&new_year), 1.0);
        assert_eq!(seconds_of_day(&new_year), 0.0);
    }
}
