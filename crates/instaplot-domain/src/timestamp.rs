//! Timestamp interpretation for the time axis
//!
//! Card times are free text in an ISO-like form. Offset-less values are read
//! as UTC so a layout never depends on the host's locale or timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a card time into Unix epoch milliseconds.
///
/// Returns `None` for text that matches none of the accepted forms.
///
/// # Examples
///
/// ```
/// use instaplot_domain::timestamp::parse_timestamp;
///
/// assert_eq!(parse_timestamp("1970-01-01T00:01"), Some(60_000));
/// assert_eq!(parse_timestamp("yesterday"), None);
/// ```
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }
    None
}
