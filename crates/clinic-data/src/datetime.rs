//! Local calendar date-time parsing for seed values.
//!
//! All dates in the dataset are naive local date-times: a calendar day in the clinic's
//! single local calendar with an optional time of day. A bare date means midnight.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a seed date value.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` and `YYYY-MM-DDTHH:MM:SS` (a space may
/// replace the `T`). Surrounding whitespace is ignored.
pub fn parse_local(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Some(date.and_time(NaiveTime::MIN));
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}

/// Render a date-time back into seed form.
///
/// Midnight renders as a bare date so that date-only values survive a round trip.
pub fn format_local(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format(DATE_FORMAT).to_string()
    } else {
        value.format(DATE_TIME_FORMATS[0]).to_string()
    }
}
