/// Utilities for reading timestamps out of table cells
///
/// Server-rendered tables carry their timestamps as display text. These
/// helpers accept the formats a browser's default date parser understands for
/// such text, so rows can be ordered without a round-trip to the server.
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse a cell's text as a point in time.
///
/// Offsets (RFC 3339) are normalized to UTC, naive values are taken as-is.
/// Returns `None` for text that is not a date ("Invalid Date").
/// Example: "2024-03-15 14:02:26" -> 2024-03-15T14:02:26
pub fn parse_cell_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Date portion of a timestamp cell: everything before the first space.
/// Example: "2024-03-15 14:02:26" -> "2024-03-15"
pub fn date_portion(text: &str) -> &str {
    text.split(' ').next().unwrap_or(text)
}
