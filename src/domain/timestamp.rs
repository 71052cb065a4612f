// Timestamp normalization used to line up chart labels with peak markers
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Collapse a whitespace-separated date-time ("2024-05-01  12:00:00")
/// into the combined form ("2024-05-01T12:00:00").
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((date, time)) => format!("{}T{}", date, time.trim_start()),
        None => trimmed.to_string(),
    }
}

/// Parse a timestamp into epoch milliseconds.
///
/// Timestamps with an explicit offset are converted to the instant they
/// denote; naive ones are read as UTC so both sides of a comparison agree.
/// Returns `None` for anything unparseable, which never matches.
pub fn instant_millis(raw: &str) -> Option<i64> {
    let normalized = normalize(raw);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.timestamp_millis());
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().timestamp_millis())
}
