use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{ChartError, ChartResult};

/// Parses a host date string.
///
/// Accepts RFC 3339 (offsets are normalized to UTC), ISO-8601 date-times with
/// or without seconds, and plain `YYYY-MM-DD` dates. `format`, when given, is
/// a strftime pattern tried before the built-in formats.
pub fn parse_date(input: &str, format: Option<&str>) -> ChartResult<NaiveDateTime> {
    let trimmed = input.trim();
    if let Some(format) = format {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(parsed.and_time(chrono::NaiveTime::MIN));
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.naive_utc());
    }
    for pattern in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(parsed);
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(parsed.and_time(chrono::NaiveTime::MIN));
    }

    Err(ChartError::InvalidData(format!(
        "`{input}` is not a recognized date"
    )))
}

#[must_use]
pub fn datetime_to_unix_seconds(time: NaiveDateTime) -> f64 {
    time.and_utc().timestamp_millis() as f64 / 1000.0
}

pub fn unix_seconds_to_datetime(seconds: f64) -> ChartResult<NaiveDateTime> {
    if !seconds.is_finite() {
        return Err(ChartError::InvalidData("timestamp must be finite".to_owned()));
    }
    DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
        .map(|time| time.naive_utc())
        .ok_or_else(|| ChartError::InvalidData(format!("timestamp {seconds} is out of range")))
}
