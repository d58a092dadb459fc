//! Date normalization
//!
//! Claim documents carry dates in whatever shape the extraction step
//! produced: epoch seconds, ISO-8601 strings or day-first strings as
//! printed on bills. This module turns them into a canonical `NaiveDate`.
//! Anything that cannot be read is treated as absent, never as an error.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day-first and slash formats tried after ISO-8601, in order
const FALLBACK_FORMATS: [&str; 4] = ["%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// A date as it arrives on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Seconds since the Unix epoch (UTC)
    Epoch(f64),
    /// Any textual representation
    Text(String),
}

impl RawDate {
    /// Normalizes this raw value into a calendar date
    pub fn normalize(&self) -> Option<NaiveDate> {
        normalize_date(self)
    }
}

impl From<NaiveDate> for RawDate {
    fn from(date: NaiveDate) -> Self {
        RawDate::Text(date.format("%Y-%m-%d").to_string())
    }
}

impl From<&str> for RawDate {
    fn from(s: &str) -> Self {
        RawDate::Text(s.to_string())
    }
}

impl fmt::Display for RawDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDate::Epoch(secs) => write!(f, "{}", secs),
            RawDate::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parses a raw date into a canonical calendar date
///
/// Tried in order: numeric epoch seconds, ISO-8601 (`YYYY-MM-DD`, then a full
/// RFC 3339 date-time), then each of the fixed day/month/year formats.
/// The first success wins; `None` means unparseable.
pub fn normalize_date(raw: &RawDate) -> Option<NaiveDate> {
    let parsed = match raw {
        RawDate::Epoch(secs) => from_epoch(*secs),
        RawDate::Text(text) => parse_text(text),
    };

    if parsed.is_none() {
        tracing::debug!(raw = %raw, "Unparseable date treated as absent");
    }
    parsed
}

/// Convenience wrapper for textual dates
pub fn parse_date_str(text: &str) -> Option<NaiveDate> {
    normalize_date(&RawDate::Text(text.to_string()))
}

fn from_epoch(secs: f64) -> Option<NaiveDate> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp(secs.trunc() as i64, 0).map(|dt| dt.date_naive())
}

fn parse_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_date_str("2024-11-01"), Some(ymd(2024, 11, 1)));
    }

    #[test]
    fn test_day_first_formats() {
        assert_eq!(parse_date_str("01/11/2024"), Some(ymd(2024, 11, 1)));
        assert_eq!(parse_date_str("15-10-2024"), Some(ymd(2024, 10, 15)));
        assert_eq!(parse_date_str("2024/10/15"), Some(ymd(2024, 10, 15)));
    }

    #[test]
    fn test_rfc3339_datetime() {
        assert_eq!(
            parse_date_str("2024-10-15T10:30:00+05:30"),
            Some(ymd(2024, 10, 15))
        );
    }

    #[test]
    fn test_epoch_seconds() {
        // 2024-01-01T00:00:00Z
        assert_eq!(normalize_date(&RawDate::Epoch(1_704_067_200.0)), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn test_unparseable_is_absent() {
        assert_eq!(parse_date_str("not a date"), None);
        assert_eq!(parse_date_str("   "), None);
        assert_eq!(normalize_date(&RawDate::Epoch(f64::NAN)), None);
    }

    #[test]
    fn test_raw_date_deserializes_untagged() {
        let n: RawDate = serde_json::from_str("1704067200").unwrap();
        assert!(matches!(n, RawDate::Epoch(_)));

        let s: RawDate = serde_json::from_str("\"01/11/2024\"").unwrap();
        assert_eq!(s.normalize(), Some(ymd(2024, 11, 1)));
    }
}
