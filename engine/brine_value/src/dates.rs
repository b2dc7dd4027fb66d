//! Date/time parsing and strftime-style formatting.
//!
//! Binding data carries timestamps in a handful of shapes (RFC3339 exports,
//! `YYYY-MM-DD HH:MM:SS` form fields, bare dates, long-hand dates typed by
//! humans). [`parse_date_time`] tries them in order; comparison against
//! strings and the `date` filter both go through it.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::fmt::Write;

use crate::value::Value;

/// Default `date` filter format: `Fri, Jul 17, 15`.
pub const DEFAULT_DATE_FORMAT: &str = "%a, %b %d, %y";

/// Datetime layouts with an explicit zone.
const ZONED_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z"];

/// Datetime layouts without a zone; parsed as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Date-only layouts; parsed at midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%m/%d/%Y"];

/// Parse a string into an instant.
///
/// Returns `None` when no accepted layout matches; callers treat that as
/// sparse data, not an error.
pub fn parse_date_time(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim_ascii();
    if s.is_empty() {
        return None;
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t);
    }
    for fmt in ZONED_FORMATS {
        if let Ok(t) = DateTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t.and_utc().fixed_offset());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(midnight(d));
        }
    }
    None
}

/// Parse a string into a calendar date (the date part of any accepted
/// layout, in the timestamp's own zone).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    parse_date_time(s).map(|t| t.date_naive())
}

/// A calendar date as an instant, midnight UTC.
pub fn midnight(d: NaiveDate) -> DateTime<FixedOffset> {
    d.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
        .fixed_offset()
}

/// Format an instant with a strftime-style format string.
///
/// Returns `None` when the format contains a directive chrono does not
/// recognize; formatting never panics on author-supplied formats.
pub fn strftime(t: DateTime<FixedOffset>, fmt: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(fmt).collect();
    if items.contains(&Item::Error) {
        return None;
    }
    let mut out = String::new();
    match write!(out, "{}", t.format_with_items(items.into_iter())) {
        Ok(()) => Some(out),
        Err(_) => None,
    }
}

/// View a value as an instant, if it has one: a `Time` directly, a `Date`
/// at midnight UTC, or a string in an accepted layout.
pub fn as_instant(v: &Value) -> Option<DateTime<FixedOffset>> {
    match v {
        Value::Time(t) => Some(*t),
        Value::Date(d) => Some(midnight(*d)),
        Value::Str(s) => parse_date_time(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let t = parse_date_time("2015-07-17T15:04:05Z").unwrap();
        assert_eq!(t.date_naive(), NaiveDate::from_ymd_opt(2015, 7, 17).unwrap());
    }

    #[test]
    fn test_parse_zoned() {
        let t = parse_date_time("2017-02-08 19:00:00 -05:00").unwrap();
        assert_eq!(strftime(t, "%H:%M").unwrap(), "19:00");
    }

    #[test]
    fn test_parse_naive_and_bare_date() {
        assert!(parse_date_time("2017-02-08 09:00:00").is_some());
        assert!(parse_date_time("2017-07-09").is_some());
        assert!(parse_date_time("March 14, 2016").is_some());
        assert!(parse_date_time("not a date").is_none());
    }

    #[test]
    fn test_strftime_padding_variants() {
        let t = parse_date_time("2017-02-08 09:00:00").unwrap();
        assert_eq!(strftime(t, "%H:%M").unwrap(), "09:00");
        assert_eq!(strftime(t, "%-H:%M").unwrap(), "9:00");
        assert_eq!(strftime(t, "%d/%m").unwrap(), "08/02");
        assert_eq!(strftime(t, "%e/%m").unwrap(), " 8/02");
        assert_eq!(strftime(t, "%-d/%-m").unwrap(), "8/2");
    }

    #[test]
    fn test_strftime_default_format() {
        let t = parse_date_time("2015-07-17T15:04:05Z").unwrap();
        assert_eq!(strftime(t, DEFAULT_DATE_FORMAT).unwrap(), "Fri, Jul 17, 15");
    }

    #[test]
    fn test_strftime_rejects_unknown_directive() {
        let t = parse_date_time("2017-07-09").unwrap();
        assert_eq!(strftime(t, "%Q"), None);
    }
}
