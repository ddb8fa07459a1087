//! Cell parsing shared by the loader, the feature builder and the day stream.
//!
//! Date parsing has two modes. The loader coerces anything it cannot read to
//! a missing value and drops the row later; the feature builder and the day
//! stream expect already-clean dates and reject the first bad one.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// How to treat a date cell that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateParseMode {
    /// Unparseable or empty cells become `None`.
    LenientCoerce,
    /// Unparseable or empty cells are an error.
    StrictReject,
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a date or timestamp cell, keeping only the calendar date.
pub fn parse_date(raw: &str, mode: DateParseMode) -> Result<Option<NaiveDate>> {
    match parse_calendar_date(raw) {
        Some(date) => Ok(Some(date)),
        None => match mode {
            DateParseMode::LenientCoerce => Ok(None),
            DateParseMode::StrictReject => Err(Error::feature_build(format!(
                "bad date '{}'",
                raw.trim()
            ))),
        },
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    // NOAA stamps some daily summaries at 23:59; only the date is kept.
    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts.date());
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a numeric cell; anything that is not a finite number is missing.
///
/// Covers NOAA sentinels such as `T` (trace), `M` (missing) and values
/// flagged suspect with a trailing `s`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let v = raw.trim().parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_time_of_day_discarded() {
        let mode = DateParseMode::StrictReject;
        assert_eq!(parse_date("2021-03-04T23:59:00", mode).unwrap(), Some(ymd(2021, 3, 4)));
        assert_eq!(parse_date("2021-03-04 07:15", mode).unwrap(), Some(ymd(2021, 3, 4)));
        assert_eq!(
            parse_date("2021-03-04T23:59:00-05:00", mode).unwrap(),
            Some(ymd(2021, 3, 4))
        );
    }

    #[test]
    fn test_common_date_layouts() {
        let mode = DateParseMode::StrictReject;
        assert_eq!(parse_date(" 2020-02-29 ", mode).unwrap(), Some(ymd(2020, 2, 29)));
        assert_eq!(parse_date("2020/02/29", mode).unwrap(), Some(ymd(2020, 2, 29)));
        assert_eq!(parse_date("02/29/2020", mode).unwrap(), Some(ymd(2020, 2, 29)));
        assert_eq!(parse_date("20200229", mode).unwrap(), Some(ymd(2020, 2, 29)));
    }

    #[test]
    fn test_lenient_coerces_to_none() {
        let mode = DateParseMode::LenientCoerce;
        assert_eq!(parse_date("not a date", mode).unwrap(), None);
        assert_eq!(parse_date("", mode).unwrap(), None);
        assert_eq!(parse_date("2021-02-30", mode).unwrap(), None);
    }

    #[test]
    fn test_strict_rejects_with_value() {
        let err = parse_date("yesterday", DateParseMode::StrictReject).unwrap_err();
        assert!(matches!(err, Error::FeatureBuild(_)));
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_noaa_sentinels_are_missing() {
        assert_eq!(parse_number("41"), Some(41.0));
        assert_eq!(parse_number(" -3.5 "), Some(-3.5));
        assert_eq!(parse_number("T"), None);
        assert_eq!(parse_number("M"), None);
        assert_eq!(parse_number("32s"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }
}
