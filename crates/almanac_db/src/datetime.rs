//! Timestamp serialization and month arithmetic.
//!
//! Calendar timestamps are persisted as fixed-format text with second
//! precision. Range comparisons in SQL run on the serialized strings,
//! which sort chronologically in this format.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{DbError, DbResult};

/// Storage format for timestamps. Round-tripping through this format is
/// lossless to the second.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Lower sentinel for open-ended ranges.
pub(crate) const RANGE_MIN: &str = "1900-01-01 00:00:00";

/// Upper sentinel for open-ended ranges.
pub(crate) const RANGE_MAX: &str = "2500-01-01 00:00:00";

/// Serialize a timestamp to its storage form.
pub fn fmt_datetime(ts: NaiveDateTime) -> String {
    ts.format(DATETIME_FORMAT).to_string()
}

/// Parse a timestamp from its storage form.
pub fn parse_datetime(text: &str) -> DbResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .map_err(|err| DbError::invalid_data(format!("bad timestamp '{text}': {err}")))
}

/// Lower range bound as bind text, falling back to the sentinel.
pub(crate) fn range_start(start: Option<NaiveDateTime>) -> String {
    start.map_or_else(|| RANGE_MIN.to_string(), fmt_datetime)
}

/// Upper range bound as bind text, falling back to the sentinel.
pub(crate) fn range_end(end: Option<NaiveDateTime>) -> String {
    end.map_or_else(|| RANGE_MAX.to_string(), fmt_datetime)
}

/// `YYYY-MM` bucket key for a timestamp.
pub fn month_key(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m").to_string()
}

/// First and last second of the month named by a `YYYY-MM` key.
pub(crate) fn month_bounds(key: &str) -> DbResult<(NaiveDateTime, NaiveDateTime)> {
    let bad_key = || DbError::invalid_data(format!("bad month key '{key}'"));
    let (year, month) = key
        .split_once('-')
        .and_then(|(y, m)| Some((y.parse::<i32>().ok()?, m.parse::<u32>().ok()?)))
        .ok_or_else(bad_key)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(bad_key)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(bad_key)?;
    let start = first.and_time(NaiveTime::MIN);
    let end = next.and_time(NaiveTime::MIN) - Duration::seconds(1);
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(text: &str) -> NaiveDateTime {
        parse_datetime(text).unwrap()
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let text = "2020-01-09 13:45:30";
        assert_eq!(fmt_datetime(ts(text)), text);
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(parse_datetime("2020-01-09T13:45:30").is_err());
        assert!(parse_datetime("2020-01-09").is_err());
    }

    #[test]
    fn test_month_key() {
        assert_eq!(month_key(ts("2018-01-10 10:00:00")), "2018-01");
        assert_eq!(month_key(ts("2020-12-31 23:59:59")), "2020-12");
    }

    #[test]
    fn test_month_bounds() {
        let (start, end) = month_bounds("2020-01").unwrap();
        assert_eq!(fmt_datetime(start), "2020-01-01 00:00:00");
        assert_eq!(fmt_datetime(end), "2020-01-31 23:59:59");
    }

    #[test]
    fn test_month_bounds_leap_february() {
        let (_, end) = month_bounds("2020-02").unwrap();
        assert_eq!(fmt_datetime(end), "2020-02-29 23:59:59");
    }

    #[test]
    fn test_month_bounds_december_wraps_year() {
        let (start, end) = month_bounds("2019-12").unwrap();
        assert_eq!(fmt_datetime(start), "2019-12-01 00:00:00");
        assert_eq!(fmt_datetime(end), "2019-12-31 23:59:59");
    }

    #[test]
    fn test_month_bounds_rejects_garbage() {
        assert!(month_bounds("2020").is_err());
        assert!(month_bounds("2020-13").is_err());
        assert!(month_bounds("not-a-month").is_err());
    }

    #[test]
    fn test_range_sentinels() {
        assert_eq!(range_start(None), RANGE_MIN);
        assert_eq!(range_end(None), RANGE_MAX);
        assert_eq!(
            range_start(Some(ts("2018-01-10 10:00:00"))),
            "2018-01-10 10:00:00"
        );
    }
}
