//! ISO-8601 parsing for purchase dates and export bounds
//!
//! Accepts calendar dates with reduced precision (`2021`, `2021-01`,
//! `2021-01-02`), an optional time separated by `T` or a space with reduced
//! precision (`03`, `03:04`, `03:04:05`, `03:04:05.678`), and an optional `Z`
//! or numeric offset. Values without an offset are read as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

/// Parse an ISO-8601 date or date-time, rejecting impossible calendar dates
pub fn parse_iso8601(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    let (date_part, time_part) = match s.split_once(['T', ' ']) {
        Some((date, time)) => (date, Some(time)),
        None => (s, None),
    };

    let date = parse_date(date_part)?;
    let Some(time_part) = time_part else {
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    };

    let (clock, offset_secs) = split_offset(time_part)?;
    let time = parse_time(clock)?;
    let offset = FixedOffset::east_opt(offset_secs)?;

    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let year = digits(parts.next()?, 4)?;
    let month = match parts.next() {
        Some(p) => digits(p, 2)?,
        None => 1,
    };
    let day = match parts.next() {
        Some(p) => digits(p, 2)?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Split a trailing `Z` or `±HH[[:]MM]` off the time, returning offset seconds east
fn split_offset(s: &str) -> Option<(&str, i32)> {
    if let Some(clock) = s.strip_suffix(['Z', 'z']) {
        return Some((clock, 0));
    }

    let Some(pos) = s.rfind(['+', '-']) else {
        return Some((s, 0));
    };

    let (clock, offset) = s.split_at(pos);
    let sign = if offset.starts_with('-') { -1 } else { 1 };
    let offset = &offset[1..];
    if !offset.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }

    let (hours, minutes) = match offset.len() {
        2 => (digits(offset, 2)?, 0),
        4 => (digits(&offset[..2], 2)?, digits(&offset[2..], 2)?),
        5 => {
            let (h, m) = offset.split_once(':')?;
            (digits(h, 2)?, digits(m, 2)?)
        }
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    Some((clock, sign * (hours * 3600 + minutes * 60) as i32))
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    let (main, fraction) = match s.split_once(['.', ',']) {
        Some((main, fraction)) => (main, Some(fraction)),
        None => (s, None),
    };

    let mut parts = main.split(':');
    let hour = digits(parts.next()?, 2)?;
    let minute = match parts.next() {
        Some(p) => digits(p, 2)?,
        None => 0,
    };
    let second = parts.next().map(|p| digits(p, 2));
    if parts.next().is_some() {
        return None;
    }

    let nanos = match (second, fraction) {
        (_, None) => 0,
        (Some(_), Some(f)) if !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()) => {
            format!("{:0<9}", &f[..f.len().min(9)]).parse().ok()?
        }
        _ => return None,
    };
    let second = second.unwrap_or(Some(0))?;

    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
}

/// Parse exactly `len` ASCII digits
fn digits(s: &str, len: usize) -> Option<u32> {
    if s.len() != len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn reduced_precision_dates() {
        let expected = utc(2021, 1, 1, 0, 0, 0);
        for input in ["2021", "2021-01", "2021-01-01", "2021-01-01T00", "2021-01-01T00:00"] {
            assert_eq!(parse_iso8601(input), Some(expected), "input {input}");
        }
    }

    #[test]
    fn full_datetime_with_zulu() {
        assert_eq!(
            parse_iso8601("2020-11-05T13:15:30Z"),
            Some(utc(2020, 11, 5, 13, 15, 30))
        );
    }

    #[test]
    fn numeric_offsets_convert_to_utc() {
        let expected = utc(2019, 12, 5, 5, 15, 30);
        assert_eq!(parse_iso8601("2019-12-05T13:15:30+08:00"), Some(expected));
        assert_eq!(parse_iso8601("2019-12-05T13:15:30+0800"), Some(expected));
        assert_eq!(parse_iso8601("2019-12-05T13:15:30+08"), Some(expected));
        assert_eq!(
            parse_iso8601("2019-12-05T00:15:30-02:30"),
            Some(utc(2019, 12, 5, 2, 45, 30))
        );
    }

    #[test]
    fn space_separator_and_fraction() {
        let parsed = parse_iso8601("2021-01-02 03:04:05.5").unwrap();
        assert_eq!(parsed, utc(2021, 1, 2, 3, 4, 5) + chrono::Duration::milliseconds(500));
    }

    #[test]
    fn no_offset_is_utc() {
        assert_eq!(
            parse_iso8601("2021-09-21T17:09:00"),
            Some(utc(2021, 9, 21, 17, 9, 0))
        );
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert_eq!(parse_iso8601("2021-02-30"), None);
        assert_eq!(parse_iso8601("2021-02-30T01:02:03"), None);
        assert_eq!(parse_iso8601("2021-13-01"), None);
        assert_eq!(parse_iso8601("2021-01-01T25:00"), None);
    }

    #[test]
    fn rejects_garbage() {
        for input in [
            "",
            "xyz",
            "21-01-01",
            "2021-1-1",
            "2021-01-01T",
            "2021-01-01T00:00:00.",
            "2021-01-01T00+99",
            "2021-01-01T00:00+1\u{e9}2",
            "2021-01-01T00:00-\u{e9}\u{e9}",
        ] {
            assert_eq!(parse_iso8601(input), None, "input {input:?}");
        }
    }
}
