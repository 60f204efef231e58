//! Turns `YYYY-MM-DD` bounds and a zone name into UTC instants.
//!
//! The range covers whole days: from `00:00:00.000` of the start date to
//! `23:59:59.999` of the end date, both read as local time in the zone.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::ServerError;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Zone {
    Fixed(FixedOffset),
    Named(Tz),
}

fn parse_date(value: &str) -> Result<NaiveDate, ServerError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ServerError::Generic(format!("Invalid date: {value}, expected YYYY-MM-DD"))
    })
}

/// `+HH:MM`, `-HHMM` or `+HH`.
fn parse_offset(value: &str) -> Option<FixedOffset> {
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 18 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn parse_zone(value: Option<&str>) -> Result<Zone, ServerError> {
    let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(Zone::Fixed(Utc.fix()));
    };
    let value = raw.trim();
    if value.eq_ignore_ascii_case("utc") || value.eq_ignore_ascii_case("z") {
        return Ok(Zone::Fixed(Utc.fix()));
    }
    // An unescaped `+` in a query string arrives as a space.
    let signed = if raw.starts_with(' ') {
        format!("+{value}")
    } else {
        value.to_string()
    };
    if let Some(offset) = parse_offset(&signed) {
        return Ok(Zone::Fixed(offset));
    }
    value
        .parse::<Tz>()
        .map(Zone::Named)
        .map_err(|_| ServerError::Generic(format!("Invalid timezone: {value}")))
}

/// Resolve a local time, taking the earliest or latest reading when the
/// wall clock is ambiguous. A time inside a DST gap moves forward an hour.
fn local_to_utc<Z: TimeZone>(zone: &Z, local: NaiveDateTime, latest: bool) -> Option<DateTime<Utc>> {
    let resolve = |naive: NaiveDateTime| {
        let mapped = zone.from_local_datetime(&naive);
        if latest { mapped.latest() } else { mapped.earliest() }
    };
    resolve(local)
        .or_else(|| resolve(local + TimeDelta::hours(1)))
        .map(|dt| dt.with_timezone(&Utc))
}

impl Zone {
    fn to_utc(self, local: NaiveDateTime, latest: bool) -> Option<DateTime<Utc>> {
        match self {
            Zone::Fixed(offset) => local_to_utc(&offset, local, latest),
            Zone::Named(tz) => local_to_utc(&tz, local, latest),
        }
    }
}

/// UTC bounds of the inclusive day range `start..=end` in `timezone`.
///
/// A start after the end is returned as is; the query then matches nothing.
pub(crate) fn utc_bounds(
    start: &str,
    end: &str,
    timezone: Option<&str>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ServerError> {
    let zone = parse_zone(timezone)?;
    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;

    let out_of_range = || ServerError::Generic("Date out of range".to_string());
    let start_local = start_date
        .and_hms_milli_opt(0, 0, 0, 0)
        .ok_or_else(out_of_range)?;
    let end_local = end_date
        .and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(out_of_range)?;

    let start = zone.to_utc(start_local, false).ok_or_else(out_of_range)?;
    let end = zone.to_utc(end_local, true).ok_or_else(out_of_range)?;
    Ok((start, end))
}
