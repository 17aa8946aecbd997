use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::convert::{invalid, parse, ConversionError, Convert};
use crate::model::ValueKind;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

impl Convert for NaiveDate {
    fn kind() -> ValueKind {
        ValueKind::Date
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        parse(raw)
    }
}

impl Convert for NaiveTime {
    fn kind() -> ValueKind {
        ValueKind::Time
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        parse(raw)
    }
}

impl Convert for NaiveDateTime {
    fn kind() -> ValueKind {
        ValueKind::DateTime
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        let token = raw.ok_or(ConversionError::MissingValue)?;
        naive_date_time(token.trim()).ok_or_else(|| invalid::<NaiveDateTime>(token))
    }
}

impl Convert for DateTime<FixedOffset> {
    fn kind() -> ValueKind {
        ValueKind::DateTime
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        let token = raw.ok_or(ConversionError::MissingValue)?;
        let trimmed = token.trim();
        DateTime::parse_from_rfc3339(trimmed)
            .or_else(|_| DateTime::<FixedOffset>::from_str(trimmed))
            .map_err(|_| invalid::<DateTime<FixedOffset>>(token))
    }
}

impl Convert for DateTime<Utc> {
    fn kind() -> ValueKind {
        ValueKind::DateTime
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        let token = raw.ok_or(ConversionError::MissingValue)?;

        let trimmed = token.trim();

        match DateTime::<Utc>::from_str(trimmed) {
            Ok(value) => Ok(value),
            // Without an offset, the value is taken to be in UTC already.
            Err(_) => naive_date_time(trimmed)
                .map(|naive| Utc.from_utc_datetime(&naive))
                .ok_or_else(|| invalid::<DateTime<Utc>>(token)),
        }
    }
}

impl Convert for Duration {
    fn kind() -> ValueKind {
        ValueKind::Duration
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        let token = raw.ok_or(ConversionError::MissingValue)?;

        match parse_time_span(token) {
            Some((false, duration)) => Ok(duration),
            Some((true, duration)) if duration.is_zero() => Ok(duration),
            _ => Err(invalid::<Duration>(token)),
        }
    }
}

impl Convert for TimeDelta {
    fn kind() -> ValueKind {
        ValueKind::Duration
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        let token = raw.ok_or(ConversionError::MissingValue)?;
        let span = parse_time_span(token);
        let (negative, duration) = span.ok_or_else(|| invalid::<TimeDelta>(token))?;
        let delta = TimeDelta::from_std(duration).map_err(|_| invalid::<TimeDelta>(token))?;

        if negative {
            Ok(-delta)
        } else {
            Ok(delta)
        }
    }
}

fn naive_date_time(token: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::from_str(token)
        .or_else(|_| NaiveDateTime::parse_from_str(token, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::from_str(token)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse a time span of the form `[-][d.]hh:mm[:ss[.fffffffff]]`, or a bare whole number of days.
/// Returns whether the span is negative, alongside its magnitude.
pub(super) fn parse_time_span(token: &str) -> Option<(bool, Duration)> {
    let trimmed = token.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    if let Some(days) = digits(body) {
        return Some((
            negative,
            Duration::from_secs(days.checked_mul(SECONDS_PER_DAY)?),
        ));
    }

    let mut parts = body.split(':');
    let head = parts.next()?;
    let minutes = digits(parts.next()?)?;
    let seconds = parts.next();

    if parts.next().is_some() {
        return None;
    }

    let (days, hours) = match head.split_once('.') {
        Some((days, hours)) => (digits(days)?, digits(hours)?),
        None => (0, digits(head)?),
    };
    let (seconds, nanos) = match seconds {
        Some(seconds) => match seconds.split_once('.') {
            Some((whole, fraction)) => (digits(whole)?, fraction_nanos(fraction)?),
            None => (digits(seconds)?, 0),
        },
        None => (0, 0),
    };

    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    let total = days
        .checked_mul(SECONDS_PER_DAY)?
        .checked_add(hours * 3600 + minutes * 60 + seconds)?;
    Some((negative, Duration::new(total, nanos)))
}

fn digits(part: &str) -> Option<u64> {
    if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

fn fraction_nanos(fraction: &str) -> Option<u32> {
    if fraction.is_empty() || fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    format!("{fraction:0<9}").parse().ok()
}
