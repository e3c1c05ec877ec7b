//! Typed field parsers
//!
//! Every parser is total: malformed input yields `None`, never an error or a
//! panic. Numeric columns carry units and vendor formatting ("10.5 km",
//! "165 bpm", "1,234"), so everything except ASCII digits, `.` and `-` is
//! deleted before parsing. Thousands separators are therefore dropped rather
//! than read as decimal points.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time layouts seen in Garmin exports and spreadsheet round-trips
const DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%d %H:%M:%S",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%d %H:%M",
  "%Y-%m-%dT%H:%M:%S",
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y/%m/%d %H:%M:%S",
  "%m/%d/%Y %H:%M:%S",
  "%m/%d/%Y %H:%M",
  "%m/%d/%Y %I:%M:%S %p",
  "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &[
  "%Y-%m-%d",
  "%Y/%m/%d",
  "%m/%d/%Y",
  "%b %d, %Y",
  "%B %d, %Y",
  "%a, %b %d, %Y",
  "%d %b %Y",
];

/// Parse a date or timestamp to its calendar date.
/// Offsets are honoured as written: the local date of the activity is kept.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.date_naive());
  }

  DATETIME_FORMATS
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .map(|dt| dt.date())
    .or_else(|| {
      DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    })
}

/// Parse `H:MM:SS` or `MM:SS` to whole seconds.
/// The seconds component may carry a fraction ("45:30.4"), which is rounded.
pub fn parse_duration(raw: &str) -> Option<i64> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  let parts: Vec<&str> = raw.split(':').collect();
  let (hours, minutes, seconds) = match parts.as_slice() {
    [h, m, s] => (whole_number(h)?, whole_number(m)?, seconds_part(s)?),
    [m, s] => (0, whole_number(m)?, seconds_part(s)?),
    _ => return None,
  };

  hours
    .checked_mul(3600)?
    .checked_add(minutes.checked_mul(60)?)?
    .checked_add(seconds)
}

fn whole_number(part: &str) -> Option<i64> {
  let part = part.trim();
  if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  part.parse().ok()
}

fn seconds_part(part: &str) -> Option<i64> {
  let part = part.trim();
  if let Some(whole) = whole_number(part) {
    return Some(whole);
  }

  let (int, frac) = part.split_once('.')?;
  let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
  if !digits(int) || !digits(frac) {
    return None;
  }
  let value: f64 = part.parse().ok()?;
  to_i64(value.round())
}

/// Keep ASCII digits, `.` and `-`; drop everything else
fn strip_to_numeric(raw: &str) -> String {
  raw
    .chars()
    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
    .collect()
}

fn parse_number(raw: &str) -> Option<f64> {
  let stripped = strip_to_numeric(raw);
  if stripped.is_empty() {
    return None;
  }
  stripped.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn to_i64(value: f64) -> Option<i64> {
  if value.is_finite() && value.abs() < i64::MAX as f64 {
    Some(value as i64)
  } else {
    None
  }
}

/// Distance in the export's unit with the unit suffix removed
pub fn parse_distance(raw: &str) -> Option<f64> {
  parse_number(raw).filter(|v| *v >= 0.0)
}

/// Integer measurement (heart rate, power, cadence, ascent, calories), rounded
pub fn parse_integer(raw: &str) -> Option<i64> {
  parse_number(raw).and_then(|v| to_i64(v.round()))
}

/// Pace is kept as text ("5:30"), only trimmed
pub fn parse_pace(raw: &str) -> Option<String> {
  let raw = raw.trim();
  if raw.is_empty() {
    None
  } else {
    Some(raw.to_string())
  }
}
