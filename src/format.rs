//! Display formatting for workout tables

use chrono::NaiveDate;
use std::fmt::Display;

use crate::garmin::fields::parse_date;

pub const DURATION_PLACEHOLDER: &str = "--:--";
pub const EMPTY_CELL: &str = "-";

/// Render seconds as `H:MM:SS`, or `M:SS` under an hour.
/// Absent, zero and negative values render as `placeholder`.
pub fn format_duration(seconds: Option<i64>, placeholder: &str) -> String {
  let seconds = match seconds {
    Some(s) if s > 0 => s,
    _ => return placeholder.to_string(),
  };

  let hrs = seconds / 3600;
  let mins = (seconds % 3600) / 60;
  let secs = seconds % 60;

  if hrs > 0 {
    format!("{}:{:02}:{:02}", hrs, mins, secs)
  } else {
    format!("{}:{:02}", mins, secs)
  }
}

/// Short US-style date ("Mar 1, 2024").
/// Anything that does not parse as a date is returned unchanged.
pub fn format_date(value: Option<&str>) -> String {
  let raw = match value.map(str::trim) {
    Some(v) if !v.is_empty() => v,
    _ => return EMPTY_CELL.to_string(),
  };

  match parse_date(raw) {
    Some(date) => format_day(date),
    None => raw.to_string(),
  }
}

pub fn format_day(date: NaiveDate) -> String {
  date.format("%b %-d, %Y").to_string()
}

/// "10.50 km", or "- km" when absent
pub fn format_distance(km: Option<f64>) -> String {
  match km {
    Some(km) => format!("{:.2} km", km),
    None => format!("{} km", EMPTY_CELL),
  }
}

/// Value with an optional unit suffix, "-" when absent
pub fn format_optional<T: Display>(value: Option<T>, unit: &str) -> String {
  let cell = value
    .map(|v| v.to_string())
    .unwrap_or_else(|| EMPTY_CELL.to_string());
  if unit.is_empty() {
    cell
  } else {
    format!("{} {}", cell, unit)
  }
}
