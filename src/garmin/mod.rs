//! Garmin Connect CSV ingestion
//!
//! Turns the text of a Garmin Connect activity export into `NewWorkout`
//! records ready for a bulk insert. Parsing is a pure, single pass over the
//! input: no I/O, no shared state, no errors. The only gate on a row is a
//! parseable date; every other field degrades to `None` when malformed.

pub mod fields;
pub mod headers;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{NewWorkout, UNKNOWN_ACTIVITY};
use fields::{parse_date, parse_distance, parse_duration, parse_integer, parse_pace};
use headers::{Field, HeaderIndex, ResolvedRow};

/// ---------------------------------------------------------------------------
/// Ingest Report
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
  /// No date column, or the date cell was blank
  MissingDate,
  /// The date cell held something that is not a date
  UnparseableDate { value: String },
  /// The CSV reader could not split the line into fields
  Malformed { message: String },
}

impl std::fmt::Display for RejectReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MissingDate => write!(f, "missing date"),
      Self::UnparseableDate { value } => write!(f, "unparseable date '{}'", value),
      Self::Malformed { message } => write!(f, "malformed row: {}", message),
    }
  }
}

/// A dropped row, identified by its 1-based line number in the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
  pub line: u64,
  pub reason: RejectReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
  /// Accepted records, in input order
  pub workouts: Vec<NewWorkout>,
  pub rejected: Vec<RejectedRow>,
  /// Data rows seen, excluding blank lines
  pub total_rows: usize,
}

impl IngestReport {
  pub fn accepted_count(&self) -> usize {
    self.workouts.len()
  }

  pub fn rejected_count(&self) -> usize {
    self.rejected.len()
  }
}

/// ---------------------------------------------------------------------------
/// Ingestion
/// ---------------------------------------------------------------------------

/// Parse export text into accepted records, dropping rows without a date
pub fn parse_garmin_csv(text: &str) -> Vec<NewWorkout> {
  ingest(text).workouts
}

/// Parse export text, keeping track of which rows were dropped and why
pub fn ingest(text: &str) -> IngestReport {
  let mut reader = ReaderBuilder::new()
    .flexible(true)
    .trim(Trim::All)
    .from_reader(text.as_bytes());

  let mut report = IngestReport::default();

  let index = match reader.headers() {
    Ok(headers) => HeaderIndex::new(headers.iter()),
    Err(e) => {
      debug!("Unreadable header row: {}", e);
      return report;
    }
  };
  if !index.has(Field::Date) {
    warn!("No date column in CSV header; every row will be skipped");
  }

  let mut record = StringRecord::new();
  loop {
    let line = reader.position().line();
    match reader.read_record(&mut record) {
      Ok(false) => break,
      Ok(true) => {
        if record.iter().all(str::is_empty) {
          continue;
        }
        report.total_rows += 1;
        let line = record.position().map(|p| p.line()).unwrap_or(line);
        match assemble(&index.resolve(&record)) {
          Ok(workout) => report.workouts.push(workout),
          Err(reason) => {
            debug!("Skipping line {}: {}", line, reason);
            report.rejected.push(RejectedRow { line, reason });
          }
        }
      }
      Err(e) => {
        report.total_rows += 1;
        let line = e.position().map(|p| p.line()).unwrap_or(line);
        debug!("Skipping line {}: {}", line, e);
        report.rejected.push(RejectedRow {
          line,
          reason: RejectReason::Malformed {
            message: e.to_string(),
          },
        });
      }
    }
  }

  info!(
    "Parsed Garmin CSV: {} accepted, {} rejected of {} rows",
    report.accepted_count(),
    report.rejected_count(),
    report.total_rows
  );

  report
}

/// Build one record from a resolved row; only the date can reject it
pub fn assemble(row: &ResolvedRow<'_>) -> Result<NewWorkout, RejectReason> {
  let raw_date = row.get(Field::Date);
  if raw_date.is_empty() {
    return Err(RejectReason::MissingDate);
  }
  let date = parse_date(raw_date).ok_or_else(|| RejectReason::UnparseableDate {
    value: raw_date.to_string(),
  })?;

  let activity_type = match row.get(Field::ActivityType) {
    "" => UNKNOWN_ACTIVITY.to_string(),
    other => other.to_string(),
  };

  Ok(NewWorkout {
    activity_type,
    date,
    duration_seconds: parse_duration(row.get(Field::Duration)),
    distance_km: parse_distance(row.get(Field::Distance)),
    avg_pace_per_km: parse_pace(row.get(Field::AvgPace)),
    avg_heart_rate: parse_integer(row.get(Field::AvgHeartRate)),
    max_heart_rate: parse_integer(row.get(Field::MaxHeartRate)),
    avg_power: parse_integer(row.get(Field::AvgPower)),
    max_power: parse_integer(row.get(Field::MaxPower)),
    avg_cadence: parse_integer(row.get(Field::AvgCadence)),
    elevation_gain: parse_integer(row.get(Field::ElevationGain)),
    calories: parse_integer(row.get(Field::Calories)),
    notes: None,
  })
}
