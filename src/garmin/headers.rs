//! Header normalization for Garmin Connect CSV exports
//!
//! Garmin column names drift between export settings and app versions
//! ("Avg HR" vs "Avg_HR" vs "avg heart rate"). Every known spelling is mapped
//! onto a small set of canonical fields once per header row, and the
//! resulting index is reused for every data row.

use std::collections::HashMap;

/// ---------------------------------------------------------------------------
/// Canonical Fields
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
  ActivityType,
  Date,
  Duration,
  Distance,
  AvgPace,
  AvgHeartRate,
  MaxHeartRate,
  AvgPower,
  MaxPower,
  AvgCadence,
  ElevationGain,
  Calories,
}

impl Field {
  pub const ALL: [Field; 12] = [
    Field::ActivityType,
    Field::Date,
    Field::Duration,
    Field::Distance,
    Field::AvgPace,
    Field::AvgHeartRate,
    Field::MaxHeartRate,
    Field::AvgPower,
    Field::MaxPower,
    Field::AvgCadence,
    Field::ElevationGain,
    Field::Calories,
  ];

  /// Accepted header spellings, in priority order
  pub fn aliases(&self) -> &'static [&'static str] {
    match self {
      Field::ActivityType => &["activity type", "activity_type", "type"],
      Field::Date => &["date", "start time", "start_time"],
      Field::Duration => &["time", "duration", "elapsed time"],
      Field::Distance => &["distance"],
      Field::AvgPace => &["avg pace", "avg_pace", "pace"],
      Field::AvgHeartRate => &["avg hr", "avg_hr", "avg heart rate"],
      Field::MaxHeartRate => &["max hr", "max_hr", "max heart rate"],
      Field::AvgPower => &["avg power", "avg_power", "power"],
      Field::MaxPower => &["max power", "max_power"],
      Field::AvgCadence => &[
        "avg cadence",
        "avg_cadence",
        "cadence",
        "avg run cadence",
        "avg_run_cadence",
      ],
      Field::ElevationGain => &["elev gain", "elevation gain", "total ascent", "elev_gain"],
      Field::Calories => &["calories"],
    }
  }
}

/// Lowercase, trim, drop quotes and punctuation, treat `_` as a space and
/// collapse runs of whitespace. A leading byte-order mark is discarded.
pub fn normalize_header(raw: &str) -> String {
  let cleaned: String = raw
    .trim_start_matches('\u{feff}')
    .chars()
    .filter_map(|c| match c {
      '_' => Some(' '),
      c if c.is_ascii_punctuation() => None,
      c => Some(c.to_ascii_lowercase()),
    })
    .collect();

  cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// ---------------------------------------------------------------------------
/// Header Index
/// ---------------------------------------------------------------------------

/// Column positions for each canonical field, ordered by alias priority
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
  columns: HashMap<Field, Vec<usize>>,
}

impl HeaderIndex {
  pub fn new<I, S>(headers: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    // First occurrence wins when a normalized header repeats
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (idx, header) in headers.into_iter().enumerate() {
      positions.entry(normalize_header(header.as_ref())).or_insert(idx);
    }

    let mut columns = HashMap::new();
    for field in Field::ALL {
      let mut found: Vec<usize> = Vec::new();
      for alias in field.aliases() {
        if let Some(&idx) = positions.get(&normalize_header(alias)) {
          if !found.contains(&idx) {
            found.push(idx);
          }
        }
      }
      if !found.is_empty() {
        columns.insert(field, found);
      }
    }

    Self { columns }
  }

  pub fn has(&self, field: Field) -> bool {
    self.columns.contains_key(&field)
  }

  /// Resolve one data row to a canonical field -> raw value mapping.
  /// An alias column that is present but blank falls through to the next alias.
  pub fn resolve<'r, R>(&self, row: &'r R) -> ResolvedRow<'r>
  where
    R: RowAccess + ?Sized,
  {
    let mut values = HashMap::new();
    for (field, columns) in &self.columns {
      let value = columns
        .iter()
        .filter_map(|&idx| row.cell(idx))
        .map(str::trim)
        .find(|v| !v.is_empty());
      if let Some(value) = value {
        values.insert(*field, value);
      }
    }
    ResolvedRow { values }
  }
}

/// Positional access to the cells of a tabular row
pub trait RowAccess {
  fn cell(&self, idx: usize) -> Option<&str>;
}

impl RowAccess for csv::StringRecord {
  fn cell(&self, idx: usize) -> Option<&str> {
    self.get(idx)
  }
}

impl<S: AsRef<str>> RowAccess for [S] {
  fn cell(&self, idx: usize) -> Option<&str> {
    self.get(idx).map(AsRef::as_ref)
  }
}

/// One data row keyed by canonical field
#[derive(Debug, Clone, Default)]
pub struct ResolvedRow<'r> {
  values: HashMap<Field, &'r str>,
}

impl<'r> ResolvedRow<'r> {
  /// Raw trimmed value, or `""` when the column is missing or blank
  pub fn get(&self, field: Field) -> &'r str {
    self.values.get(&field).copied().unwrap_or("")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_normalize_header_variants() {
    assert_eq!(normalize_header("Activity Type"), "activity type");
    assert_eq!(normalize_header("activity_type"), "activity type");
    assert_eq!(normalize_header("  \"Avg HR\" "), "avg hr");
    assert_eq!(normalize_header("'Elev. Gain'"), "elev gain");
    assert_eq!(normalize_header("\u{feff}Activity  Type"), "activity type");
  }

  #[test]
  fn test_every_alias_resolves_to_its_field() {
    for field in Field::ALL {
      for alias in field.aliases() {
        let index = HeaderIndex::new([*alias]);
        let row = vec!["x".to_string()];
        assert_eq!(
          index.resolve(row.as_slice()).get(field),
          "x",
          "alias {:?} did not resolve for {:?}",
          alias,
          field
        );
      }
    }
  }

  #[test]
  fn test_first_alias_wins() {
    let index = HeaderIndex::new(["Avg HR", "avg heart rate"]);
    let row = ["150", "160"];
    assert_eq!(index.resolve(&row[..]).get(Field::AvgHeartRate), "150");
  }

  #[test]
  fn test_blank_alias_falls_through() {
    let index = HeaderIndex::new(["Activity Type", "Type"]);
    let row = ["", "Cycling"];
    assert_eq!(index.resolve(&row[..]).get(Field::ActivityType), "Cycling");
  }

  #[test]
  fn test_missing_columns_resolve_to_empty() {
    let index = HeaderIndex::new(["Date"]);
    assert!(index.has(Field::Date));
    assert!(!index.has(Field::Calories));

    // Short row: the date column itself is missing
    let row: [&str; 0] = [];
    let resolved = index.resolve(&row[..]);
    assert_eq!(resolved.get(Field::Date), "");
    assert_eq!(resolved.get(Field::Calories), "");
  }

  #[test]
  fn test_duplicate_headers_keep_first_column() {
    let index = HeaderIndex::new(["Calories", "calories"]);
    let row = ["500", "900"];
    assert_eq!(index.resolve(&row[..]).get(Field::Calories), "500");
  }
}
