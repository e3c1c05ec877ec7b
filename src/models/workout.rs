use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A stored workout row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workout {
  pub id: i64,
  pub activity_type: String,
  pub date: NaiveDate,
  pub duration_seconds: Option<i64>,
  pub distance_km: Option<f64>,
  pub avg_pace_per_km: Option<String>,
  pub avg_heart_rate: Option<i64>,
  pub max_heart_rate: Option<i64>,
  pub avg_power: Option<i64>,
  pub max_power: Option<i64>,
  pub avg_cadence: Option<i64>,
  pub elevation_gain: Option<i64>,
  pub calories: Option<i64>,
  pub notes: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

/// For inserting new workouts (without id, created_at).
/// This is the record shape produced by the Garmin CSV ingestor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
  pub activity_type: String,
  pub date: NaiveDate,
  pub duration_seconds: Option<i64>,
  pub distance_km: Option<f64>,
  pub avg_pace_per_km: Option<String>,
  pub avg_heart_rate: Option<i64>,
  pub max_heart_rate: Option<i64>,
  pub avg_power: Option<i64>,
  pub max_power: Option<i64>,
  pub avg_cadence: Option<i64>,
  pub elevation_gain: Option<i64>,
  pub calories: Option<i64>,
  pub notes: Option<String>,
}

impl NewWorkout {
  /// A record with only the gating date set; everything else absent
  pub fn on_date(date: NaiveDate) -> Self {
    Self {
      activity_type: super::UNKNOWN_ACTIVITY.to_string(),
      date,
      duration_seconds: None,
      distance_km: None,
      avg_pace_per_km: None,
      avg_heart_rate: None,
      max_heart_rate: None,
      avg_power: None,
      max_power: None,
      avg_cadence: None,
      elevation_gain: None,
      calories: None,
      notes: None,
    }
  }
}
