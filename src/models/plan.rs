use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutPlan {
  pub id: i64,
  pub title: String,
  pub description: Option<String>,
  pub scheduled_date: NaiveDate,
  pub workout_type: Option<String>,
  pub target_distance_km: Option<f64>,
  pub target_pace: Option<String>,
  pub target_hr_zone: Option<String>,
  pub notes: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}

/// For inserting new plans (without id, timestamps)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewWorkoutPlan {
  pub title: String,
  pub description: Option<String>,
  pub scheduled_date: NaiveDate,
  pub workout_type: Option<String>,
  pub target_distance_km: Option<f64>,
  pub target_pace: Option<String>,
  pub target_hr_zone: Option<String>,
  pub notes: Option<String>,
}

/// Partial update: `None` leaves the stored column untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutPlanUpdate {
  pub title: Option<String>,
  pub description: Option<String>,
  pub scheduled_date: Option<NaiveDate>,
  pub workout_type: Option<String>,
  pub target_distance_km: Option<f64>,
  pub target_pace: Option<String>,
  pub target_hr_zone: Option<String>,
  pub notes: Option<String>,
}

impl WorkoutPlanUpdate {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.description.is_none()
      && self.scheduled_date.is_none()
      && self.workout_type.is_none()
      && self.target_distance_km.is_none()
      && self.target_pace.is_none()
      && self.target_hr_zone.is_none()
      && self.notes.is_none()
  }
}
