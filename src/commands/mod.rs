pub mod plans;
pub mod upload;

use crate::db::AppState;
use crate::models::Workout;
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
  #[error("Database error: {0}")]
  Database(String),

  #[error("Invalid input: {0}")]
  Validation(String),

  #[error("Workout plan {0} not found")]
  NotFound(i64),

  #[error("Failed to read {path}: {message}")]
  Io { path: String, message: String },
}

impl From<sqlx::Error> for CommandError {
  fn from(e: sqlx::Error) -> Self {
    CommandError::Database(e.to_string())
  }
}

impl Serialize for CommandError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Workout Queries
/// ---------------------------------------------------------------------------

const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// Most recent workouts first; `limit` falls back to the configured default
pub async fn get_recent_workouts(
  state: &AppState,
  limit: Option<i64>,
) -> Result<Vec<Workout>, CommandError> {
  let limit = limit.unwrap_or(state.config.recent_limit);

  sqlx::query_as::<_, Workout>("SELECT * FROM workouts ORDER BY date DESC, id DESC LIMIT ?1")
    .bind(limit)
    .fetch_all(&state.db)
    .await
    .map_err(|e| CommandError::Database(format!("Failed to fetch workouts: {}", e)))
}

/// Trainer-side workout search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutFilter {
  /// Case-insensitive substring of the activity type
  pub activity_type: Option<String>,
  pub min_distance_km: Option<f64>,
  pub max_distance_km: Option<f64>,
  pub limit: Option<i64>,
}

pub async fn search_workouts(
  state: &AppState,
  filter: &WorkoutFilter,
) -> Result<Vec<Workout>, CommandError> {
  let activity_pattern = filter
    .activity_type
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| format!("%{}%", s.to_lowercase()));

  // NULL parameters disable their clause
  sqlx::query_as::<_, Workout>(
    r#"
    SELECT * FROM workouts
    WHERE (?1 IS NULL OR LOWER(activity_type) LIKE ?1)
      AND (?2 IS NULL OR distance_km >= ?2)
      AND (?3 IS NULL OR distance_km <= ?3)
    ORDER BY date DESC, id DESC
    LIMIT ?4
    "#,
  )
  .bind(activity_pattern)
  .bind(filter.min_distance_km)
  .bind(filter.max_distance_km)
  .bind(filter.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
  .fetch_all(&state.db)
  .await
  .map_err(|e| CommandError::Database(format!("Failed to search workouts: {}", e)))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
