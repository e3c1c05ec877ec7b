//! Garmin CSV upload flow: parse into a preview, then commit in one write

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use super::CommandError;
use crate::db::{AppState, DbPool};
use crate::garmin::{self, IngestReport};
use crate::models::NewWorkout;

/// ---------------------------------------------------------------------------
/// Preview
/// ---------------------------------------------------------------------------

/// Read an export file and parse it without touching the database
pub fn preview_csv_file(path: &Path) -> Result<IngestReport, CommandError> {
  let text = std::fs::read_to_string(path).map_err(|e| CommandError::Io {
    path: path.display().to_string(),
    message: e.to_string(),
  })?;

  Ok(garmin::ingest(&text))
}

/// ---------------------------------------------------------------------------
/// Bulk Insert
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct UploadResult {
  pub inserted: usize,
}

/// Insert every previewed record in a single transaction.
/// On error nothing is written and the caller's preview is left intact.
pub async fn upload_workouts(
  state: &AppState,
  workouts: &[NewWorkout],
) -> Result<UploadResult, CommandError> {
  if workouts.is_empty() {
    return Ok(UploadResult { inserted: 0 });
  }

  match insert_all(&state.db, workouts).await {
    Ok(inserted) => {
      info!("Uploaded {} workouts", inserted);
      Ok(UploadResult { inserted })
    }
    Err(e) => {
      warn!("Upload of {} workouts failed: {}", workouts.len(), e);
      Err(CommandError::Database(format!(
        "Upload of {} workouts failed: {}",
        workouts.len(),
        e
      )))
    }
  }
}

async fn insert_all(db: &DbPool, workouts: &[NewWorkout]) -> Result<usize, sqlx::Error> {
  let mut tx = db.begin().await?;

  for workout in workouts {
    sqlx::query(
      r#"
      INSERT INTO workouts (
        activity_type, date, duration_seconds, distance_km, avg_pace_per_km,
        avg_heart_rate, max_heart_rate, avg_power, max_power, avg_cadence,
        elevation_gain, calories, notes
      )
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
      "#,
    )
    .bind(&workout.activity_type)
    .bind(workout.date)
    .bind(workout.duration_seconds)
    .bind(workout.distance_km)
    .bind(&workout.avg_pace_per_km)
    .bind(workout.avg_heart_rate)
    .bind(workout.max_heart_rate)
    .bind(workout.avg_power)
    .bind(workout.max_power)
    .bind(workout.avg_cadence)
    .bind(workout.elevation_gain)
    .bind(workout.calories)
    .bind(&workout.notes)
    .execute(&mut *tx)
    .await?;
  }

  tx.commit().await?;
  Ok(workouts.len())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
