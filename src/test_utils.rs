//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seed data for workouts and plans
//! - Mock data factories

use crate::config::AppConfig;
use crate::db::AppState;
use crate::models::{NewWorkout, NewWorkoutPlan};
use chrono::{Duration, Local, NaiveDate};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// In-memory database wrapped in application state with default config
pub async fn setup_test_state() -> AppState {
  AppState {
    db: setup_test_db().await,
    config: AppConfig::default(),
  }
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed the database with test workouts, one per day going back from today.
/// Even rows are 10 km runs, odd rows 40 km rides.
/// Returns the IDs of created workouts
pub async fn seed_test_workouts(pool: &SqlitePool, count: usize) -> Vec<i64> {
  let mut workout_ids = Vec::new();

  for i in 0..count {
    let is_run = i % 2 == 0;
    let (activity_type, distance, duration) = if is_run {
      ("Running", 10.0, 3000)
    } else {
      ("Cycling", 40.0, 5400)
    };

    let result = sqlx::query(
      r#"
      INSERT INTO workouts (
        activity_type, date, duration_seconds, distance_km, avg_heart_rate
      )
      VALUES (?1, ?2, ?3, ?4, ?5)
      "#,
    )
    .bind(activity_type)
    .bind(date_days_from_today(-(i as i64)))
    .bind(duration)
    .bind(distance)
    .bind(140 + (i % 20) as i64)
    .execute(pool)
    .await
    .expect("Failed to insert test workout");

    workout_ids.push(result.last_insert_rowid());
  }

  workout_ids
}

/// Seed three plans: one last week, one today, one next week
pub async fn seed_test_plans(pool: &SqlitePool) -> Vec<i64> {
  let plans = [
    ("Easy Run", -7, "Z2"),
    ("Threshold Intervals", 0, "Z4"),
    ("Long Run", 7, "Z2"),
  ];

  let mut ids = Vec::new();
  for (title, offset, zone) in plans {
    let result = sqlx::query(
      r#"
      INSERT INTO workout_plans (title, scheduled_date, workout_type, target_hr_zone)
      VALUES (?1, ?2, 'Running', ?3)
      "#,
    )
    .bind(title)
    .bind(date_days_from_today(offset))
    .bind(zone)
    .execute(pool)
    .await
    .expect("Failed to seed plan");

    ids.push(result.last_insert_rowid());
  }

  ids
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_new_workout(activity_type: &str, days_ago: i64) -> NewWorkout {
  NewWorkout {
    activity_type: activity_type.to_string(),
    duration_seconds: Some(3600),
    distance_km: Some(10.0),
    avg_pace_per_km: Some("6:00".to_string()),
    avg_heart_rate: Some(145),
    max_heart_rate: Some(165),
    ..NewWorkout::on_date(date_days_from_today(-days_ago))
  }
}

pub fn mock_new_plan(title: &str, scheduled_date: NaiveDate) -> NewWorkoutPlan {
  NewWorkoutPlan {
    title: title.to_string(),
    description: Some("  ".to_string()),
    scheduled_date,
    workout_type: Some("Running".to_string()),
    target_distance_km: Some(8.0),
    target_pace: None,
    target_hr_zone: Some("Z2".to_string()),
    notes: None,
  }
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Local calendar date offset from today (negative for the past)
pub fn date_days_from_today(days: i64) -> NaiveDate {
  Local::now().date_naive() + Duration::days(days)
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('workouts', 'workout_plans')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 2, "Expected 2 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_workouts_returns_correct_count() {
    let pool = setup_test_db().await;

    let ids = seed_test_workouts(&pool, 5).await;
    assert_eq!(ids.len(), 5);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workouts")
      .fetch_one(&pool)
      .await
      .expect("Failed to count workouts");

    assert_eq!(count, 5);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let workout = mock_new_workout("Running", 1);
    assert_eq!(workout.activity_type, "Running");
    assert!(workout.duration_seconds.is_some());
    assert_eq!(workout.notes, None);

    let plan = mock_new_plan("Tempo", date_days_from_today(0));
    assert_eq!(plan.title, "Tempo");
  }
}
