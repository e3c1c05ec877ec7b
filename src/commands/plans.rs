//! Training plan CRUD for the trainer view

use chrono::NaiveDate;
use tracing::info;

use super::CommandError;
use crate::db::AppState;
use crate::models::{NewWorkoutPlan, WorkoutPlan, WorkoutPlanUpdate};

/// All plans, earliest first
pub async fn get_plans(state: &AppState) -> Result<Vec<WorkoutPlan>, CommandError> {
    sqlx::query_as::<_, WorkoutPlan>(
        "SELECT * FROM workout_plans ORDER BY scheduled_date ASC, id ASC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| CommandError::Database(format!("Failed to fetch plans: {}", e)))
}

/// Plans scheduled on or after `today`, earliest first
pub async fn get_upcoming_plans(
    state: &AppState,
    today: NaiveDate,
) -> Result<Vec<WorkoutPlan>, CommandError> {
    sqlx::query_as::<_, WorkoutPlan>(
        "SELECT * FROM workout_plans WHERE scheduled_date >= ?1
         ORDER BY scheduled_date ASC, id ASC",
    )
    .bind(today)
    .fetch_all(&state.db)
    .await
    .map_err(|e| CommandError::Database(format!("Failed to fetch upcoming plans: {}", e)))
}

pub async fn get_plan(state: &AppState, id: i64) -> Result<WorkoutPlan, CommandError> {
    sqlx::query_as::<_, WorkoutPlan>("SELECT * FROM workout_plans WHERE id = ?1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(CommandError::NotFound(id))
}

/// Create a plan; the title is required, blank optional text is stored as NULL
pub async fn create_plan(
    state: &AppState,
    plan: NewWorkoutPlan,
) -> Result<WorkoutPlan, CommandError> {
    let title = plan.title.trim();
    if title.is_empty() {
        return Err(CommandError::Validation("plan title is required".into()));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO workout_plans (
            title, description, scheduled_date, workout_type,
            target_distance_km, target_pace, target_hr_zone, notes
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(title)
    .bind(non_blank(plan.description))
    .bind(plan.scheduled_date)
    .bind(non_blank(plan.workout_type))
    .bind(plan.target_distance_km)
    .bind(non_blank(plan.target_pace))
    .bind(non_blank(plan.target_hr_zone))
    .bind(non_blank(plan.notes))
    .execute(&state.db)
    .await
    .map_err(|e| CommandError::Database(format!("Failed to create plan: {}", e)))?;

    let id = result.last_insert_rowid();
    info!("Created plan {} '{}' for {}", id, title, plan.scheduled_date);
    get_plan(state, id).await
}

/// Apply a partial update and bump `updated_at`
pub async fn update_plan(
    state: &AppState,
    id: i64,
    update: WorkoutPlanUpdate,
) -> Result<WorkoutPlan, CommandError> {
    if update.is_empty() {
        return get_plan(state, id).await;
    }

    let title = match update.title {
        Some(t) if t.trim().is_empty() => {
            return Err(CommandError::Validation("plan title cannot be blank".into()))
        }
        Some(t) => Some(t.trim().to_string()),
        None => None,
    };

    let result = sqlx::query(
        r#"
        UPDATE workout_plans SET
            title = COALESCE(?1, title),
            description = COALESCE(?2, description),
            scheduled_date = COALESCE(?3, scheduled_date),
            workout_type = COALESCE(?4, workout_type),
            target_distance_km = COALESCE(?5, target_distance_km),
            target_pace = COALESCE(?6, target_pace),
            target_hr_zone = COALESCE(?7, target_hr_zone),
            notes = COALESCE(?8, notes),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?9
        "#,
    )
    .bind(title)
    .bind(update.description)
    .bind(update.scheduled_date)
    .bind(update.workout_type)
    .bind(update.target_distance_km)
    .bind(update.target_pace)
    .bind(update.target_hr_zone)
    .bind(update.notes)
    .bind(id)
    .execute(&state.db)
    .await
    .map_err(|e| CommandError::Database(format!("Failed to update plan: {}", e)))?;

    if result.rows_affected() == 0 {
        return Err(CommandError::NotFound(id));
    }

    get_plan(state, id).await
}

pub async fn delete_plan(state: &AppState, id: i64) -> Result<(), CommandError> {
    let result = sqlx::query("DELETE FROM workout_plans WHERE id = ?1")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(|e| CommandError::Database(format!("Failed to delete plan: {}", e)))?;

    if result.rows_affected() == 0 {
        return Err(CommandError::NotFound(id));
    }

    info!("Deleted plan {}", id);
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
