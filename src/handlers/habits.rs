use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use tracing::info;

use crate::db::models::{Habit, HabitLog};
use crate::error::HabitError;
use crate::middleware::SessionUser;
use crate::router::HabitState;
use crate::types::api::{CreateHabitRequest, DeleteHabitResponse, HabitListResponse, LogHabitRequest};

/// GET /api/habits/{userId}
pub async fn list_habits(
    State(state): State<HabitState>,
    session: SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<HabitListResponse>, HabitError> {
    session.ensure_is(user_id)?;
    let data = state.storage.habits_for_user(user_id).await?;
    Ok(Json(HabitListResponse { data }))
}

/// POST /api/habits/
pub async fn create_habit(
    State(state): State<HabitState>,
    session: SessionUser,
    Json(body): Json<CreateHabitRequest>,
) -> Result<Json<Habit>, HabitError> {
    let (Some(user_id), Some(name), Some(frequency)) = (body.user_id, body.name, body.frequency)
    else {
        return Err(HabitError::validation("userId, name, and frequency required"));
    };
    if name.is_empty() || frequency.is_empty() {
        return Err(HabitError::validation("userId, name, and frequency required"));
    }
    session.ensure_is(user_id)?;

    let habit = state.storage.create_habit(user_id, &name, &frequency).await?;
    info!(user_id, habit_id = habit.id, "habit created");
    Ok(Json(habit))
}

/// DELETE /api/habits/{id}
///
/// The cascade removes the habit's logs. An unknown id reports
/// `changes: 0` rather than an error, as the original API did.
pub async fn delete_habit(
    State(state): State<HabitState>,
    session: SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteHabitResponse>, HabitError> {
    if let Some(habit) = state.storage.habit_by_id(id).await? {
        session.ensure_is(habit.user_id)?;
    }
    let changes = state.storage.delete_habit(id).await?;
    info!(habit_id = id, changes, "habit deleted");
    Ok(Json(DeleteHabitResponse {
        message: "Deleted".to_string(),
        changes,
    }))
}

/// POST /api/habits/log
///
/// Append-only: logging the same habit twice on one date creates two rows,
/// and both count toward reports.
pub async fn log_habit(
    State(state): State<HabitState>,
    session: SessionUser,
    Json(body): Json<LogHabitRequest>,
) -> Result<Json<HabitLog>, HabitError> {
    let (Some(habit_id), Some(date)) = (body.habit_id, body.date) else {
        return Err(HabitError::validation("habitId and date required"));
    };
    if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        return Err(HabitError::validation("date must be YYYY-MM-DD"));
    }
    // Unknown habit ids fall through to the insert, where the foreign key
    // rejects them as a store error.
    if let Some(habit) = state.storage.habit_by_id(habit_id).await? {
        session.ensure_is(habit.user_id)?;
    }

    let log = state.storage.insert_log(habit_id, &date).await?;
    Ok(Json(log))
}
