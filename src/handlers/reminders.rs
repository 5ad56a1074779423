use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveTime;
use tracing::info;

use crate::error::HabitError;
use crate::middleware::SessionUser;
use crate::router::HabitState;
use crate::types::api::{PutReminderRequest, ReminderResponse, ReminderUpdatedResponse};

/// GET /api/reminders/{userId}
///
/// `data` is null when the user has never saved settings.
pub async fn get_reminder(
    State(state): State<HabitState>,
    session: SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ReminderResponse>, HabitError> {
    session.ensure_is(user_id)?;
    let data = state.storage.reminder_for_user(user_id).await?;
    Ok(Json(ReminderResponse { data }))
}

/// PUT /api/reminders/{userId}
///
/// Replace-on-write: the stored row is rewritten wholesale. A missing
/// `enabled` flag saves as disabled.
pub async fn put_reminder(
    State(state): State<HabitState>,
    session: SessionUser,
    Path(user_id): Path<i64>,
    Json(body): Json<PutReminderRequest>,
) -> Result<Json<ReminderUpdatedResponse>, HabitError> {
    session.ensure_is(user_id)?;

    let Some(time) = body.time else {
        return Err(HabitError::validation("time required"));
    };
    // The reminder evaluator depends on HH:MM; reject anything else here.
    if NaiveTime::parse_from_str(&time, "%H:%M").is_err() {
        return Err(HabitError::validation("time must be HH:MM (24-hour)"));
    }
    let enabled = body.enabled.unwrap_or(false);

    state.storage.upsert_reminder(user_id, &time, enabled).await?;
    info!(user_id, %time, enabled, "reminder settings updated");
    Ok(Json(ReminderUpdatedResponse {
        message: "Updated".to_string(),
        user_id,
        time,
        enabled,
    }))
}
