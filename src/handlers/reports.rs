use axum::{
    Json,
    extract::{Path, State},
};

use crate::error::HabitError;
use crate::middleware::SessionUser;
use crate::router::HabitState;
use crate::service::reports::{self, ReportWindow};
use crate::types::api::ReportResponse;

async fn report(
    state: &HabitState,
    session: SessionUser,
    user_id: i64,
    window: ReportWindow,
) -> Result<Json<ReportResponse>, HabitError> {
    session.ensure_is(user_id)?;
    let data = reports::completion_report(&state.storage, user_id, window).await?;
    Ok(Json(ReportResponse {
        report: window.label().to_string(),
        data,
    }))
}

/// GET /api/reports/weekly/{userId}
pub async fn weekly_report(
    State(state): State<HabitState>,
    session: SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ReportResponse>, HabitError> {
    report(&state, session, user_id, ReportWindow::Weekly).await
}

/// GET /api/reports/monthly/{userId}
pub async fn monthly_report(
    State(state): State<HabitState>,
    session: SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ReportResponse>, HabitError> {
    report(&state, session, user_id, ReportWindow::Monthly).await
}
