use axum::{Json, extract::State};

use crate::error::HabitError;
use crate::router::HabitState;
use crate::types::api::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};

/// POST /api/users/register
pub async fn register(
    State(state): State<HabitState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, HabitError> {
    let username = body.username.unwrap_or_default();
    let email = body.email.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let user = state.auth.register(&username, &email, &password).await?;
    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
    }))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<HabitState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HabitError> {
    let email = body.email.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let authed = state.auth.login(&email, &password).await?;
    Ok(Json(LoginResponse {
        id: authed.user.id,
        username: authed.user.username,
        email: authed.user.email,
        token: authed.token,
    }))
}
