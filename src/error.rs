use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum HabitError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("missing or invalid session token")]
    Unauthorized,

    #[error("{0}")]
    Database(#[from] SqlxError),

    #[error("password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl HabitError {
    pub fn validation(msg: impl Into<String>) -> Self {
        HabitError::Validation(msg.into())
    }
}

/// Wire error body; every error response is `{"error": "..."}`.
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl IntoResponse for HabitError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            HabitError::Validation(_) => StatusCode::BAD_REQUEST,
            HabitError::InvalidCredentials | HabitError::Unauthorized => StatusCode::UNAUTHORIZED,
            HabitError::Database(_) | HabitError::PasswordHash(_) | HabitError::Reqwest(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // Store errors pass their message through verbatim, matching the
        // original API contract: constraint violations are not distinguished
        // from other store failures.
        let body = ApiErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
