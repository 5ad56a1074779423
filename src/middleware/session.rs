use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};

use crate::error::HabitError;
use crate::router::HabitState;

/// Pull the bearer token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth = headers.get("authorization")?.to_str().ok()?.trim();
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
}

/// Extractor resolving the request's session token to the user id it was
/// issued for. User-scoped handlers compare this id against the id they
/// operate on; the store-side user id in the path or body is never trusted
/// on its own.
#[derive(Debug, Clone, Copy)]
pub struct SessionUser(pub i64);

impl SessionUser {
    /// Reject the request unless the session belongs to `user_id`.
    pub fn ensure_is(&self, user_id: i64) -> Result<(), HabitError> {
        if self.0 == user_id {
            Ok(())
        } else {
            Err(HabitError::Unauthorized)
        }
    }
}

impl FromRequestParts<HabitState> for SessionUser {
    type Rejection = HabitError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &HabitState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(HabitError::Unauthorized)?;
        let user_id = state.auth.verify_token(token).await?;
        Ok(Self(user_id))
    }
}
