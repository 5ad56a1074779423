use crate::db::models::User;
use crate::db::sqlite::HabitStorage;
use crate::error::HabitError;
use tracing::info;
use uuid::Uuid;

/// Outcome of a successful login: the account plus a fresh bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    storage: HabitStorage,
}

impl AuthService {
    pub fn new(storage: HabitStorage) -> Self {
        Self { storage }
    }

    /// Create an account. Empty fields are a validation error; a duplicate
    /// username or email surfaces as a plain store error (the original API
    /// never distinguished duplicates, and we keep that contract).
    ///
    /// Returns the store-assigned row. The system this replaces answered
    /// registration with a random identifier unrelated to the stored primary
    /// key; that was a bug, and here the caller always gets the real id.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, HabitError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(HabitError::validation("All Fields Mandatory"));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
        let user = self
            .storage
            .create_user(username, email, &password_hash)
            .await?;
        info!(user_id = user.id, "registered new user");
        Ok(user)
    }

    /// Verify credentials and issue a session token. Unknown email and wrong
    /// password collapse into one `InvalidCredentials` error so callers
    /// cannot probe for account existence.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, HabitError> {
        let Some(user) = self.storage.user_by_email(email).await? else {
            return Err(HabitError::InvalidCredentials);
        };

        if !bcrypt::verify(password, &user.password_hash)? {
            return Err(HabitError::InvalidCredentials);
        }

        let token = Uuid::new_v4().to_string();
        self.storage.create_session(user.id, &token).await?;
        info!(user_id = user.id, "login ok, session issued");
        Ok(AuthenticatedUser { user, token })
    }

    /// Resolve a bearer token to the user id it was issued for.
    pub async fn verify_token(&self, token: &str) -> Result<i64, HabitError> {
        let session = self
            .storage
            .session_by_token(token)
            .await?
            .ok_or(HabitError::Unauthorized)?;
        Ok(session.user_id)
    }
}
