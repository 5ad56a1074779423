use async_trait::async_trait;
use serde::Deserialize;

use crate::error::HabitError;
use crate::reminder::evaluator::ReminderConfig;

/// Where the runner gets reminder configuration from. The production
/// implementation polls the server; tests inject their own.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    /// `Ok(None)` means the user has never saved settings.
    async fn fetch(&self, user_id: i64) -> Result<Option<ReminderConfig>, HabitError>;
}

#[derive(Debug, Deserialize)]
struct ReminderEnvelope {
    data: Option<ReminderConfig>,
}

/// Polls `GET {base_url}/api/reminders/{userId}` with the session's bearer
/// token, the same call the browser client made.
pub struct HttpSettingsSource {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpSettingsSource {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl SettingsSource for HttpSettingsSource {
    async fn fetch(&self, user_id: i64) -> Result<Option<ReminderConfig>, HabitError> {
        let url = format!("{}/api/reminders/{}", self.base_url, user_id);
        let envelope: ReminderEnvelope = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.data)
    }
}
