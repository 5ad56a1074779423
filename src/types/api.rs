//! Wire types for the HTTP/JSON surface. Field names stay camelCase to
//! match the API this service replaces.

use crate::db::models::{Habit, ReminderSetting, ReportRow};
use serde::{Deserialize, Serialize};

// ---- requests ----

/// Bodies deserialize with every field optional so a missing field becomes a
/// 400 validation error from the handler, not a deserializer rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    #[serde(default, rename = "userId")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogHabitRequest {
    #[serde(default, rename = "habitId")]
    pub habit_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PutReminderRequest {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

// ---- responses ----

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Server-issued session token; send back as `Authorization: Bearer`.
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitListResponse {
    pub data: Vec<Habit>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteHabitResponse {
    pub message: String,
    pub changes: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report: String,
    pub data: Vec<ReportRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReminderResponse {
    pub data: Option<ReminderSetting>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReminderUpdatedResponse {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub time: String,
    pub enabled: bool,
}
