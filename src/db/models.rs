use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account. `password_hash` never leaves the db layer.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Habit {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub name: String,
    pub frequency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct HabitLog {
    pub id: i64,
    #[serde(rename = "habitId")]
    pub habit_id: i64,
    /// Calendar date as `YYYY-MM-DD`; no time component.
    pub date: String,
}

/// One (habit name, completion count) pair from the report aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ReportRow {
    pub name: String,
    pub completions: i64,
}

/// Per-user daily reminder configuration; at most one row per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderSetting {
    /// Time of day, `HH:MM` 24-hour.
    pub time: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub user_id: i64,
    pub token: String,
}
