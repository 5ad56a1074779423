use crate::db::models::{Habit, HabitLog, ReminderSetting, ReportRow, Session, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::HabitError;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct HabitStorage {
    pool: SqlitePool,
}

/// Open (creating if missing) the SQLite database at `url` and initialize
/// the schema. Foreign keys are enabled explicitly; cascades depend on it.
pub async fn connect(url: &str) -> Result<HabitStorage, HabitError> {
    let connect_opts = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    let storage = HabitStorage::new(pool);
    storage.init_schema().await?;
    Ok(storage)
}

impl HabitStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), HabitError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ---- users ----

    /// Insert a new user; username/email uniqueness violations surface as
    /// plain store errors. Returns the stored row with its assigned id.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, HabitError> {
        let res = sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(User {
            id: res.last_insert_rowid(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, HabitError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn delete_user(&self, id: i64) -> Result<u64, HabitError> {
        let res = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    // ---- habits ----

    pub async fn habits_for_user(&self, user_id: i64) -> Result<Vec<Habit>, HabitError> {
        let rows = sqlx::query_as::<_, Habit>(
            "SELECT id, user_id, name, frequency FROM habits WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_habit(
        &self,
        user_id: i64,
        name: &str,
        frequency: &str,
    ) -> Result<Habit, HabitError> {
        let res = sqlx::query("INSERT INTO habits (user_id, name, frequency) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(name)
            .bind(frequency)
            .execute(&self.pool)
            .await?;
        Ok(Habit {
            id: res.last_insert_rowid(),
            user_id,
            name: name.to_string(),
            frequency: frequency.to_string(),
        })
    }

    pub async fn habit_by_id(&self, id: i64) -> Result<Option<Habit>, HabitError> {
        let habit = sqlx::query_as::<_, Habit>(
            "SELECT id, user_id, name, frequency FROM habits WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(habit)
    }

    /// Delete a habit; its logs go with it via the cascade. Returns the
    /// number of habit rows removed (0 when the id was unknown).
    pub async fn delete_habit(&self, id: i64) -> Result<u64, HabitError> {
        let res = sqlx::query("DELETE FROM habits WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    // ---- habit logs ----

    /// Append one completion event. No uniqueness constraint: the same
    /// habit+date may be logged repeatedly and every entry counts.
    pub async fn insert_log(&self, habit_id: i64, date: &str) -> Result<HabitLog, HabitError> {
        let res = sqlx::query("INSERT INTO habit_logs (habit_id, date) VALUES (?, ?)")
            .bind(habit_id)
            .bind(date)
            .execute(&self.pool)
            .await?;
        Ok(HabitLog {
            id: res.last_insert_rowid(),
            habit_id,
            date: date.to_string(),
        })
    }

    pub async fn logs_for_habit(&self, habit_id: i64) -> Result<Vec<HabitLog>, HabitError> {
        let rows = sqlx::query_as::<_, HabitLog>(
            "SELECT id, habit_id, date FROM habit_logs WHERE habit_id = ?",
        )
        .bind(habit_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---- report aggregation ----

    /// Per-habit completion counts for one user since `cutoff` (inclusive,
    /// `YYYY-MM-DD`). Habits drive the join, so zero-completion habits show
    /// up with count 0. Date comparison is lexicographic on ISO dates.
    /// Recomputed on every call; O(habits x logs-in-window) is fine at
    /// personal-tracker volume.
    pub async fn completion_report(
        &self,
        user_id: i64,
        cutoff: &str,
    ) -> Result<Vec<ReportRow>, HabitError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT h.name, COUNT(l.id) AS completions
            FROM habits h
            LEFT JOIN habit_logs l ON h.id = l.habit_id AND l.date >= ?
            WHERE h.user_id = ?
            GROUP BY h.id
            "#,
        )
        .bind(cutoff)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---- reminder settings ----

    pub async fn reminder_for_user(
        &self,
        user_id: i64,
    ) -> Result<Option<ReminderSetting>, HabitError> {
        let row = sqlx::query("SELECT time, enabled FROM reminder_settings WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::row_to_reminder).transpose()
    }

    /// Replace-on-write upsert: the whole row is rewritten, no merge.
    /// Concurrent updates collapse to last-write-wins.
    pub async fn upsert_reminder(
        &self,
        user_id: i64,
        time: &str,
        enabled: bool,
    ) -> Result<(), HabitError> {
        sqlx::query(
            "INSERT OR REPLACE INTO reminder_settings (user_id, time, enabled) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(time)
        .bind(if enabled { 1 } else { 0 })
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ---- sessions ----

    pub async fn create_session(&self, user_id: i64, token: &str) -> Result<(), HabitError> {
        sqlx::query("INSERT INTO sessions (user_id, token, created_at) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(token)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn session_by_token(&self, token: &str) -> Result<Option<Session>, HabitError> {
        let session =
            sqlx::query_as::<_, Session>("SELECT user_id, token FROM sessions WHERE token = ?")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        Ok(session)
    }

    fn row_to_reminder(row: SqliteRow) -> Result<ReminderSetting, HabitError> {
        let time: String = row.try_get("time")?;
        let enabled_i: i64 = row.try_get("enabled")?;
        // enabled normalizes to a real boolean on the way out
        Ok(ReminderSetting {
            time,
            enabled: enabled_i != 0,
        })
    }
}
