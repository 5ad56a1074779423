use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::db::sqlite::HabitStorage;
use crate::handlers::{habits, reminders, reports, users};
use crate::service::auth::AuthService;

#[derive(Clone)]
pub struct HabitState {
    pub storage: HabitStorage,
    pub auth: AuthService,
}

impl HabitState {
    pub fn new(storage: HabitStorage) -> Self {
        let auth = AuthService::new(storage.clone());
        Self { storage, auth }
    }
}

pub fn habit_router(state: HabitState) -> Router {
    Router::new()
        .route("/api/users/register", post(users::register))
        .route("/api/users/login", post(users::login))
        .route("/api/habits/", post(habits::create_habit))
        .route("/api/habits/log", post(habits::log_habit))
        .route("/api/habits/{id}", get(habits::list_habits))
        .route("/api/habits/{id}", delete(habits::delete_habit))
        .route("/api/reports/weekly/{userId}", get(reports::weekly_report))
        .route("/api/reports/monthly/{userId}", get(reports::monthly_report))
        .route("/api/reminders/{userId}", get(reminders::get_reminder))
        .route("/api/reminders/{userId}", put(reminders::put_reminder))
        .with_state(state)
}
