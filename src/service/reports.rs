use crate::db::models::ReportRow;
use crate::db::sqlite::HabitStorage;
use crate::error::HabitError;
use chrono::{Duration, Local, NaiveDate};

/// Trailing aggregation window, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWindow {
    Weekly,
    Monthly,
}

impl ReportWindow {
    pub fn days(self) -> i64 {
        match self {
            ReportWindow::Weekly => 7,
            ReportWindow::Monthly => 30,
        }
    }

    /// Wire label used in the report response envelope.
    pub fn label(self) -> &'static str {
        match self {
            ReportWindow::Weekly => "weekly",
            ReportWindow::Monthly => "monthly",
        }
    }
}

/// Inclusive lower bound of the window: `today - days`, ISO formatted.
/// A log dated exactly `days` ago still counts; same-day logs always count.
pub fn window_cutoff(today: NaiveDate, days: i64) -> String {
    (today - Duration::days(days)).format("%Y-%m-%d").to_string()
}

/// Run the per-habit completion aggregation for one user, anchored to the
/// local calendar date at call time. No caching; every call recomputes.
pub async fn completion_report(
    storage: &HabitStorage,
    user_id: i64,
    window: ReportWindow,
) -> Result<Vec<ReportRow>, HabitError> {
    let cutoff = window_cutoff(Local::now().date_naive(), window.days());
    storage.completion_report(user_id, &cutoff).await
}
