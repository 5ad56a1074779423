//! Daily-reminder state machine.
//!
//! One evaluator instance tracks one user. It is driven by periodic ticks
//! carrying the current local time and decides whether to fire an on-time or
//! missed notification, suppressing repeats within the same calendar day via
//! a persisted per-day marker. Clock and marker persistence are injected so
//! the time matching is testable without wall-clock waits.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::reminder::marker::MarkerStore;

/// Minutes past the configured time before a reminder counts as missed.
pub const GRACE_MINUTES: u32 = 5;

/// Reminder configuration as fetched from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Time of day, `HH:MM` 24-hour.
    pub time: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Fired when the current minute equals the configured time.
    OnTime { time: String },
    /// Fired when the configured time passed more than the grace period ago
    /// without a notification having been shown today.
    Missed { time: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluatorState {
    Idle,
    OnTimeShown,
    MissedShown,
}

pub struct ReminderEvaluator<M: MarkerStore> {
    user_id: i64,
    config: Option<ReminderConfig>,
    state: EvaluatorState,
    markers: M,
}

impl<M: MarkerStore> ReminderEvaluator<M> {
    pub fn new(user_id: i64, markers: M) -> Self {
        Self {
            user_id,
            config: None,
            state: EvaluatorState::Idle,
            markers,
        }
    }

    pub fn state(&self) -> EvaluatorState {
        self.state
    }

    pub fn config(&self) -> Option<&ReminderConfig> {
        self.config.as_ref()
    }

    /// Replace the configuration from an ordinary background poll. The
    /// already-shown-today marker is kept, so a poll never re-arms a
    /// reminder that already fired.
    pub fn update_config(&mut self, config: Option<ReminderConfig>) {
        self.config = config;
    }

    /// Apply a configuration the user just edited. Clears today's marker and
    /// resets to idle so the new time can fire immediately.
    pub fn apply_edited_config(&mut self, config: Option<ReminderConfig>) {
        self.config = config;
        self.markers.clear(self.user_id);
        self.state = EvaluatorState::Idle;
    }

    /// Acknowledge the currently shown notification and return to idle.
    /// Re-records today's marker; firing already recorded it, so this is
    /// idempotent.
    pub fn dismiss(&mut self, today: NaiveDate) {
        self.markers.record_shown(self.user_id, &iso_date(today));
        self.state = EvaluatorState::Idle;
    }

    /// One evaluation step at local time `now`. At most one notification
    /// fires per calendar day.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<Notification> {
        if self.state != EvaluatorState::Idle {
            return None;
        }
        let cfg = self.config.as_ref()?;
        if !cfg.enabled {
            return None;
        }
        let Some(cfg_minutes) = minutes_since_midnight(&cfg.time) else {
            warn!(user_id = self.user_id, time = %cfg.time, "unparseable reminder time; ignoring");
            return None;
        };

        let today = iso_date(now.date());
        if self.markers.last_shown(self.user_id).as_deref() == Some(today.as_str()) {
            return None;
        }

        // Exact match is on the formatted minute; the missed check uses
        // minutes-since-midnight arithmetic so hour rollovers compare
        // correctly.
        let now_hhmm = now.format("%H:%M").to_string();
        if now_hhmm == cfg.time {
            self.markers.record_shown(self.user_id, &today);
            self.state = EvaluatorState::OnTimeShown;
            return Some(Notification::OnTime {
                time: cfg.time.clone(),
            });
        }

        let now_minutes = now.hour() * 60 + now.minute();
        if now_minutes > cfg_minutes + GRACE_MINUTES {
            self.markers.record_shown(self.user_id, &today);
            self.state = EvaluatorState::MissedShown;
            return Some(Notification::Missed {
                time: cfg.time.clone(),
            });
        }

        None
    }
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn minutes_since_midnight(hhmm: &str) -> Option<u32> {
    let (h, m) = hhmm.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}
