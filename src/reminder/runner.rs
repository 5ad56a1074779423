//! Timer-driven reminder task.
//!
//! One cooperative task per user merges three inputs with `select!`: a
//! 1-second evaluation tick, a 30-second configuration poll, and a command
//! channel from the embedding UI. Fetch failures are logged and swallowed;
//! the evaluator keeps running on the last good configuration, or stays
//! dormant if none was ever fetched. Because the task owns the evaluator,
//! shutdown drops any in-flight fetch before it can touch state.

use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::reminder::clock::Clock;
use crate::reminder::evaluator::{Notification, ReminderEvaluator};
use crate::reminder::marker::MarkerStore;
use crate::reminder::source::SettingsSource;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Commands from the embedding UI.
#[derive(Debug)]
pub enum ReminderCommand {
    /// The user edited settings in-process; re-fetch immediately and allow
    /// an immediate re-fire against the new configuration.
    SettingsChanged,
    /// The user dismissed the shown notification.
    Dismiss,
}

pub struct ReminderRunner<C, M, S>
where
    C: Clock,
    M: MarkerStore + Send,
    S: SettingsSource,
{
    user_id: i64,
    evaluator: ReminderEvaluator<M>,
    clock: C,
    source: S,
}

impl<C, M, S> ReminderRunner<C, M, S>
where
    C: Clock,
    M: MarkerStore + Send,
    S: SettingsSource,
{
    pub fn new(user_id: i64, markers: M, clock: C, source: S) -> Self {
        Self {
            user_id,
            evaluator: ReminderEvaluator::new(user_id, markers),
            clock,
            source,
        }
    }

    /// Run until `shutdown` resolves. Fired notifications go out on
    /// `notifications`; a closed receiver there is treated as teardown.
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<ReminderCommand>,
        notifications: mpsc::UnboundedSender<Notification>,
        mut shutdown: oneshot::Receiver<()>,
    ) {
        let mut tick = interval(TICK_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // fires immediately on first poll, so a configured reminder is live
        // as soon as the task starts
        let mut refresh = interval(REFRESH_INTERVAL);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(user_id = self.user_id, "reminder runner started");
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(user_id = self.user_id, "reminder runner stopped");
                    break;
                }
                _ = refresh.tick() => {
                    self.poll_settings().await;
                }
                _ = tick.tick() => {
                    if let Some(notification) = self.evaluator.tick(self.clock.now()) {
                        debug!(user_id = self.user_id, ?notification, "notification fired");
                        if notifications.send(notification).is_err() {
                            break;
                        }
                    }
                }
                Some(cmd) = commands.recv() => match cmd {
                    ReminderCommand::SettingsChanged => self.settings_changed().await,
                    ReminderCommand::Dismiss => {
                        self.evaluator.dismiss(self.clock.now().date());
                    }
                },
            }
        }
    }

    /// Ordinary 30-second poll; keeps the already-shown marker.
    async fn poll_settings(&mut self) {
        match self.source.fetch(self.user_id).await {
            Ok(config) => self.evaluator.update_config(config),
            Err(e) => {
                warn!(user_id = self.user_id, error = %e, "settings fetch failed; keeping last configuration");
            }
        }
    }

    /// In-process settings edit; clears the marker so the new configuration
    /// can fire immediately.
    async fn settings_changed(&mut self) {
        match self.source.fetch(self.user_id).await {
            Ok(config) => self.evaluator.apply_edited_config(config),
            Err(e) => {
                warn!(user_id = self.user_id, error = %e, "settings fetch failed after edit; keeping last configuration");
            }
        }
    }
}
