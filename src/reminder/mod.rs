//! Client-side reminder component: a timer-driven state machine that fires
//! on-time or missed notifications against configuration polled from the
//! server. Independent of the HTTP handlers; the embedding frontend owns it.

pub mod clock;
pub mod evaluator;
pub mod marker;
pub mod runner;
pub mod source;

pub use clock::{Clock, SystemClock};
pub use evaluator::{EvaluatorState, Notification, ReminderConfig, ReminderEvaluator};
pub use marker::{FileMarkerStore, MarkerStore, MemoryMarkerStore};
pub use runner::{ReminderCommand, ReminderRunner};
pub use source::{HttpSettingsSource, SettingsSource};
