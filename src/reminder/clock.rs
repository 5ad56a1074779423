use chrono::{Local, NaiveDateTime};

/// Source of the current local date-time, injected so the evaluator can be
/// driven through arbitrary times in tests.
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
