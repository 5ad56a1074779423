//! Per-user "reminder already shown today" markers, the local-storage
//! analogue of the browser client this replaces. One date string per user.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub trait MarkerStore {
    /// Calendar date (`YYYY-MM-DD`) a notification was last shown, if any.
    fn last_shown(&self, user_id: i64) -> Option<String>;
    fn record_shown(&mut self, user_id: i64, date: &str);
    fn clear(&mut self, user_id: i64);
}

#[derive(Debug, Default)]
pub struct MemoryMarkerStore {
    shown: HashMap<i64, String>,
}

impl MarkerStore for MemoryMarkerStore {
    fn last_shown(&self, user_id: i64) -> Option<String> {
        self.shown.get(&user_id).cloned()
    }

    fn record_shown(&mut self, user_id: i64, date: &str) {
        self.shown.insert(user_id, date.to_string());
    }

    fn clear(&mut self, user_id: i64) {
        self.shown.remove(&user_id);
    }
}

/// Marker map persisted as a small JSON file, surviving process restarts the
/// way browser local storage survives page reloads. Write failures are
/// logged and the in-memory view stays authoritative for the session.
#[derive(Debug)]
pub struct FileMarkerStore {
    path: PathBuf,
    shown: HashMap<i64, String>,
}

impl FileMarkerStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let shown = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "marker file unreadable; starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self { path, shown }
    }

    fn persist(&self) {
        match serde_json::to_string(&self.shown) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!(path = %self.path.display(), error = %e, "failed to persist markers");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize markers"),
        }
    }
}

impl MarkerStore for FileMarkerStore {
    fn last_shown(&self, user_id: i64) -> Option<String> {
        self.shown.get(&user_id).cloned()
    }

    fn record_shown(&mut self, user_id: i64, date: &str) {
        self.shown.insert(user_id, date.to_string());
        self.persist();
    }

    fn clear(&mut self, user_id: i64) {
        self.shown.remove(&user_id);
        self.persist();
    }
}
