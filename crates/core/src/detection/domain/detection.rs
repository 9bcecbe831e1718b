use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::shared::constants::{DETECTION_TIME_FORMAT, UNKNOWN_NAME};

/// One sighting reported by the recognition backend.
///
/// `time` is kept verbatim so it can be displayed exactly as the backend
/// sent it; [`Detection::timestamp`] parses it on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub name: String,
    pub time: String,
}

impl Detection {
    pub fn new(name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: time.into(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_NAME
    }

    /// Parses `time` as the backend's local-time layout, falling back to
    /// RFC 3339. Returns `None` for anything else.
    pub fn timestamp(&self) -> Option<DateTime<Local>> {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&self.time, DETECTION_TIME_FORMAT) {
            return Local.from_local_datetime(&naive).earliest();
        }
        DateTime::parse_from_rfc3339(&self.time)
            .ok()
            .map(|dt| dt.with_timezone(&Local))
    }

    /// True when the sighting happened less than `window` before `now`.
    ///
    /// Timestamps in the future count as recent; unparseable ones never do.
    pub fn is_recent(&self, now: DateTime<Local>, window: Duration) -> bool {
        let Some(seen_at) = self.timestamp() else {
            return false;
        };
        let age = now.signed_duration_since(seen_at);
        chrono::Duration::from_std(window)
            .map(|limit| age < limit)
            .unwrap_or(true)
    }
}
