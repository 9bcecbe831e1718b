use std::time::Duration;

use chrono::{DateTime, Local};

use crate::detection::domain::detection::Detection;

/// Finds the first unknown face in the snapshot seen within `window` of `now`.
///
/// The whole snapshot is scanned, not just the newest entry.
pub fn find_recent_unknown(
    detections: &[Detection],
    now: DateTime<Local>,
    window: Duration,
) -> Option<&Detection> {
    detections
        .iter()
        .find(|d| d.is_unknown() && d.is_recent(now, window))
}
