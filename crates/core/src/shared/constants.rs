use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

pub const START_CAMERA_PATH: &str = "/start_camera";
pub const STOP_CAMERA_PATH: &str = "/stop_camera";
pub const DETECTIONS_PATH: &str = "/get_detections";
pub const ADD_FACE_PATH: &str = "/add_face";
pub const KNOWN_PEOPLE_PATH: &str = "/get_known_people";
pub const VIDEO_FEED_PATH: &str = "/video_feed";

/// Status strings the backend returns from the camera endpoints.
pub const CAMERA_STARTED_STATUS: &str = "camera started";
pub const CAMERA_STOPPED_STATUS: &str = "camera stopped";

/// Name the backend reports for a face it could not match.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Timestamp layout used by the backend (local time, no offset).
pub const DETECTION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// An unknown face older than this no longer raises the alert.
pub const RECENT_UNKNOWN_WINDOW: Duration = Duration::from_secs(10);

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);
