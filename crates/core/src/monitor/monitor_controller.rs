use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::backend::domain::backend_error::BackendError;
use crate::backend::domain::recognition_backend::{NewFace, StatusResponse};
use crate::detection::domain::detection::Detection;
use crate::detection::domain::detection_list::DetectionList;
use crate::detection::domain::unknown_face_check::find_recent_unknown;
use crate::monitor::notification::{NotificationKind, NotificationQueue};
use crate::monitor::page_state::PageState;
use crate::shared::constants::{CAMERA_STARTED_STATUS, CAMERA_STOPPED_STATUS};
use crate::shared::monitor_config::MonitorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorState {
    /// Mirrors the backend's camera state as last confirmed by it.
    pub camera_on: bool,
    /// An unknown-face alert is on screen and has not been resolved by a save.
    pub unknown_pending: bool,
}

/// What a start/stop answer did to the camera state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraOutcome {
    Changed,
    /// The backend answered with a status string other than the expected
    /// one; nothing changed and no notification was shown.
    Unexpected(String),
    /// Transport or decode failure, already reported as an error.
    Failed,
}

/// State machine behind the monitoring page.
///
/// Performs no I/O. Callers run the backend request themselves and feed
/// the outcome into the matching `*_finished` / `*_fetched` method, which
/// keeps the two flags, the page model and the notifications consistent.
pub struct MonitorController {
    state: MonitorState,
    page: PageState,
    notifications: NotificationQueue,
    recent_window: Duration,
}

impl MonitorController {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            state: MonitorState::default(),
            page: PageState::default(),
            notifications: NotificationQueue::new(config.notification_ttl),
            recent_window: config.recent_window,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let message = message.into();
        log::debug!("notify [{kind}] {message}");
        self.notifications.push(kind, message);
    }

    pub fn dismiss_notification(&mut self, id: u64) {
        self.notifications.dismiss(id);
    }

    pub fn expire_notifications(&mut self, now: Instant) -> usize {
        self.notifications.expire(now)
    }

    // --- Camera ---

    pub fn camera_start_finished(
        &mut self,
        result: Result<StatusResponse, BackendError>,
    ) -> CameraOutcome {
        match result {
            Ok(response) if response.status == CAMERA_STARTED_STATUS => {
                log::info!("Camera started");
                self.state.camera_on = true;
                self.page.show_camera_running(true);
                self.notify(NotificationKind::Success, "Camera started successfully!");
                CameraOutcome::Changed
            }
            Ok(response) => {
                log::warn!("Unexpected start_camera status: {}", response.status);
                CameraOutcome::Unexpected(response.status)
            }
            Err(e) => {
                self.notify(NotificationKind::Error, format!("Error starting camera: {e}"));
                CameraOutcome::Failed
            }
        }
    }

    pub fn camera_stop_finished(
        &mut self,
        result: Result<StatusResponse, BackendError>,
    ) -> CameraOutcome {
        match result {
            Ok(response) if response.status == CAMERA_STOPPED_STATUS => {
                log::info!("Camera stopped");
                self.state.camera_on = false;
                self.page.show_camera_running(false);
                self.notify(NotificationKind::Info, "Camera stopped");
                CameraOutcome::Changed
            }
            Ok(response) => {
                log::warn!("Unexpected stop_camera status: {}", response.status);
                CameraOutcome::Unexpected(response.status)
            }
            Err(e) => {
                self.notify(NotificationKind::Error, format!("Error stopping camera: {e}"));
                CameraOutcome::Failed
            }
        }
    }

    // --- Polling ---

    /// Whether a poll tick should fetch. Ticks keep firing while the camera
    /// is off; they simply do nothing.
    pub fn poll_due(&self) -> bool {
        self.state.camera_on
    }

    /// Applies a detection fetch. Failures are logged and never shown.
    pub fn detections_fetched(
        &mut self,
        result: Result<Vec<Detection>, BackendError>,
        now: DateTime<Local>,
    ) {
        match result {
            Ok(detections) => {
                log::debug!("Fetched {} detections", detections.len());
                self.render_detections(&detections);
                self.check_unknown_faces(&detections, now);
            }
            Err(e) => log::warn!("Error fetching detections: {e}"),
        }
    }

    pub fn render_detections(&mut self, detections: &[Detection]) {
        self.page.detections = DetectionList::render(detections);
    }

    /// Raises the unknown-face alert if the snapshot holds a recent unknown
    /// face and no alert is already pending. Returns true when it fired.
    pub fn check_unknown_faces(&mut self, detections: &[Detection], now: DateTime<Local>) -> bool {
        if self.state.unknown_pending {
            return false;
        }
        let Some(unknown) = find_recent_unknown(detections, now, self.recent_window) else {
            return false;
        };
        log::info!("Unknown face seen at {}", unknown.time);
        self.state.unknown_pending = true;
        self.page.alert_visible = true;
        self.notify(
            NotificationKind::Warning,
            "Unknown face detected! Please add a name.",
        );
        true
    }

    // --- Saving a face ---

    pub fn set_name_input(&mut self, value: impl Into<String>) {
        self.page.name_input = value.into();
    }

    /// Validates the name field and builds the request body with an empty
    /// image; callers may attach one with [`NewFace::with_image`].
    ///
    /// Returns `None` (after an error notification) when the trimmed name
    /// is empty; no request must be sent in that case.
    pub fn prepare_save(&mut self) -> Option<NewFace> {
        let name = self.page.name_input.trim();
        if name.is_empty() {
            self.notify(NotificationKind::Error, "Please enter a name for the face");
            return None;
        }
        Some(NewFace::new(name, None))
    }

    /// Reports a save that failed before reaching the backend, such as an
    /// unreadable image attachment.
    pub fn save_aborted(&mut self, reason: impl std::fmt::Display) {
        self.notify(NotificationKind::Error, format!("Error saving face: {reason}"));
    }

    /// Applies the backend's answer to a save. Returns true when the caller
    /// must run one extra detection fetch to refresh the list.
    pub fn save_finished(&mut self, face: &NewFace, result: Result<(), BackendError>) -> bool {
        match result {
            Ok(()) => {
                log::info!("Saved face as {}", face.name);
                self.page.name_input.clear();
                self.page.alert_visible = false;
                self.state.unknown_pending = false;
                self.notify(
                    NotificationKind::Success,
                    format!("Face saved as: {}", face.name),
                );
                true
            }
            Err(e) => {
                self.save_aborted(e);
                false
            }
        }
    }
}
