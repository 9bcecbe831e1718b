use std::path::Path;

use chrono::{DateTime, Local};

use crate::backend::domain::backend_error::BackendError;
use crate::backend::domain::recognition_backend::RecognitionBackend;
use crate::backend::infrastructure::face_image;
use crate::monitor::monitor_controller::{CameraOutcome, MonitorController};
use crate::shared::monitor_config::MonitorConfig;

pub type Clock = Box<dyn Fn() -> DateTime<Local> + Send>;

/// Blocking monitoring session: runs each backend call inline and feeds the
/// result to a [`MonitorController`].
///
/// Calls are strictly sequential, so a slow fetch delays the next tick
/// instead of overlapping with it.
pub struct MonitorUseCase {
    backend: Box<dyn RecognitionBackend>,
    controller: MonitorController,
    clock: Clock,
}

impl MonitorUseCase {
    pub fn new(backend: Box<dyn RecognitionBackend>, config: &MonitorConfig) -> Self {
        Self {
            backend,
            controller: MonitorController::new(config),
            clock: Box::new(Local::now),
        }
    }

    /// Replaces the wall clock used for the unknown-face recency check.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn controller(&self) -> &MonitorController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MonitorController {
        &mut self.controller
    }

    pub fn start_camera(&mut self) -> CameraOutcome {
        let result = self.backend.start_camera();
        self.controller.camera_start_finished(result)
    }

    pub fn stop_camera(&mut self) -> CameraOutcome {
        let result = self.backend.stop_camera();
        self.controller.camera_stop_finished(result)
    }

    /// Handles one poll tick. Returns true if a fetch was performed.
    pub fn tick(&mut self) -> bool {
        if !self.controller.poll_due() {
            return false;
        }
        self.refresh_detections();
        true
    }

    /// Fetches and renders detections regardless of camera state.
    pub fn refresh_detections(&mut self) {
        let result = self.backend.detections();
        let now = (self.clock)();
        self.controller.detections_fetched(result, now);
    }

    /// Saves the name currently in the input, optionally with a face photo.
    /// Returns true when the backend accepted it.
    pub fn save_face(&mut self, image_path: Option<&Path>) -> bool {
        let Some(mut face) = self.controller.prepare_save() else {
            return false;
        };
        if let Some(path) = image_path {
            match face_image::encode_data_url(path) {
                Ok(data_url) => face = face.with_image(data_url),
                Err(e) => {
                    self.controller.save_aborted(e);
                    return false;
                }
            }
        }

        let result = self.backend.add_face(&face);
        let refresh = self.controller.save_finished(&face, result);
        if refresh {
            self.refresh_detections();
        }
        refresh
    }

    pub fn known_people(&self) -> Result<Vec<String>, BackendError> {
        self.backend.known_people()
    }

    pub fn video_feed_url(&self) -> String {
        self.backend.video_feed_url()
    }
}
