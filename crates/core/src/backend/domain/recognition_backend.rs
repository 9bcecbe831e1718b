use serde::{Deserialize, Serialize};

use crate::backend::domain::backend_error::BackendError;
use crate::detection::domain::detection::Detection;

/// Body of the camera start/stop responses, e.g. `{"status": "camera started"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Request body for registering a new known face.
///
/// `image` is either empty or a `data:` URL; the backend splits it on the
/// first comma to get the base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFace {
    pub image: String,
    pub name: String,
}

impl NewFace {
    pub fn new(name: impl Into<String>, image: Option<String>) -> Self {
        Self {
            image: image.unwrap_or_default(),
            name: name.into(),
        }
    }

    pub fn with_image(mut self, data_url: impl Into<String>) -> Self {
        self.image = data_url.into();
        self
    }
}

/// Domain interface to the remote recognition service.
///
/// Every call is blocking. Front ends that must stay responsive run the
/// backend on a worker thread.
pub trait RecognitionBackend: Send {
    fn start_camera(&self) -> Result<StatusResponse, BackendError>;

    fn stop_camera(&self) -> Result<StatusResponse, BackendError>;

    /// Snapshot of recent detections, oldest first.
    fn detections(&self) -> Result<Vec<Detection>, BackendError>;

    /// Any 2xx response is success.
    fn add_face(&self, face: &NewFace) -> Result<(), BackendError>;

    /// Names of everyone the backend can recognize, sorted.
    fn known_people(&self) -> Result<Vec<String>, BackendError>;

    /// Where the MJPEG live stream can be viewed.
    fn video_feed_url(&self) -> String;
}
