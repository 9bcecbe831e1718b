use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::backend::domain::backend_error::BackendError;
use crate::backend::domain::recognition_backend::{NewFace, RecognitionBackend, StatusResponse};
use crate::detection::domain::detection::Detection;
use crate::shared::constants::{
    ADD_FACE_PATH, DETECTIONS_PATH, KNOWN_PEOPLE_PATH, START_CAMERA_PATH, STOP_CAMERA_PATH,
    VIDEO_FEED_PATH,
};
use crate::shared::monitor_config::MonitorConfig;

/// [`RecognitionBackend`] over the service's JSON HTTP routes.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &MonitorConfig) -> Result<Self, BackendError> {
        let base_url = normalize_base_url(&config.backend_url)?;
        // reqwest defaults to a 30s timeout; an explicit None disables it.
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BackendError::transport(&base_url, e))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.endpoint(path);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BackendError::transport(&url, e))?;
        let body = check_status(&url, response)?
            .text()
            .map_err(|e| BackendError::transport(&url, e))?;
        serde_json::from_str(&body).map_err(|e| BackendError::decode(&url, e))
    }
}

impl RecognitionBackend for HttpBackend {
    fn start_camera(&self) -> Result<StatusResponse, BackendError> {
        self.get_json(START_CAMERA_PATH)
    }

    fn stop_camera(&self) -> Result<StatusResponse, BackendError> {
        self.get_json(STOP_CAMERA_PATH)
    }

    fn detections(&self) -> Result<Vec<Detection>, BackendError> {
        self.get_json(DETECTIONS_PATH)
    }

    fn add_face(&self, face: &NewFace) -> Result<(), BackendError> {
        let url = self.endpoint(ADD_FACE_PATH);
        log::debug!("POST {url} name={}", face.name);
        let response = self
            .client
            .post(&url)
            .json(face)
            .send()
            .map_err(|e| BackendError::transport(&url, e))?;
        check_status(&url, response)?;
        Ok(())
    }

    fn known_people(&self) -> Result<Vec<String>, BackendError> {
        self.get_json(KNOWN_PEOPLE_PATH)
    }

    fn video_feed_url(&self) -> String {
        self.endpoint(VIDEO_FEED_PATH)
    }
}

fn check_status(url: &str, response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(BackendError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Validates an `http(s)` base URL and strips trailing slashes so route
/// paths can be appended directly.
fn normalize_base_url(raw: &str) -> Result<String, BackendError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|e| BackendError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BackendError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
