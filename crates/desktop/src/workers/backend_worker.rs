use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use facewatch_core::backend::domain::backend_error::BackendError;
use facewatch_core::backend::domain::recognition_backend::{
    NewFace, RecognitionBackend, StatusResponse,
};
use facewatch_core::backend::infrastructure::face_image;
use facewatch_core::detection::domain::detection::Detection;

pub enum BackendRequest {
    StartCamera,
    StopCamera,
    FetchDetections,
    SaveFace {
        face: NewFace,
        image_path: Option<PathBuf>,
    },
}

pub enum BackendReply {
    CameraStarted(Result<StatusResponse, BackendError>),
    CameraStopped(Result<StatusResponse, BackendError>),
    Detections(Result<Vec<Detection>, BackendError>),
    FaceSaved {
        face: NewFace,
        result: Result<(), BackendError>,
    },
    /// The save never reached the backend (e.g. the photo could not be read).
    FaceRejected(String),
}

/// Runs backend calls one at a time on a dedicated thread so the UI never
/// blocks on HTTP.
///
/// Poll fetches are coalesced: while any fetch is queued or running, further
/// poll requests are dropped.
pub struct BackendWorker {
    requests: Sender<BackendRequest>,
    replies: Receiver<BackendReply>,
    in_flight: usize,
    fetches_in_flight: usize,
}

impl BackendWorker {
    pub fn spawn(backend: Box<dyn RecognitionBackend>) -> Self {
        let (req_tx, req_rx) = crossbeam_channel::unbounded::<BackendRequest>();
        let (reply_tx, reply_rx) = crossbeam_channel::unbounded::<BackendReply>();

        // The thread is detached: dropping the worker closes the request
        // channel and the loop ends once the current call returns.
        thread::spawn(move || {
            for request in req_rx {
                let reply = handle(backend.as_ref(), request);
                if reply_tx.send(reply).is_err() {
                    break;
                }
            }
            log::debug!("Backend worker stopped");
        });

        Self {
            requests: req_tx,
            replies: reply_rx,
            in_flight: 0,
            fetches_in_flight: 0,
        }
    }

    pub fn send(&mut self, request: BackendRequest) {
        let is_fetch = matches!(request, BackendRequest::FetchDetections);
        if self.requests.send(request).is_err() {
            log::error!("Backend worker is gone, request dropped");
            return;
        }
        self.in_flight += 1;
        if is_fetch {
            self.fetches_in_flight += 1;
        }
    }

    /// Queues a poll fetch unless one is already pending. Returns whether a
    /// request was queued.
    pub fn request_poll(&mut self) -> bool {
        if self.fetches_in_flight > 0 {
            log::debug!("Poll skipped, previous fetch still running");
            return false;
        }
        self.send(BackendRequest::FetchDetections);
        true
    }

    /// Collects every reply that has arrived so far without blocking.
    pub fn drain(&mut self) -> Vec<BackendReply> {
        let replies: Vec<_> = self.replies.try_iter().collect();
        for reply in &replies {
            self.in_flight = self.in_flight.saturating_sub(1);
            if matches!(reply, BackendReply::Detections(_)) {
                self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
            }
        }
        replies
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

fn handle(backend: &dyn RecognitionBackend, request: BackendRequest) -> BackendReply {
    match request {
        BackendRequest::StartCamera => BackendReply::CameraStarted(backend.start_camera()),
        BackendRequest::StopCamera => BackendReply::CameraStopped(backend.stop_camera()),
        BackendRequest::FetchDetections => BackendReply::Detections(backend.detections()),
        BackendRequest::SaveFace { face, image_path } => {
            let face = match image_path {
                Some(path) => match face_image::encode_data_url(&path) {
                    Ok(data_url) => face.with_image(data_url),
                    Err(e) => return BackendReply::FaceRejected(e.to_string()),
                },
                None => face,
            };
            let result = backend.add_face(&face);
            BackendReply::FaceSaved { face, result }
        }
    }
}
