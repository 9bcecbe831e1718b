use thiserror::Error;

pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("invalid backend URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxedSource,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: BoxedSource,
    },
}

impl BackendError {
    pub fn transport(url: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        BackendError::Transport {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn decode(url: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        BackendError::Decode {
            url: url.into(),
            source: source.into(),
        }
    }
}
