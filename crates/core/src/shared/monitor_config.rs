use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    DEFAULT_BACKEND_URL, NOTIFICATION_TTL, POLL_INTERVAL, RECENT_UNKNOWN_WINDOW,
};

/// Runtime knobs shared by every front end.
///
/// Durations serialize as milliseconds so the struct can be embedded in
/// persisted settings files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub backend_url: String,
    #[serde(with = "millis")]
    pub poll_interval: Duration,
    #[serde(with = "millis")]
    pub recent_window: Duration,
    #[serde(with = "millis")]
    pub notification_ttl: Duration,
    /// `None` means requests never time out.
    #[serde(default, with = "optional_millis")]
    pub request_timeout: Option<Duration>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            poll_interval: POLL_INTERVAL,
            recent_window: RECENT_UNKNOWN_WINDOW,
            notification_ttl: NOTIFICATION_TTL,
            request_timeout: None,
        }
    }
}

impl MonitorConfig {
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

mod optional_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(deserializer).map(|v| v.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_behaviour() {
        let config = MonitorConfig::default();
        assert_eq!(config.backend_url, "http://127.0.0.1:5000");
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.recent_window, Duration::from_secs(10));
        assert_eq!(config.notification_ttl, Duration::from_secs(3));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = MonitorConfig::default()
            .with_backend_url("http://camera.local:8080")
            .with_poll_interval(Duration::from_millis(500))
            .with_request_timeout(Some(Duration::from_secs(5)));
        assert_eq!(config.backend_url, "http://camera.local:8080");
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_serializes_durations_as_millis() {
        let json = serde_json::to_value(MonitorConfig::default()).unwrap();
        assert_eq!(json["poll_interval"], 2000);
        assert_eq!(json["recent_window"], 10000);
        assert!(json["request_timeout"].is_null());
    }

    #[test]
    fn test_missing_timeout_defaults_to_none() {
        let json = r#"{
            "backend_url": "http://x",
            "poll_interval": 1000,
            "recent_window": 5000,
            "notification_ttl": 3000
        }"#;
        let config: MonitorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(config.request_timeout.is_none());
    }
}
