use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use facewatch_core::shared::constants::DEFAULT_BACKEND_URL;
use facewatch_core::shared::monitor_config::MonitorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    System,
    Dark,
    Light,
}

impl Appearance {
    pub const ALL: &[Appearance] = &[Appearance::System, Appearance::Dark, Appearance::Light];
}

impl std::fmt::Display for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Appearance::System => write!(f, "System"),
            Appearance::Dark => write!(f, "Dark"),
            Appearance::Light => write!(f, "Light"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub backend_url: String,
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            appearance: Appearance::System,
            font_scale: default_font_scale(),
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("FaceWatch").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            self.save_to(&path);
        }
    }

    /// Falls back to defaults when the file is missing or malformed.
    fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("Could not save settings to {}: {e}", path.display());
                }
            }
            Err(e) => log::warn!("Could not serialize settings: {e}"),
        }
    }

    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig::default().with_backend_url(&self.backend_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_through_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("settings.json");
        let settings = Settings {
            backend_url: "http://door-cam:5000".into(),
            appearance: Appearance::Dark,
            font_scale: 1.25,
        };
        settings.save_to(&path);
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            Settings::load_from(&tmp.path().join("absent.json")),
            Settings::default()
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, r#"{"backend_url":"http://x:1"}"#).unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.backend_url, "http://x:1");
        assert_eq!(settings.appearance, Appearance::System);
        assert_eq!(settings.font_scale, 1.0);
    }

    #[test]
    fn test_monitor_config_uses_backend_url() {
        let settings = Settings {
            backend_url: "http://lobby:5000".into(),
            ..Settings::default()
        };
        let config = settings.monitor_config();
        assert_eq!(config.backend_url, "http://lobby:5000");
        assert_eq!(config.poll_interval, MonitorConfig::default().poll_interval);
    }
}
