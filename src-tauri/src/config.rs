//! Settings loading.
//!
//! Resolution order for the settings file:
//! 1. Explicit path (CLI `--config`)
//! 2. `DEEPFAKE_LENS_CONFIG` environment variable
//! 3. `<user config dir>/deepfake-lens/config.toml`
//! 4. Compiled defaults
//!
//! `DEEPFAKE_LENS_ENDPOINT` overrides the endpoint from any of the above.

use crate::error::DetectError;
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "DEEPFAKE_LENS_CONFIG";
pub const ENDPOINT_ENV: &str = "DEEPFAKE_LENS_ENDPOINT";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the detection backend.
    pub endpoint: String,
    pub detect_path: String,
    pub uploads_path: String,
    /// Multipart field carrying the file.
    pub upload_field: String,
    pub tick_ms: u64,
    pub progress_ceiling: u8,
    pub reveal_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_string(),
            detect_path: "/detect".to_string(),
            uploads_path: "/static/uploads".to_string(),
            upload_field: "file".to_string(),
            tick_ms: 30,
            progress_ceiling: 90,
            reveal_delay_ms: 500,
            request_timeout_secs: 120,
        }
    }
}

impl Settings {
    /// Resolve and load settings, then apply the endpoint override and validate.
    pub fn load(explicit: Option<&Path>) -> Result<Self, DetectError> {
        let mut settings = match resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if explicit.is_some() => {
                return Err(DetectError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            _ => Self::default(),
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            tracing::debug!("endpoint overridden by {}", ENDPOINT_ENV);
            settings.endpoint = endpoint;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, DetectError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content).map_err(|e| {
            DetectError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), DetectError> {
        if self.tick_ms == 0 {
            return Err(DetectError::Config("tick_ms must be greater than 0".into()));
        }
        if self.progress_ceiling == 0 || self.progress_ceiling > 100 {
            return Err(DetectError::Config(format!(
                "progress_ceiling must be within 1..=100, got {}",
                self.progress_ceiling
            )));
        }
        self.detect_url()?;
        self.uploads_url()?;
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url, DetectError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| DetectError::Config(format!("invalid endpoint {}: {}", self.endpoint, e)))?;
        if url.cannot_be_a_base() {
            return Err(DetectError::Config(format!(
                "endpoint is not a base URL: {}",
                self.endpoint
            )));
        }
        Ok(url)
    }

    pub fn detect_url(&self) -> Result<Url, DetectError> {
        self.join(&self.detect_path)
    }

    /// Directory URL the backend serves uploaded media from.
    pub fn uploads_url(&self) -> Result<Url, DetectError> {
        self.join(&self.uploads_path)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolves `path` below the endpoint, keeping any path prefix the
    /// endpoint carries (`http://host/deepfake` + `/detect`).
    fn join(&self, path: &str) -> Result<Url, DetectError> {
        let mut base = self.base_url()?;
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|e| DetectError::Config(format!("invalid path {}: {}", path, e)))
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("deepfake-lens").join("config.toml"))
}
