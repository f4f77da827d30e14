use crate::error::DetectError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The file picked by the user, held in memory until it is uploaded.
#[derive(Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, DetectError> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Ok(Self { name, bytes })
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub label: String,
    #[serde(default)]
    pub is_fake: bool,
    pub ai_probability: f64,
    /// Absent when the backend could not decode the media.
    #[serde(default)]
    pub organic_probability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResponse {
    pub filename: Option<String>,
    pub result: DetectionResult,
}

/// Raw body of `POST /detect`. Rejections come back as `{ "error": ... }`.
#[derive(Debug, Deserialize)]
pub struct DetectEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub result: Option<DetectionResult>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TryFrom<DetectEnvelope> for DetectionResponse {
    type Error = DetectError;

    fn try_from(envelope: DetectEnvelope) -> Result<Self, Self::Error> {
        if let Some(message) = envelope.error {
            return Err(DetectError::Rejected(message));
        }
        let result = envelope
            .result
            .ok_or_else(|| DetectError::Malformed("missing `result`".to_string()))?;
        if let Some(status) = envelope.status.as_deref() {
            if status != "success" {
                tracing::warn!("unexpected detection status {:?}", status);
            }
        }
        Ok(DetectionResponse {
            filename: envelope.filename.filter(|f| !f.is_empty()),
            result,
        })
    }
}
