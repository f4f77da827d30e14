use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failures of the detection flow.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("no file selected")]
    NoFileSelected,

    #[error("a detection is already in progress")]
    Busy,

    #[error("detection cancelled")]
    Cancelled,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend answered HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The backend accepted the request but refused the upload
    /// (it reports this with a 200 status and an `error` key).
    #[error("backend rejected the upload: {0}")]
    Rejected(String),

    #[error("malformed detection response: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Error handed across the command boundary (webview and CLI).
#[derive(Debug, Serialize)]
pub struct AppError {
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<DetectError> for AppError {
    fn from(err: DetectError) -> Self {
        AppError {
            message: err.to_string(),
        }
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError { message: msg }
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError {
            message: msg.to_string(),
        }
    }
}
