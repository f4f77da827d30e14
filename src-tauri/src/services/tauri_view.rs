use crate::models::view_types::{ProgressUpdate, ResultView, ViewState};
use crate::services::view::View;
use serde::Serialize;
use tauri::{AppHandle, Emitter};

/// Forwards view calls to the webview as events; `dist/main.js` paints them.
pub struct TauriView {
    app: AppHandle,
}

impl TauriView {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn emit<S: Serialize + Clone>(&self, event: &str, payload: S) {
        if let Err(e) = self.app.emit(event, payload) {
            tracing::warn!("Failed to emit {}: {}", event, e);
        }
    }
}

impl View for TauriView {
    fn show_section(&self, state: ViewState) {
        self.emit("view-changed", state);
    }

    fn set_file_label(&self, name: &str) {
        self.emit("file-selected", name.to_string());
    }

    fn set_detect_ready(&self, ready: bool) {
        self.emit("detect-ready", ready);
    }

    fn set_progress(&self, update: ProgressUpdate) {
        self.emit("detect-progress", update);
    }

    fn show_result(&self, result: &ResultView) {
        self.emit("detect-result", result.clone());
    }

    fn alert(&self, message: &str) {
        self.emit("detect-alert", message.to_string());
    }

    fn reload(&self) {
        self.emit("detect-reload", ());
    }
}
