//! Shared helpers: a view that records every call and a scripted backend.

#![allow(dead_code)]

use deepfake_lens_lib::models::view_types::{ProgressUpdate, ResultView, ViewState};
use deepfake_lens_lib::{DetectApi, DetectError, DetectionResponse, DetectionResult, SelectedFile, Settings, View};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Section(ViewState),
    FileLabel(String),
    DetectReady(bool),
    Progress(u8, Option<String>),
    Result(ResultView),
    Alert(String),
    Reload,
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn progress_values(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Progress(p, _) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn last_progress(&self) -> Option<u8> {
        self.progress_values().last().copied()
    }

    pub fn results(&self) -> Vec<ResultView> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Result(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl View for RecordingView {
    fn show_section(&self, state: ViewState) {
        self.push(ViewEvent::Section(state));
    }

    fn set_file_label(&self, name: &str) {
        self.push(ViewEvent::FileLabel(name.to_string()));
    }

    fn set_detect_ready(&self, ready: bool) {
        self.push(ViewEvent::DetectReady(ready));
    }

    fn set_progress(&self, update: ProgressUpdate) {
        self.push(ViewEvent::Progress(update.percent, update.caption));
    }

    fn show_result(&self, result: &ResultView) {
        self.push(ViewEvent::Result(result.clone()));
    }

    fn alert(&self, message: &str) {
        self.push(ViewEvent::Alert(message.to_string()));
    }

    fn reload(&self) {
        self.push(ViewEvent::Reload);
    }
}

/// Backend double. Answers with `response`, or a rejection when `None`,
/// after `delay`. Records the progress shown at the moment it was called.
pub struct StubClient {
    response: Option<DetectionResponse>,
    delay: Duration,
    view: Arc<RecordingView>,
    calls: AtomicUsize,
    progress_at_call: Mutex<Vec<Option<u8>>>,
}

impl StubClient {
    pub fn answering(view: Arc<RecordingView>, response: DetectionResponse) -> Self {
        Self::new(view, Some(response), Duration::ZERO)
    }

    pub fn failing(view: Arc<RecordingView>) -> Self {
        Self::new(view, None, Duration::ZERO)
    }

    pub fn new(view: Arc<RecordingView>, response: Option<DetectionResponse>, delay: Duration) -> Self {
        Self {
            response,
            delay,
            view,
            calls: AtomicUsize::new(0),
            progress_at_call: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn progress_at_call(&self) -> Vec<Option<u8>> {
        self.progress_at_call.lock().unwrap().clone()
    }
}

impl DetectApi for StubClient {
    async fn detect(&self, _file: &SelectedFile) -> Result<DetectionResponse, DetectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.progress_at_call
            .lock()
            .unwrap()
            .push(self.view.last_progress());

        tokio::time::sleep(self.delay).await;
        self.response
            .clone()
            .ok_or_else(|| DetectError::Rejected("Invalid file type".to_string()))
    }
}

pub fn verdict(is_fake: bool, ai: f64, organic: f64) -> DetectionResponse {
    DetectionResponse {
        filename: Some("portrait.jpg".to_string()),
        result: DetectionResult {
            label: if is_fake { "Deepfake Detected" } else { "Authentic Media" }.to_string(),
            is_fake,
            ai_probability: ai,
            organic_probability: Some(organic),
        },
    }
}

pub fn image(name: &str) -> SelectedFile {
    SelectedFile::new(name, vec![0xFF, 0xD8, 0xFF, 0xE0])
}

pub fn test_settings(endpoint: &str) -> Settings {
    Settings {
        endpoint: endpoint.to_string(),
        ..Settings::default()
    }
}
