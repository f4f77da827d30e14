use crate::models::view_types::{ProgressUpdate, ResultView, ViewState};

/// Rendering surface driven by the upload controller.
///
/// Calls arrive from the detection task, so implementations must be shareable
/// across threads. Every method is fire-and-forget.
pub trait View: Send + Sync + 'static {
    fn show_section(&self, state: ViewState);
    fn set_file_label(&self, name: &str);
    /// Switch the detect button between its idle and ready styles.
    fn set_detect_ready(&self, ready: bool);
    fn set_progress(&self, update: ProgressUpdate);
    fn show_result(&self, result: &ResultView);
    /// Blocking user notification.
    fn alert(&self, message: &str);
    /// Throw away all client state and start over.
    fn reload(&self);
}
