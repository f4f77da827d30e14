pub mod detect_client;
pub mod progress;
pub mod result_renderer;
#[cfg(feature = "desktop")]
pub mod tauri_view;
pub mod terminal_view;
pub mod upload_controller;
pub mod view;
