#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::Settings;
pub use error::{AppError, DetectError};
pub use models::detect_types::{DetectionResponse, DetectionResult, SelectedFile};
pub use models::view_types::{ResultView, ViewState};
pub use services::detect_client::{DetectApi, HttpDetectClient};
pub use services::upload_controller::UploadController;
pub use services::view::View;

/// Installs the stderr `tracing` subscriber. Level defaults to `info`,
/// `RUST_LOG` overrides it. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(feature = "desktop")]
pub fn run() -> Result<(), tauri::Error> {
    use services::tauri_view::TauriView;
    use std::sync::Arc;
    use tauri::Manager;

    init_tracing();
    tracing::info!("Starting Deepfake Lens v{}", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .setup(|app| {
            let app_config = app.path().app_config_dir()?.join("config.toml");
            let settings = Settings::load(app_config.exists().then_some(app_config.as_path()))?;
            tracing::info!("Detection endpoint: {}", settings.endpoint);

            let client = Arc::new(HttpDetectClient::new(&settings)?);
            let view = Arc::new(TauriView::new(app.handle().clone()));
            let controller = UploadController::new(view, client, &settings)?;
            app.manage(controller);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::detect::pick_file,
            commands::detect::select_path,
            commands::detect::start_detection,
            commands::detect::cancel_detection,
            commands::detect::get_view_state,
        ])
        .run(tauri::generate_context!())
}
