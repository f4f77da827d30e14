use crate::error::AppError;
use crate::models::detect_types::SelectedFile;
use crate::models::view_types::ViewSnapshot;
use crate::services::detect_client::HttpDetectClient;
use crate::services::tauri_view::TauriView;
use crate::services::upload_controller::UploadController;
use std::path::Path;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;

pub type DesktopController = UploadController<TauriView, HttpDetectClient>;

/// Extensions the detection backend accepts.
const MEDIA_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "mp4", "avi", "mov"];

/// Opens the native file picker (the drop zone click).
#[tauri::command]
pub async fn pick_file(
    app: AppHandle,
    controller: State<'_, DesktopController>,
) -> Result<Option<String>, AppError> {
    let (tx, rx) = tokio::sync::oneshot::channel();
    app.dialog()
        .file()
        .add_filter("Media", MEDIA_EXTENSIONS)
        .pick_file(move |picked| {
            let _ = tx.send(picked);
        });

    let picked = rx
        .await
        .map_err(|_| AppError::from("File dialog closed unexpectedly"))?;
    let Some(picked) = picked else {
        return Ok(None);
    };
    let path = picked
        .into_path()
        .map_err(|e| AppError::from(format!("Unsupported file location: {}", e)))?;

    select(&controller, &path).await
}

/// Selects a file by path (native drag-and-drop onto the window).
#[tauri::command]
pub async fn select_path(
    controller: State<'_, DesktopController>,
    path: String,
) -> Result<Option<String>, AppError> {
    select(&controller, Path::new(&path)).await
}

#[tauri::command]
pub async fn start_detection(controller: State<'_, DesktopController>) -> Result<(), AppError> {
    controller.start_detection().map_err(AppError::from)
}

#[tauri::command]
pub async fn cancel_detection(controller: State<'_, DesktopController>) -> Result<bool, AppError> {
    Ok(controller.cancel())
}

#[tauri::command]
pub async fn get_view_state(
    controller: State<'_, DesktopController>,
) -> Result<ViewSnapshot, AppError> {
    Ok(controller.snapshot())
}

async fn select(controller: &DesktopController, path: &Path) -> Result<Option<String>, AppError> {
    let file = SelectedFile::from_path(path).await.map_err(|e| AppError {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;
    Ok(controller.select_files(vec![file]))
}
