//! Terminal front end: runs one detection for a file and prints the verdict.

use clap::Parser;
use deepfake_lens_lib::services::terminal_view::TerminalView;
use deepfake_lens_lib::{
    init_tracing, AppError, HttpDetectClient, SelectedFile, Settings, UploadController,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "deepfake-lens-cli", version, about = "Check a photo or video with the AI detection backend")]
struct Cli {
    /// Image or video to analyze
    file: PathBuf,

    /// Backend base URL (overrides config and DEEPFAKE_LENS_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Settings file (default: $DEEPFAKE_LENS_CONFIG, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, AppError> {
    init_tracing();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        settings.endpoint = endpoint;
        settings.validate()?;
    }

    let view = Arc::new(TerminalView::new());
    let client = Arc::new(HttpDetectClient::new(&settings)?);
    let controller = UploadController::new(view.clone(), client, &settings)?;

    let file = SelectedFile::from_path(&cli.file).await.map_err(|e| AppError {
        message: format!("Failed to read {}: {}", cli.file.display(), e),
    })?;
    controller.select_files(vec![file]);

    controller.start_detection()?;
    controller.wait().await;

    if view.reloaded() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
