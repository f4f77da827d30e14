//! HTTP client and end-to-end flow against an in-process backend.

mod common;

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::{image, test_settings, RecordingView, ViewEvent};
use deepfake_lens_lib::models::view_types::{MediaKind, StatusTone};
use deepfake_lens_lib::{DetectApi, DetectError, HttpDetectClient, Settings, UploadController, ViewState};
use serde_json::{json, Value};
use std::sync::Arc;

/// Serves `router` on an ephemeral port and returns its base URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Mimics the detection backend: reads the `file` field and reports a
/// verdict that depends on the upload size.
async fn detect(mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        if filename.is_empty() {
            return Json(json!({ "error": "No selected file" }));
        }
        let ai = if bytes.len() > 2 { 91 } else { 9 };
        return Json(json!({
            "status": "success",
            "filename": filename,
            "result": {
                "label": if ai > 50 { "Deepfake Detected" } else { "Authentic Media" },
                "ai_probability": ai,
                "organic_probability": 100 - ai,
                "is_fake": ai > 50,
            }
        }));
    }
    Json(json!({ "error": "No file part" }))
}

fn backend() -> Router {
    Router::new().route("/detect", post(detect))
}

#[tokio::test]
async fn uploads_file_field_and_parses_verdict() {
    let base = spawn_backend(backend()).await;
    let client = HttpDetectClient::new(&test_settings(&base)).unwrap();

    let response = client.detect(&image("portrait.jpg")).await.unwrap();

    assert_eq!(response.filename.as_deref(), Some("portrait.jpg"));
    assert_eq!(response.result.ai_probability, 91.0);
    assert_eq!(response.result.organic_probability, Some(9.0));
    assert!(response.result.is_fake);
}

#[tokio::test]
async fn wrong_field_name_is_rejected_by_backend() {
    let base = spawn_backend(backend()).await;
    let settings = Settings {
        upload_field: "media".to_string(),
        ..test_settings(&base)
    };
    let client = HttpDetectClient::new(&settings).unwrap();

    let err = client.detect(&image("portrait.jpg")).await.unwrap_err();

    match err {
        DetectError::Rejected(msg) => assert_eq!(msg, "No file part"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn server_error_status_is_reported() {
    let router = Router::new().route(
        "/detect",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_backend(router).await;
    let client = HttpDetectClient::new(&test_settings(&base)).unwrap();

    let err = client.detect(&image("portrait.jpg")).await.unwrap_err();

    assert!(matches!(err, DetectError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let router = Router::new().route("/detect", post(|| async { "<html>oops</html>" }));
    let base = spawn_backend(router).await;
    let client = HttpDetectClient::new(&test_settings(&base)).unwrap();

    let err = client.detect(&image("portrait.jpg")).await.unwrap_err();

    assert!(matches!(err, DetectError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HttpDetectClient::new(&test_settings(&format!("http://{}", addr))).unwrap();

    let err = client.detect(&image("portrait.jpg")).await.unwrap_err();

    assert!(matches!(err, DetectError::Transport(_)));
}

#[tokio::test]
async fn full_flow_renders_backend_verdict() {
    let base = spawn_backend(backend()).await;
    let settings = Settings {
        tick_ms: 1,
        reveal_delay_ms: 0,
        ..test_settings(&base)
    };
    let view = Arc::new(RecordingView::default());
    let client = Arc::new(HttpDetectClient::new(&settings).unwrap());
    let controller = UploadController::new(view.clone(), client, &settings).unwrap();

    controller.select_files(vec![image("clip.mp4")]);
    controller.start_detection().unwrap();
    controller.wait().await;

    let results = view.results();
    assert_eq!(results.len(), 1, "events: {:?}", view.events());
    let result = &results[0];
    assert_eq!(result.status.tone, StatusTone::Danger);
    assert_eq!(result.chart.data.datasets[0].data, vec![91.0, 9.0]);

    let preview = result.preview.as_ref().unwrap();
    assert_eq!(preview.kind, MediaKind::Video);
    assert_eq!(preview.url, format!("{}/static/uploads/clip.mp4", base));

    assert!(view.events().contains(&ViewEvent::Section(ViewState::Result)));
    assert_eq!(controller.snapshot().state, ViewState::Result);
}

#[tokio::test]
async fn full_flow_reloads_on_rejection() {
    let router = Router::new().route(
        "/detect",
        post(|| async { Json(json!({ "error": "Invalid file type" })) }),
    );
    let base = spawn_backend(router).await;
    let settings = Settings {
        tick_ms: 1,
        reveal_delay_ms: 0,
        ..test_settings(&base)
    };
    let view = Arc::new(RecordingView::default());
    let client = Arc::new(HttpDetectClient::new(&settings).unwrap());
    let controller = UploadController::new(view.clone(), client, &settings).unwrap();

    controller.select_files(vec![image("notes.txt")]);
    controller.start_detection().unwrap();
    controller.wait().await;

    assert_eq!(view.events().last(), Some(&ViewEvent::Reload));
    assert!(view.results().is_empty());
}
