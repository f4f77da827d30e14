use crate::config::Settings;
use crate::error::DetectError;
use crate::models::detect_types::{DetectEnvelope, DetectionResponse, SelectedFile};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::future::Future;

/// Backend seam: uploads one file and returns the parsed verdict.
pub trait DetectApi: Send + Sync + 'static {
    fn detect(
        &self,
        file: &SelectedFile,
    ) -> impl Future<Output = Result<DetectionResponse, DetectError>> + Send;
}

/// Multipart client for `POST /detect`.
#[derive(Clone)]
pub struct HttpDetectClient {
    client: reqwest::Client,
    detect_url: Url,
    field: String,
}

impl HttpDetectClient {
    pub fn new(settings: &Settings) -> Result<Self, DetectError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self {
            client,
            detect_url: settings.detect_url()?,
            field: settings.upload_field.clone(),
        })
    }
}

impl DetectApi for HttpDetectClient {
    async fn detect(&self, file: &SelectedFile) -> Result<DetectionResponse, DetectError> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part(self.field.clone(), part);

        tracing::info!(
            "Uploading {} ({} bytes) to {}",
            file.name,
            file.bytes.len(),
            self.detect_url
        );

        let response = self
            .client
            .post(self.detect_url.clone())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DetectError::Status(response.status()));
        }

        let envelope: DetectEnvelope = response
            .json()
            .await
            .map_err(|e| DetectError::Malformed(e.to_string()))?;

        envelope.try_into()
    }
}
