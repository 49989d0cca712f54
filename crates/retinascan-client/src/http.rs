//! HTTP client for the remote inference service.

use std::collections::BTreeMap;
use std::path::Path;

use reqwest::multipart;
use retinascan_core::{ImageFormat, MAX_UPLOAD_BYTES};
use serde::Deserialize;
use tracing::info;

use crate::ClientError;

/// HTTP client for the inference service's predict/health endpoints.
pub struct PredictClient {
    client: reqwest::Client,
    base_url: String,
}

/// Classifier response for one image.
///
/// `class_probabilities` and `backend` are reported by the service but not
/// required; older deployments omit them.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    /// Grade label string, e.g. `"Moderate"`.
    pub grade: String,
    /// Confidence in 0-1.
    pub confidence: f32,
    /// Per-label softmax probabilities.
    #[serde(default)]
    pub class_probabilities: Option<BTreeMap<String, f32>>,
    #[serde(default)]
    pub backend: Option<String>,
}

/// Service health response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub backend: Option<String>,
}

impl PredictClient {
    /// Create a new client for the given service base URL.
    ///
    /// `base_url` should be like `http://localhost:8000` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit a fundus image for grading.
    ///
    /// The file is validated locally before anything goes on the wire:
    /// extension and magic bytes must both identify an accepted format,
    /// and the file must be non-empty and within [`MAX_UPLOAD_BYTES`].
    pub async fn predict(&self, image: &Path) -> Result<Prediction, ClientError> {
        let bytes = std::fs::read(image)?;
        let format = validate_image(image, &bytes)?;

        let file_name = image
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(format.mime_type())?;
        let form = multipart::Form::new().part("file", part);

        let url = format!("{}/predict/", self.base_url);
        info!(url = %url, image = %image.display(), "submitting image for grading");
        let resp = self.client.post(&url).multipart(form).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let prediction: Prediction = resp.json().await?;
        info!(
            grade = %prediction.grade,
            confidence = prediction.confidence,
            "received prediction"
        );
        Ok(prediction)
    }

    /// Probe the service health endpoint.
    pub async fn health(&self) -> Result<HealthReport, ClientError> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }
}

/// Check an image against the accepted formats and the upload cap.
fn validate_image(path: &Path, bytes: &[u8]) -> Result<ImageFormat, ClientError> {
    if bytes.is_empty() {
        return Err(ClientError::EmptyImage);
    }
    if bytes.len() as u64 > MAX_UPLOAD_BYTES {
        return Err(ClientError::ImageTooLarge {
            size: bytes.len() as u64,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let from_ext = ImageFormat::from_path(path);
    let sniffed = ImageFormat::sniff(bytes);
    match (from_ext, sniffed) {
        (Some(_), Some(format)) => Ok(format),
        _ => Err(ClientError::UnsupportedImage(path.display().to_string())),
    }
}
