//! The screening session: submit images, keep the results.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use retinascan_core::{AnalysisResult, Grade};
use retinascan_store::ResultStore;
use tracing::info;

use crate::{ClientError, HealthReport, PredictClient};

/// State container for one screening session.
///
/// Owns the HTTP client and the result store and exposes the four
/// operations the views consume: submit, fetch, history, delete.
pub struct ScreeningSession {
    client: PredictClient,
    store: ResultStore,
}

impl ScreeningSession {
    pub fn new(client: PredictClient, store: ResultStore) -> Self {
        Self { client, store }
    }

    /// Grade an image and persist the outcome. Returns the new record id.
    ///
    /// Nothing is persisted when the upload or the service call fails.
    pub async fn submit(
        &mut self,
        image: &Path,
        patient_id: Option<String>,
    ) -> Result<String, ClientError> {
        let prediction = self.client.predict(image).await?;

        let id = next_result_id();
        let record = AnalysisResult {
            id: id.clone(),
            image_url: file_url(image)?,
            grade: Grade::from_label(&prediction.grade),
            confidence: prediction.confidence,
            timestamp: now_timestamp(),
            patient_id,
        };
        info!(id = %id, grade = %record.grade, "analysis complete");
        self.store.insert(record)?;

        Ok(id)
    }

    /// Fetch a stored result by id.
    pub fn result(&self, id: &str) -> Result<AnalysisResult, ClientError> {
        Ok(self.store.get(id)?)
    }

    /// Results submitted this session, in submission order.
    pub fn history(&self) -> &[AnalysisResult] {
        self.store.list()
    }

    /// Remove a stored result.
    pub fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        Ok(self.store.delete(id)?)
    }

    /// Probe the inference service.
    pub async fn health(&self) -> Result<HealthReport, ClientError> {
        self.client.health().await
    }
}

/// Millisecond unix timestamp as a decimal string.
///
/// Two submissions within the same millisecond share an id; the later
/// write wins, which is the store's only consistency guarantee anyway.
fn next_result_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Current UTC time as ISO 8601 with millisecond precision.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Absolute `file://` URI for a local image path.
fn file_url(path: &Path) -> Result<String, std::io::Error> {
    let abs = std::fs::canonicalize(path)?;
    Ok(format!("file://{}", abs.display()))
}
