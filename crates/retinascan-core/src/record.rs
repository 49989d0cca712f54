//! Stored analysis result records.

use serde::{Deserialize, Serialize};

use crate::Grade;

/// One completed screening analysis.
///
/// Created when a submission succeeds, never mutated afterwards, removed
/// only by an explicit delete. Serialises with camelCase field names; the
/// JSON document is what the store persists verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Opaque record identifier (millisecond unix timestamp as decimal).
    pub id: String,
    /// Locally-resolvable `file://` URI of the submitted image.
    pub image_url: String,
    pub grade: Grade,
    /// Classifier confidence in 0-1.
    pub confidence: f32,
    /// ISO 8601 timestamp string.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            id: "1754560000123".into(),
            image_url: "file:///scans/left-eye.png".into(),
            grade: Grade::Moderate,
            confidence: 0.91,
            timestamp: "2026-08-07T09:46:40.123Z".into(),
            patient_id: None,
        }
    }

    #[test]
    fn json_round_trip() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn uses_camel_case_field_names() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"grade\":2"));
        assert!(!json.contains("image_url"));
    }

    #[test]
    fn absent_patient_id_is_omitted() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("patientId"));
    }

    #[test]
    fn present_patient_id_round_trips() {
        let mut record = sample();
        record.patient_id = Some("P-0042".into());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"patientId\":\"P-0042\""));
        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.patient_id.as_deref(), Some("P-0042"));
    }

    #[test]
    fn parses_document_without_patient_id_field() {
        let json = r#"{
            "id": "1754560000123",
            "imageUrl": "file:///scans/left-eye.png",
            "grade": 4,
            "confidence": 0.87,
            "timestamp": "2026-08-07T09:46:40.123Z"
        }"#;
        let parsed: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.grade, Grade::Proliferative);
        assert!(parsed.patient_id.is_none());
    }
}
