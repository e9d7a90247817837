//! Classification endpoints
//!
//! `POST /classify` accepts any subset of {text, image_url, audio_url} and
//! returns the fused classification. `POST /classify-audio` accepts a raw
//! audio upload and additionally returns the transcript. Responses are
//! either a complete fused result or an explicit failure status — never a
//! partially filled success.

use crate::error::{ApiError, ApiResult};
use crate::types::FusionResult;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use civic_common::api::{AudioClassifyResponse, ClassifyRequest, ClassifyResponse, Confidence};
use civic_common::labels::DepartmentCode;
use tracing::info;

/// POST /classify
pub async fn classify_issue(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> ApiResult<Json<ClassifyResponse>> {
    let fused = state.classifier.classify(&request).await?;

    let response = to_response(fused).ok_or_else(|| {
        ApiError::ClassificationFailed("no modality produced a usable prediction".to_string())
    })?;

    info!(
        severity = response.severity.as_str(),
        department = response.department.as_str(),
        conflict = response.conflicts.is_some(),
        "Classification complete"
    );

    Ok(Json(response))
}

/// POST /classify-audio
///
/// Multipart upload variant: the `file` field carries raw audio bytes.
pub async fn classify_audio_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<AudioClassifyResponse>> {
    let mut audio_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("failed to read upload: {e}")))?;
            audio_bytes = Some(bytes.to_vec());
            break;
        }
    }

    let bytes =
        audio_bytes.ok_or_else(|| ApiError::BadRequest("missing 'file' field".to_string()))?;

    let (transcript, fused) = state
        .classifier
        .classify_audio_bytes(bytes)
        .await
        .map_err(|e| ApiError::ClassificationFailed(format!("audio processing failed: {e}")))?;

    let classification = to_response(fused).ok_or_else(|| {
        ApiError::ClassificationFailed("transcript produced no usable prediction".to_string())
    })?;

    info!(
        transcript_chars = transcript.chars().count(),
        severity = classification.severity.as_str(),
        department = classification.department.as_str(),
        "Audio classification complete"
    );

    Ok(Json(AudioClassifyResponse {
        transcribed_text: transcript,
        classification,
    }))
}

/// Project a usable fusion result onto the wire shape
fn to_response(fused: FusionResult) -> Option<ClassifyResponse> {
    let severity = fused.severity?;
    let department = fused
        .department
        .map(|d| d.code())
        .unwrap_or(DepartmentCode::Other);

    Some(ClassifyResponse {
        severity: severity.code(),
        department,
        title: fused.title,
        confidence: Confidence {
            severity: round3(fused.severity_confidence),
            department: round3(fused.department_confidence),
        },
        conflicts: fused.conflict,
    })
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Build classification routes
pub fn classify_routes() -> Router<AppState> {
    Router::new()
        .route("/classify", post(classify_issue))
        .route("/classify-audio", post(classify_audio_upload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_common::labels::{Department, Severity};

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.123456), 0.123);
        assert_eq!(round3(0.9996), 1.0);
        assert_eq!(round3(0.0), 0.0);
    }

    #[test]
    fn test_to_response_rejects_unusable_result() {
        let fused = FusionResult {
            severity: None,
            department: None,
            title: "No title".to_string(),
            severity_confidence: 0.0,
            department_confidence: 0.0,
            conflict: None,
        };
        assert!(to_response(fused).is_none());
    }

    #[test]
    fn test_to_response_maps_codes_and_rounds() {
        let fused = FusionResult {
            severity: Some(Severity::Severe),
            department: Some(Department::Roads),
            title: "Pothole Issue".to_string(),
            severity_confidence: 0.87654,
            department_confidence: 0.5,
            conflict: None,
        };
        let response = to_response(fused).unwrap();
        assert_eq!(response.severity.as_str(), "HIGH");
        assert_eq!(response.department.as_str(), "Roads");
        assert_eq!(response.confidence.severity, 0.877);
    }
}
