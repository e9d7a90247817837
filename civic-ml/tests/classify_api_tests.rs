//! Classification boundary integration tests
//!
//! Drives the full axum router the way wkmp services are tested: build the
//! router with test state, fire requests through `tower::ServiceExt`, and
//! assert on status codes and JSON bodies. Runs with the model backends
//! unavailable (heuristic fallback) unless a fake backend is injected.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use civic_common::labels::{Department, Severity};
use civic_ml::backend::{InferenceError, ModelBackends, ZeroShotClassifier};
use civic_ml::classify::ClassificationService;
use civic_ml::{build_router, AppState};

fn test_app(backends: ModelBackends) -> Router {
    let classifier = ClassificationService::new(backends).unwrap();
    build_router(AppState::new(classifier))
}

fn heuristic_app() -> Router {
    test_app(ModelBackends::unavailable())
}

async fn post_classify(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/classify")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// A zero-shot fake that always answers with a fixed severity/department
struct FixedZeroShot {
    severity: Severity,
    department: Department,
}

#[async_trait]
impl ZeroShotClassifier for FixedZeroShot {
    async fn classify(
        &self,
        _text: &str,
        candidates: &[&str],
    ) -> Result<(usize, f64), InferenceError> {
        let label = if candidates.contains(&self.severity.label()) {
            self.severity.label()
        } else {
            self.department.label()
        };
        Ok((candidates.iter().position(|c| *c == label).unwrap(), 0.8))
    }
}

#[tokio::test]
async fn classify_rejects_empty_request() {
    let (status, body) = post_classify(heuristic_app(), json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn classify_text_in_heuristic_mode() {
    let (status, body) = post_classify(
        heuristic_app(),
        json!({"text": "garbage and trash everywhere near the school"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department"], "Sanitation");
    assert!(body["severity"].is_string());
    assert!(body["confidence"]["severity"].is_number());
    assert!(body["confidence"]["department"].is_number());
    assert!(body.get("conflicts").is_none());
}

#[tokio::test]
async fn classify_mosquito_scenario() {
    let (status, body) = post_classify(
        heuristic_app(),
        json!({"text": "mosquito problem in the area"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department"], "Sanitation");
    assert!(body["title"].as_str().unwrap().contains("Mosquito"));
}

#[tokio::test]
async fn classify_applies_corrections_to_model_prediction() {
    let backends = ModelBackends {
        zero_shot: Some(Arc::new(FixedZeroShot {
            severity: Severity::Moderate,
            department: Department::Environment,
        })),
        vision: None,
        speech: None,
    };

    let (status, body) = post_classify(
        test_app(backends),
        json!({"text": "mosquito problem in the area"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["severity"], "MEDIUM");
    assert_eq!(body["department"], "Sanitation");
    assert_eq!(body["confidence"]["severity"], 0.8);
}

#[tokio::test]
async fn classify_text_that_cleans_to_nothing_is_a_server_failure() {
    // the placeholder marker is stripped, leaving no usable modality
    let (status, body) = post_classify(heuristic_app(), json!({"text": "Processing..."})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "CLASSIFICATION_FAILED");
}

#[tokio::test]
async fn classify_image_without_vision_backend_is_a_server_failure() {
    let (status, body) = post_classify(
        heuristic_app(),
        json!({"image_url": "http://127.0.0.1:1/nothing.jpg"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "CLASSIFICATION_FAILED");
}

#[tokio::test]
async fn health_reports_degraded_mode_without_backends() {
    let response = heuristic_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["mode"], "degraded");
    assert_eq!(body["module"], "civic-ml");
    assert!(body["uptime_seconds"].is_number());
}

#[tokio::test]
async fn health_reports_full_mode_with_all_backends() {
    // a zero-shot-only capability is still degraded; health must say so
    let backends = ModelBackends {
        zero_shot: Some(Arc::new(FixedZeroShot {
            severity: Severity::Minor,
            department: Department::Roads,
        })),
        vision: None,
        speech: None,
    };
    let response = test_app(backends)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["mode"], "degraded");
}
