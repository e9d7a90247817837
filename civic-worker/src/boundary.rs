//! Classification boundary client
//!
//! The pipeline sees the classification service through the
//! `ClassifyBoundary` trait so tests can substitute a fake; the HTTP
//! implementation posts to the civic-ml `/classify` endpoint with a
//! generous timeout to accommodate inference latency.

use async_trait::async_trait;
use civic_common::api::{ClassifyRequest, ClassifyResponse};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Classification boundary errors
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Classification request rejected ({0}): {1}")]
    Rejected(u16, String),

    #[error("Classification service failed ({0}): {1}")]
    Failed(u16, String),

    #[error("Unexpected classification response: {0}")]
    Parse(String),
}

/// The classification boundary as seen by the pipeline
#[async_trait]
pub trait ClassifyBoundary: Send + Sync {
    async fn classify(&self, request: &ClassifyRequest)
        -> Result<ClassifyResponse, ClassifyError>;
}

/// HTTP client for the civic-ml classification service
pub struct HttpClassifyClient {
    http_client: reqwest::Client,
    classify_url: String,
}

impl HttpClassifyClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClassifyError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            classify_url: format!("{}/classify", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl ClassifyBoundary for HttpClassifyClient {
    async fn classify(
        &self,
        request: &ClassifyRequest,
    ) -> Result<ClassifyResponse, ClassifyError> {
        debug!(
            has_text = request.text.is_some(),
            has_image = request.image_url.is_some(),
            "Calling classification service"
        );

        let response = self
            .http_client
            .post(&self.classify_url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.is_client_error() {
                return Err(ClassifyError::Rejected(status.as_u16(), body));
            }
            return Err(ClassifyError::Failed(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| ClassifyError::Parse(e.to_string()))
    }
}
