//! Image modality classifier
//!
//! Fetches the referenced image and runs two independent similarity
//! scorings (severity labels, department labels) through the
//! vision-language backend. The title is synthesized generically from the
//! predicted department; no keyword extraction happens for images.

use crate::backend::{InferenceError, VisionScorer};
use crate::types::ModalityPrediction;
use civic_common::labels::{Department, Severity};
use std::sync::Arc;
use tracing::{debug, warn};

/// Image modality classifier
pub struct ImageClassifier {
    backend: Option<Arc<dyn VisionScorer>>,
    http_client: reqwest::Client,
}

impl ImageClassifier {
    pub fn new(backend: Option<Arc<dyn VisionScorer>>, http_client: reqwest::Client) -> Self {
        Self {
            backend,
            http_client,
        }
    }

    /// Classify the image behind a URL into a modality prediction.
    ///
    /// Fetch, decode, and backend failures all degrade to the absent
    /// sentinel with a logged cause.
    pub async fn classify_url(&self, image_url: &str) -> ModalityPrediction {
        let Some(backend) = &self.backend else {
            debug!("Vision backend unavailable, no image prediction");
            return ModalityPrediction::absent();
        };

        match self.classify_inner(backend.as_ref(), image_url).await {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(url = %image_url, error = %e, "Image classification failed, treating modality as absent");
                ModalityPrediction::absent()
            }
        }
    }

    async fn classify_inner(
        &self,
        backend: &dyn VisionScorer,
        image_url: &str,
    ) -> Result<ModalityPrediction, InferenceError> {
        let response = self
            .http_client
            .get(image_url)
            .send()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::Api(status.as_u16(), image_url.to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        let severity_labels: Vec<&str> = Severity::ALL.iter().map(|s| s.label()).collect();
        let department_labels: Vec<&str> = Department::ALL.iter().map(|d| d.label()).collect();

        let (severity_idx, severity_confidence) = backend.score(&bytes, &severity_labels).await?;
        let (department_idx, department_confidence) =
            backend.score(&bytes, &department_labels).await?;

        let (Some(severity), Some(department)) = (
            Severity::ALL.get(severity_idx).copied(),
            Department::ALL.get(department_idx).copied(),
        ) else {
            return Err(InferenceError::Parse(
                "backend returned out-of-range label index".to_string(),
            ));
        };

        let title = format!("Issue in {}", department.code().as_str());

        debug!(
            severity = severity.label(),
            department = department.label(),
            severity_confidence,
            department_confidence,
            "Image classification complete"
        );

        Ok(ModalityPrediction {
            severity: Some(severity),
            department: Some(department),
            title: Some(title),
            severity_confidence,
            department_confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_backend_is_absent() {
        let classifier = ImageClassifier::new(None, reqwest::Client::new());
        let prediction = classifier.classify_url("http://example.com/a.jpg").await;
        assert!(!prediction.is_usable());
    }
}
