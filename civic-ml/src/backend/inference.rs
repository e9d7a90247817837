//! HTTP inference service client
//!
//! Talks to the external model host over three endpoints: `/zero-shot`
//! (text classification), `/image-similarity` (vision-language scoring),
//! and `/transcribe` (speech-to-text). Label endpoints answer in the usual
//! zero-shot wire shape — the candidate labels echoed back ordered by
//! descending score — which is mapped back onto candidate indices here so
//! no raw label string travels further.

use super::{SpeechTranscriber, VisionScorer, ZeroShotClassifier};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Timeout for the startup availability probe
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Inference client errors
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Inference API error {0}: {1}")]
    Api(u16, String),

    #[error("Unexpected inference response: {0}")]
    Parse(String),
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct ImageSimilarityRequest<'a> {
    /// Base64-encoded image bytes
    image: String,
    candidate_labels: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct TranscribeRequest {
    /// Base64-encoded little-endian f32 PCM samples
    samples: String,
    sample_rate: u32,
}

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    text: String,
}

/// Candidate labels echoed back ordered by descending score
#[derive(Debug, Deserialize)]
struct LabelScores {
    labels: Vec<String>,
    scores: Vec<f64>,
}

impl LabelScores {
    /// Map the top label back onto its index in the candidate set
    fn best(&self, candidates: &[&str]) -> Result<(usize, f64), InferenceError> {
        let label = self
            .labels
            .first()
            .ok_or_else(|| InferenceError::Parse("empty label list".to_string()))?;
        let score = self.scores.first().copied().unwrap_or(0.0);
        let index = candidates
            .iter()
            .position(|c| *c == label.as_str())
            .ok_or_else(|| {
                InferenceError::Parse(format!("label {label:?} not in candidate set"))
            })?;
        Ok((index, score))
    }
}

/// HTTP client for the external inference service
pub struct InferenceClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl InferenceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InferenceError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client and verify the service answers its health probe
    pub async fn connect(base_url: &str, timeout: Duration) -> Result<Self, InferenceError> {
        let client = Self::new(base_url, timeout)?;

        let url = format!("{}/health", client.base_url);
        let response = client
            .http_client
            .get(&url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Api(status.as_u16(), body));
        }

        Ok(client)
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, InferenceError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Api(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| InferenceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ZeroShotClassifier for InferenceClient {
    async fn classify(
        &self,
        text: &str,
        candidates: &[&str],
    ) -> Result<(usize, f64), InferenceError> {
        tracing::debug!(candidates = candidates.len(), "Zero-shot classification request");

        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: candidates,
            },
        };

        let scores: LabelScores = self.post_json("/zero-shot", &request).await?;
        scores.best(candidates)
    }
}

#[async_trait]
impl VisionScorer for InferenceClient {
    async fn score(
        &self,
        image: &[u8],
        candidates: &[&str],
    ) -> Result<(usize, f64), InferenceError> {
        tracing::debug!(
            image_bytes = image.len(),
            candidates = candidates.len(),
            "Image similarity request"
        );

        let request = ImageSimilarityRequest {
            image: BASE64.encode(image),
            candidate_labels: candidates,
        };

        let scores: LabelScores = self.post_json("/image-similarity", &request).await?;
        scores.best(candidates)
    }
}

#[async_trait]
impl SpeechTranscriber for InferenceClient {
    async fn transcribe(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<String, InferenceError> {
        tracing::debug!(samples = samples.len(), sample_rate, "Transcription request");

        let pcm_bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        let request = TranscribeRequest {
            samples: BASE64.encode(&pcm_bytes),
            sample_rate,
        };

        let response: TranscribeResponse = self.post_json("/transcribe", &request).await?;
        Ok(response.text)
    }
}
