//! Audio modality classifier
//!
//! Owns no classification logic of its own: fetches and decodes the
//! referenced audio at a fixed sample rate, transcribes it via the speech
//! backend, and delegates entirely to the text classifier on the
//! transcript.

use crate::backend::{InferenceError, SpeechTranscriber};
use crate::classify::decode::{self, DecodeError};
use crate::classify::text::TextClassifier;
use crate::types::ModalityPrediction;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed sample rate expected by the speech backend
pub const TRANSCRIPTION_SAMPLE_RATE: u32 = 16_000;

/// Audio pipeline errors
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Speech backend unavailable")]
    Unavailable,

    #[error("Audio fetch failed: {0}")]
    Fetch(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Decode task failed: {0}")]
    Join(String),
}

/// Audio modality classifier
pub struct AudioClassifier {
    backend: Option<Arc<dyn SpeechTranscriber>>,
    http_client: reqwest::Client,
}

impl AudioClassifier {
    pub fn new(backend: Option<Arc<dyn SpeechTranscriber>>, http_client: reqwest::Client) -> Self {
        Self {
            backend,
            http_client,
        }
    }

    /// Classify the audio behind a URL by transcribing it and delegating to
    /// the text classifier. Any failure degrades to the absent sentinel.
    pub async fn classify_url(
        &self,
        audio_url: &str,
        text_classifier: &TextClassifier,
    ) -> ModalityPrediction {
        match self.transcribe_url(audio_url).await {
            Ok(transcript) => {
                debug!(transcript = %transcript, "Audio transcription complete");
                text_classifier.classify(&transcript).await
            }
            Err(e) => {
                warn!(url = %audio_url, error = %e, "Audio classification failed, treating modality as absent");
                ModalityPrediction::absent()
            }
        }
    }

    /// Fetch and transcribe the audio behind a URL
    pub async fn transcribe_url(&self, audio_url: &str) -> Result<String, AudioError> {
        let response = self
            .http_client
            .get(audio_url)
            .send()
            .await
            .map_err(|e| AudioError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AudioError::Fetch(format!(
                "status {} fetching {}",
                status, audio_url
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioError::Fetch(e.to_string()))?;

        self.transcribe_bytes(bytes.to_vec()).await
    }

    /// Decode raw audio bytes, resample to the fixed transcription rate,
    /// and transcribe via the speech backend.
    pub async fn transcribe_bytes(&self, bytes: Vec<u8>) -> Result<String, AudioError> {
        let backend = self.backend.as_ref().ok_or(AudioError::Unavailable)?;

        // Decode is CPU-bound; keep it off the async worker threads.
        let samples = tokio::task::spawn_blocking(move || -> Result<Vec<f32>, DecodeError> {
            let decoded = decode::decode_to_mono(bytes)?;
            decode::resample(decoded.samples, decoded.sample_rate, TRANSCRIPTION_SAMPLE_RATE)
        })
        .await
        .map_err(|e| AudioError::Join(e.to_string()))??;

        let transcript = backend
            .transcribe(&samples, TRANSCRIPTION_SAMPLE_RATE)
            .await?;

        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_backend_errors() {
        let classifier = AudioClassifier::new(None, reqwest::Client::new());
        let result = classifier.transcribe_bytes(vec![0u8; 16]).await;
        assert!(matches!(result, Err(AudioError::Unavailable)));
    }

    #[tokio::test]
    async fn test_missing_backend_classifies_as_absent() {
        let classifier = AudioClassifier::new(None, reqwest::Client::new());
        let text = TextClassifier::new(None);
        let prediction = classifier
            .classify_url("http://example.invalid/clip.wav", &text)
            .await;
        assert!(!prediction.is_usable());
    }
}
