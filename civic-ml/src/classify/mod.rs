//! Modality classifiers and the classification orchestrator

pub mod audio;
pub mod decode;
pub mod image;
pub mod text;

pub use audio::{AudioClassifier, AudioError, TRANSCRIPTION_SAMPLE_RATE};
pub use image::ImageClassifier;
pub use text::TextClassifier;

use crate::backend::ModelBackends;
use crate::fusion;
use crate::types::FusionResult;
use civic_common::api::ClassifyRequest;
use civic_common::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Timeout for fetching referenced images and audio clips
const MEDIA_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Orchestrates the modality classifiers, correction rules, title
/// synthesis, and fusion for one classification request.
///
/// Stateless apart from read-only tables and the backend capability, so it
/// is safe to call from any number of concurrent request handlers.
pub struct ClassificationService {
    text: TextClassifier,
    image: ImageClassifier,
    audio: AudioClassifier,
    degraded: bool,
}

impl ClassificationService {
    pub fn new(backends: ModelBackends) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(MEDIA_FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::Internal(format!("failed to build media fetch client: {e}")))?;

        let degraded = backends.is_degraded();

        Ok(Self {
            text: TextClassifier::new(backends.zero_shot),
            image: ImageClassifier::new(backends.vision, http_client.clone()),
            audio: AudioClassifier::new(backends.speech, http_client),
            degraded,
        })
    }

    /// True when any model backend is missing and heuristics carry the load
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Classify any subset of {text, image, audio} into one fused result.
    ///
    /// Returns `InvalidInput` when the request carries no input at all. The
    /// returned result may still be unusable (every modality degraded); the
    /// API layer reports that as a classification failure rather than a
    /// silently empty success.
    pub async fn classify(&self, request: &ClassifyRequest) -> Result<FusionResult> {
        if request.is_empty() {
            return Err(Error::InvalidInput(
                "at least one of text, image_url, or audio_url must be provided".to_string(),
            ));
        }

        let text_prediction = match request.text.as_deref() {
            Some(text) => Some(self.text.classify(text).await),
            None => None,
        };

        let image_prediction = match request.image_url.as_deref() {
            Some(url) => Some(self.image.classify_url(url).await),
            None => None,
        };

        let audio_prediction = match request.audio_url.as_deref() {
            Some(url) => Some(self.audio.classify_url(url, &self.text).await),
            None => None,
        };

        // Text outranks audio-derived text as the primary channel.
        let primary = if text_prediction.is_some() {
            text_prediction
        } else {
            audio_prediction
        };

        let fused = fusion::fuse(primary.as_ref(), image_prediction.as_ref());

        debug!(
            usable = fused.is_usable(),
            conflict = fused.conflict.is_some(),
            "Fusion complete"
        );

        Ok(fused)
    }

    /// Transcribe uploaded audio bytes and classify the transcript
    pub async fn classify_audio_bytes(
        &self,
        bytes: Vec<u8>,
    ) -> std::result::Result<(String, FusionResult), AudioError> {
        let transcript = self.audio.transcribe_bytes(bytes).await?;
        let prediction = self.text.classify(&transcript).await;
        let fused = fusion::fuse(Some(&prediction), None);
        Ok((transcript, fused))
    }
}
