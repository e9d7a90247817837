//! Model backend capability
//!
//! The modality classifiers never reach for a shared global model handle;
//! they receive this capability at construction time. A backend that failed
//! to initialize is represented as `None` — the documented unavailable
//! state — and callers check availability once instead of probing a
//! nullable global on every call.

pub mod inference;

pub use inference::{InferenceClient, InferenceError};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Zero-shot text classification against a fixed candidate label set
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Returns the index of the best candidate label and its score
    async fn classify(
        &self,
        text: &str,
        candidates: &[&str],
    ) -> Result<(usize, f64), InferenceError>;
}

/// Image-against-label-set similarity scoring
#[async_trait]
pub trait VisionScorer: Send + Sync {
    /// Returns the arg-max candidate index and its softmax mass
    async fn score(
        &self,
        image: &[u8],
        candidates: &[&str],
    ) -> Result<(usize, f64), InferenceError>;
}

/// Speech-to-text over mono PCM at a fixed sample rate
#[async_trait]
pub trait SpeechTranscriber: Send + Sync {
    async fn transcribe(&self, samples: &[f32], sample_rate: u32)
        -> Result<String, InferenceError>;
}

/// Injected capability bundling the three optional model backends
#[derive(Clone, Default)]
pub struct ModelBackends {
    pub zero_shot: Option<Arc<dyn ZeroShotClassifier>>,
    pub vision: Option<Arc<dyn VisionScorer>>,
    pub speech: Option<Arc<dyn SpeechTranscriber>>,
}

impl ModelBackends {
    /// Probe the configured inference service once and wire up all three
    /// backends, or return the unavailable state if the probe fails.
    pub async fn connect(base_url: &str, timeout: Duration) -> Self {
        match InferenceClient::connect(base_url, timeout).await {
            Ok(client) => {
                info!(url = %base_url, "Inference service connected");
                let client = Arc::new(client);
                Self {
                    zero_shot: Some(client.clone()),
                    vision: Some(client.clone()),
                    speech: Some(client),
                }
            }
            Err(e) => {
                warn!(
                    url = %base_url,
                    error = %e,
                    "Inference service unavailable, continuing without model backends"
                );
                Self::unavailable()
            }
        }
    }

    /// The fully unavailable state: every modality degrades or falls back
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// True when any backend is missing and classification runs degraded
    pub fn is_degraded(&self) -> bool {
        self.zero_shot.is_none() || self.vision.is_none() || self.speech.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_state_is_degraded() {
        let backends = ModelBackends::unavailable();
        assert!(backends.is_degraded());
        assert!(backends.zero_shot.is_none());
        assert!(backends.vision.is_none());
        assert!(backends.speech.is_none());
    }
}
