//! Shared classification boundary request/response types
//!
//! Used by the civic-ml service (which serves them) and the civic-worker
//! pipeline (which consumes them), so both sides agree on the wire shape.

use crate::labels::{DepartmentCode, SeverityCode};
use serde::{Deserialize, Serialize};

/// Caller-supplied in-progress placeholder title. The classifier strips it
/// from text input; the worker refuses to persist it as a final title.
pub const PLACEHOLDER_TITLE: &str = "Processing...";

/// Title sentinel meaning "classification produced no usable title"
pub const NO_TITLE: &str = "No title";

/// Classification request accepted by `POST /classify`
///
/// Any subset of the three inputs may be present; at least one must be.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// Free-text issue description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// URL of a photo of the issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// URL of an audio recording describing the issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl ClassifyRequest {
    /// True when no input channel carries any content
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.image_url.is_none() && self.audio_url.is_none()
    }
}

/// Per-field confidence scores, rounded to 3 decimals on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    pub severity: f64,
    pub department: f64,
}

/// Fused classification result returned by the boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub severity: SeverityCode,
    pub department: DepartmentCode,
    pub title: String,
    pub confidence: Confidence,
    /// Human-readable note, present only when modalities disagreed on the department
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<String>,
}

/// Response of the audio-upload variant, which also returns the transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioClassifyResponse {
    pub transcribed_text: String,
    #[serde(flatten)]
    pub classification: ClassifyResponse,
}
