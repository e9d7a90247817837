//! Classification job model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One queued classification job.
///
/// Read once from the queue, never mutated, discarded after processing —
/// success or terminal failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationJob {
    /// Key of the report this job classifies
    pub report_id: String,
    /// Citizen-supplied issue description
    #[serde(default)]
    pub description: Option<String>,
    /// Reference to an uploaded photo
    #[serde(default)]
    pub image_url: Option<String>,
    /// Caller-supplied placeholder title at submission time
    #[serde(default)]
    pub title: Option<String>,
    /// Producer-side enqueue time
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ClassificationJob {
    /// Build a job for a freshly submitted report
    pub fn new(
        report_id: impl Into<String>,
        description: Option<String>,
        image_url: Option<String>,
        title: Option<String>,
    ) -> Self {
        Self {
            report_id: report_id.into(),
            description,
            image_url,
            title,
            timestamp: Some(Utc::now()),
        }
    }
}
