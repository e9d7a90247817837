//! Text modality classifier
//!
//! Classifies free text with two independent zero-shot calls (severity
//! label set, department label set), then applies the department correction
//! rules and synthesizes a title. Falls back to a deterministic
//! keyword-scored classifier when no zero-shot backend is available.
//! Failures never escape: anything unexpected degrades to the absent
//! sentinel with a logged cause.

use crate::backend::ZeroShotClassifier;
use crate::types::ModalityPrediction;
use crate::{corrections, lexicon, title};
use civic_common::api::PLACEHOLDER_TITLE;
use civic_common::labels::{Department, Severity};
use std::sync::Arc;
use tracing::{debug, warn};

/// Text modality classifier
pub struct TextClassifier {
    backend: Option<Arc<dyn ZeroShotClassifier>>,
}

impl TextClassifier {
    pub fn new(backend: Option<Arc<dyn ZeroShotClassifier>>) -> Self {
        Self { backend }
    }

    /// Classify free text into a modality prediction.
    ///
    /// Returns the absent sentinel when the cleaned text is empty or a
    /// model call fails; callers must treat that as "no opinion".
    pub async fn classify(&self, text: &str) -> ModalityPrediction {
        let clean = clean_text(text);
        if clean.is_empty() {
            debug!("Text empty after cleaning, no text prediction");
            return ModalityPrediction::absent();
        }

        match &self.backend {
            Some(backend) => self.classify_with_model(backend.as_ref(), &clean).await,
            None => keyword_classify(&clean),
        }
    }

    async fn classify_with_model(
        &self,
        backend: &dyn ZeroShotClassifier,
        clean: &str,
    ) -> ModalityPrediction {
        let severity_labels: Vec<&str> = Severity::ALL.iter().map(|s| s.label()).collect();
        let department_labels: Vec<&str> = Department::ALL.iter().map(|d| d.label()).collect();

        let severity_result = backend.classify(clean, &severity_labels).await;
        let department_result = backend.classify(clean, &department_labels).await;

        let ((severity_idx, severity_confidence), (department_idx, department_confidence)) =
            match (severity_result, department_result) {
                (Ok(s), Ok(d)) => (s, d),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(error = %e, "Text classification failed, treating modality as absent");
                    return ModalityPrediction::absent();
                }
            };

        let (Some(severity), Some(department)) = (
            Severity::ALL.get(severity_idx).copied(),
            Department::ALL.get(department_idx).copied(),
        ) else {
            warn!(
                severity_idx,
                department_idx, "Backend returned out-of-range label index"
            );
            return ModalityPrediction::absent();
        };

        let department = corrections::apply_department_corrections(clean, department);
        let title = title::generate_title(clean, Some(department));

        debug!(
            severity = severity.label(),
            department = department.label(),
            severity_confidence,
            department_confidence,
            "Text classification complete"
        );

        ModalityPrediction {
            severity: Some(severity),
            department: Some(department),
            title: Some(title),
            severity_confidence,
            department_confidence,
        }
    }
}

/// Strip the placeholder marker and surrounding whitespace
fn clean_text(text: &str) -> String {
    text.replace(PLACEHOLDER_TITLE, "").trim().to_string()
}

/// Deterministic keyword-scored fallback used without a zero-shot backend.
///
/// Severity: Severe on any high-severity keyword, else Minor on any
/// low-severity keyword, else Moderate. Department: most keyword hits wins,
/// confidence min(0.9, 0.5 + 0.1 x hits); defaults to Public Health.
fn keyword_classify(text: &str) -> ModalityPrediction {
    let text_lower = text.to_lowercase();

    let (severity, severity_confidence) = if lexicon::HIGH_SEVERITY_KEYWORDS
        .iter()
        .any(|k| text_lower.contains(k))
    {
        (Severity::Severe, 0.8)
    } else if lexicon::LOW_SEVERITY_KEYWORDS
        .iter()
        .any(|k| text_lower.contains(k))
    {
        (Severity::Minor, 0.7)
    } else {
        (Severity::Moderate, 0.6)
    };

    let mut department = Department::Health;
    let mut department_confidence = 0.5;
    let mut max_matches = 0;

    for candidate in Department::ALL {
        let matches = lexicon::department_keywords(candidate)
            .iter()
            .filter(|k| text_lower.contains(*k))
            .count();
        if matches > max_matches {
            max_matches = matches;
            department = candidate;
            department_confidence = (0.5 + 0.1 * matches as f64).min(0.9);
        }
    }

    let title = title::generate_title(text, Some(department));

    debug!(
        severity = severity.label(),
        department = department.label(),
        keyword_matches = max_matches,
        "Keyword fallback classification complete"
    );

    ModalityPrediction {
        severity: Some(severity),
        department: Some(department),
        title: Some(title),
        severity_confidence,
        department_confidence,
    }
}
