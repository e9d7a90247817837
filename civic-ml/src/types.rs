//! Base types for the classification pipeline
//!
//! A `ModalityPrediction` is one input channel's opinion; the all-absent
//! value is the explicit "no opinion" sentinel and must be distinguished
//! from a genuine low-confidence prediction. A `FusionResult` is the single
//! combined answer; every fusion path produces this one shape.

use civic_common::labels::{Department, Severity};

/// One modality's classification opinion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalityPrediction {
    pub severity: Option<Severity>,
    pub department: Option<Department>,
    pub title: Option<String>,
    /// Confidence in the severity prediction, 0.0-1.0
    pub severity_confidence: f64,
    /// Confidence in the department prediction, 0.0-1.0
    pub department_confidence: f64,
}

impl ModalityPrediction {
    /// The "no opinion" sentinel for an unavailable or failed modality
    pub fn absent() -> Self {
        Self::default()
    }

    /// True when this modality produced a usable prediction
    pub fn is_usable(&self) -> bool {
        self.severity.is_some()
    }
}

/// Final fused answer for one classification request, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct FusionResult {
    pub severity: Option<Severity>,
    pub department: Option<Department>,
    pub title: String,
    pub severity_confidence: f64,
    pub department_confidence: f64,
    /// Human-readable note, set only when modalities disagreed on the department
    pub conflict: Option<String>,
}

impl FusionResult {
    /// True when at least one modality contributed a real prediction
    pub fn is_usable(&self) -> bool {
        self.severity.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_sentinel_is_not_usable() {
        assert!(!ModalityPrediction::absent().is_usable());
    }

    #[test]
    fn test_low_confidence_prediction_is_still_usable() {
        let prediction = ModalityPrediction {
            severity: Some(Severity::Minor),
            department: Some(Department::Roads),
            title: Some("Road Problem".to_string()),
            severity_confidence: 0.01,
            department_confidence: 0.01,
        };
        assert!(prediction.is_usable());
    }
}
