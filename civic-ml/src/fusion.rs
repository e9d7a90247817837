//! Multi-modal fusion engine
//!
//! Combines at most one primary prediction (text, or audio-derived text when
//! no text was supplied) with at most one image prediction into a single
//! `FusionResult`. Free text is the most information-dense channel, so the
//! primary modality supplies the title and wins severity ties; department
//! disagreements are surfaced as a conflict note instead of being silently
//! resolved.

use crate::types::{FusionResult, ModalityPrediction};
use civic_common::api::NO_TITLE;
use civic_common::labels::Department;
use tracing::debug;

/// Fuse the primary and image predictions into one result.
///
/// Unusable (absent-sentinel) predictions are treated as not present. When
/// neither side is usable the returned result is itself unusable; the
/// classification boundary reports that as a failure, never as success.
pub fn fuse(
    primary: Option<&ModalityPrediction>,
    image: Option<&ModalityPrediction>,
) -> FusionResult {
    let primary = primary.filter(|p| p.is_usable());
    let image = image.filter(|p| p.is_usable());

    match (primary, image) {
        (Some(primary), Some(image)) => {
            // Higher severity rank wins; ties resolve toward the primary.
            let (severity, severity_confidence) = if primary.severity >= image.severity {
                (primary.severity, primary.severity_confidence)
            } else {
                (image.severity, image.severity_confidence)
            };

            let (department, department_confidence, conflict) =
                if primary.department == image.department {
                    (
                        primary.department,
                        primary.department_confidence.max(image.department_confidence),
                        None,
                    )
                } else {
                    (
                        primary.department,
                        primary.department_confidence,
                        conflict_note(primary.department, image.department),
                    )
                };

            if let Some(note) = &conflict {
                debug!(conflict = %note, "Department disagreement between modalities");
            }

            FusionResult {
                severity,
                department,
                title: primary
                    .title
                    .clone()
                    .unwrap_or_else(|| crate::title::GENERIC_TITLE.to_string()),
                severity_confidence,
                department_confidence,
                conflict,
            }
        }
        (Some(only), None) | (None, Some(only)) => FusionResult {
            severity: only.severity,
            department: only.department,
            title: only
                .title
                .clone()
                .unwrap_or_else(|| crate::title::GENERIC_TITLE.to_string()),
            severity_confidence: only.severity_confidence,
            department_confidence: only.department_confidence,
            conflict: None,
        },
        (None, None) => FusionResult {
            severity: None,
            department: None,
            title: NO_TITLE.to_string(),
            severity_confidence: 0.0,
            department_confidence: 0.0,
            conflict: None,
        },
    }
}

fn conflict_note(primary: Option<Department>, image: Option<Department>) -> Option<String> {
    match (primary, image) {
        (Some(primary), Some(image)) => Some(format!(
            "Text suggests {}, image suggests {}",
            primary.label(),
            image.label()
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_common::labels::Severity;

    fn prediction(
        severity: Severity,
        department: Department,
        title: &str,
        severity_confidence: f64,
        department_confidence: f64,
    ) -> ModalityPrediction {
        ModalityPrediction {
            severity: Some(severity),
            department: Some(department),
            title: Some(title.to_string()),
            severity_confidence,
            department_confidence,
        }
    }

    #[test]
    fn test_severity_escalates_to_max_both_directions() {
        let severe = prediction(Severity::Severe, Department::Roads, "Pothole Issue", 0.9, 0.8);
        let minor = prediction(Severity::Minor, Department::Roads, "Road Problem", 0.7, 0.6);

        let fused = fuse(Some(&severe), Some(&minor));
        assert_eq!(fused.severity, Some(Severity::Severe));

        let fused = fuse(Some(&minor), Some(&severe));
        assert_eq!(fused.severity, Some(Severity::Severe));
    }

    #[test]
    fn test_severity_confidence_travels_with_winner() {
        let text = prediction(Severity::Minor, Department::Roads, "Road Problem", 0.95, 0.6);
        let image = prediction(Severity::Severe, Department::Roads, "Issue in Roads", 0.42, 0.6);

        let fused = fuse(Some(&text), Some(&image));
        assert_eq!(fused.severity, Some(Severity::Severe));
        assert_eq!(fused.severity_confidence, 0.42);
    }

    #[test]
    fn test_severity_tie_resolves_toward_primary() {
        let text = prediction(Severity::Moderate, Department::Water, "Water Leak", 0.8, 0.7);
        let image = prediction(Severity::Moderate, Department::Water, "Issue in Water", 0.5, 0.6);

        let fused = fuse(Some(&text), Some(&image));
        assert_eq!(fused.severity_confidence, 0.8);
    }

    #[test]
    fn test_department_agreement_takes_max_confidence() {
        let text = prediction(Severity::Moderate, Department::Water, "Water Leak", 0.8, 0.6);
        let image = prediction(Severity::Minor, Department::Water, "Issue in Water", 0.5, 0.9);

        let fused = fuse(Some(&text), Some(&image));
        assert_eq!(fused.department, Some(Department::Water));
        assert_eq!(fused.department_confidence, 0.9);
        assert!(fused.conflict.is_none());
    }

    #[test]
    fn test_department_conflict_keeps_primary_and_notes_both() {
        let text = prediction(Severity::Severe, Department::Roads, "Pothole Issue", 0.9, 0.8);
        let image = prediction(
            Severity::Minor,
            Department::Electricity,
            "Issue in Electricity",
            0.4,
            0.5,
        );

        let fused = fuse(Some(&text), Some(&image));
        assert_eq!(fused.severity, Some(Severity::Severe));
        assert_eq!(fused.department, Some(Department::Roads));
        assert_eq!(fused.department_confidence, 0.8);
        assert_eq!(fused.title, "Pothole Issue");

        let note = fused.conflict.expect("conflict note expected");
        assert!(note.contains("Roads and Transport"));
        assert!(note.contains("Electricity and Streetlights"));
    }

    #[test]
    fn test_title_always_from_primary() {
        let text = prediction(Severity::Minor, Department::Roads, "Road Problem", 0.5, 0.5);
        let image = prediction(
            Severity::Severe,
            Department::Electricity,
            "Issue in Electricity",
            0.9,
            0.9,
        );

        // image drives severity, text still owns the title
        let fused = fuse(Some(&text), Some(&image));
        assert_eq!(fused.severity, Some(Severity::Severe));
        assert_eq!(fused.title, "Road Problem");
    }

    #[test]
    fn test_single_modality_passes_through() {
        let image = prediction(
            Severity::Moderate,
            Department::Electricity,
            "Issue in Electricity",
            0.6,
            0.7,
        );

        let fused = fuse(None, Some(&image));
        assert_eq!(fused.severity, Some(Severity::Moderate));
        assert_eq!(fused.department, Some(Department::Electricity));
        assert_eq!(fused.title, "Issue in Electricity");
        assert_eq!(fused.severity_confidence, 0.6);
        assert!(fused.conflict.is_none());
    }

    #[test]
    fn test_absent_sentinel_is_ignored() {
        let absent = ModalityPrediction::absent();
        let text = prediction(Severity::Minor, Department::Water, "Water Issue", 0.7, 0.7);

        let fused = fuse(Some(&text), Some(&absent));
        assert_eq!(fused.severity, Some(Severity::Minor));
        assert!(fused.conflict.is_none());
    }

    #[test]
    fn test_no_usable_input_is_terminal_and_unusable() {
        let absent = ModalityPrediction::absent();
        let fused = fuse(Some(&absent), Some(&absent));

        assert!(!fused.is_usable());
        assert_eq!(fused.severity, None);
        assert_eq!(fused.department, None);
        assert_eq!(fused.title, NO_TITLE);
        assert_eq!(fused.severity_confidence, 0.0);
        assert_eq!(fused.department_confidence, 0.0);
    }
}
