//! Department correction rules
//!
//! Deterministic post-filter over the model's department prediction. The
//! zero-shot backend lands lexically specific complaints (mosquitoes,
//! sewage) in the broad Environment / Public Health buckets often enough
//! that a fixed lexical override is applied after classification.
//!
//! Rules are evaluated in a fixed priority order (sanitation, water, roads)
//! and the first matching rule wins.

use crate::lexicon;
use civic_common::labels::Department;
use tracing::debug;

struct CorrectionRule {
    keywords: &'static [&'static str],
    target: Department,
    /// Guard on the currently predicted department
    applies_to: fn(Department) -> bool,
}

const RULES: &[CorrectionRule] = &[
    CorrectionRule {
        keywords: lexicon::SANITATION_CORRECTION_KEYWORDS,
        target: Department::Sanitation,
        applies_to: |current| matches!(current, Department::Environment | Department::Health),
    },
    CorrectionRule {
        keywords: lexicon::WATER_CORRECTION_KEYWORDS,
        target: Department::Water,
        applies_to: |current| current != Department::Water,
    },
    CorrectionRule {
        keywords: lexicon::ROADS_CORRECTION_KEYWORDS,
        target: Department::Roads,
        applies_to: |current| current != Department::Roads,
    },
];

/// Apply lexical override rules to a predicted department.
///
/// The first rule whose keyword set matches the text claims the decision:
/// its guard determines whether the prediction is overridden or kept, and
/// lower-priority rules are not consulted. Pure and idempotent: re-applying
/// to an already corrected department yields the same department.
/// Confidence is left to the caller untouched.
pub fn apply_department_corrections(text: &str, predicted: Department) -> Department {
    let text_lower = text.to_lowercase();

    for rule in RULES {
        if let Some(keyword) = rule.keywords.iter().find(|k| text_lower.contains(*k)) {
            if !(rule.applies_to)(predicted) {
                return predicted;
            }
            debug!(
                keyword = %keyword,
                from = predicted.label(),
                to = rule.target.label(),
                "Correcting department prediction"
            );
            return rule.target;
        }
    }

    predicted
}
