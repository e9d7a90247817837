//! Deterministic short-title synthesis
//!
//! Pure keyword/heuristic title generation, independent of the model
//! backends. Priority order, first match wins:
//! 1. Issue keyword table (longest keyword first)
//! 2. Action pattern table
//! 3. Generic department title, when a department is supplied
//! 4. Content-word extraction from the first few words
//! 5. Truncated first words, or the fixed generic title for empty input

use crate::lexicon;
use civic_common::labels::Department;

/// Fixed fallback title, also returned for empty input
pub const GENERIC_TITLE: &str = "Civic Issue Report";

/// Words considered for the heuristic and fallback titles
const MAX_TITLE_WORDS: usize = 4;

/// Hard cap on fallback title length, including the ellipsis marker
const MAX_TITLE_CHARS: usize = 25;

/// Generate a short human-readable title for an issue description.
///
/// Total and deterministic: any input, including the empty string, yields a
/// non-empty title.
pub fn generate_title(text: &str, department: Option<Department>) -> String {
    let text_lower = text.to_lowercase();

    for (keyword, title) in lexicon::ISSUE_TITLES {
        if text_lower.contains(keyword) {
            return (*title).to_string();
        }
    }

    for (pattern, title) in lexicon::ACTION_TITLES {
        if text_lower.contains(pattern) {
            return (*title).to_string();
        }
    }

    if let Some(department) = department {
        return lexicon::department_title(department).to_string();
    }

    let words: Vec<&str> = text.split_whitespace().collect();

    if words.len() >= 2 {
        let mut key_words: Vec<String> = Vec::new();
        for word in words.iter().take(MAX_TITLE_WORDS) {
            if word.chars().count() > 2 && !lexicon::STOP_WORDS.contains(&word.to_lowercase().as_str())
            {
                key_words.push(title_case(word));
            }
            if key_words.len() >= 2 {
                break;
            }
        }

        if !key_words.is_empty() {
            return format!("{} Issue", key_words.join(" "));
        }
    }

    if !words.is_empty() {
        let title = words
            .iter()
            .take(MAX_TITLE_WORDS)
            .map(|w| title_case(w))
            .collect::<Vec<_>>()
            .join(" ");

        if title.chars().count() > MAX_TITLE_CHARS {
            let truncated: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
            return format!("{}...", truncated);
        }
        return title;
    }

    GENERIC_TITLE.to_string()
}

/// Uppercase the first character of a word, lowercase the rest
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_title() {
        assert_eq!(generate_title("huge pothole on main road", None), "Pothole Issue");
        assert_eq!(
            generate_title("mosquito problem in the area", None),
            "Mosquito Problem"
        );
    }

    #[test]
    fn test_longest_keyword_wins() {
        // "street light" must beat the shorter "light"
        assert_eq!(
            generate_title("the street light is out", None),
            "Streetlight Issue"
        );
    }

    #[test]
    fn test_action_pattern_title() {
        assert_eq!(generate_title("we really should fix this", None), "Fix Required");
        assert_eq!(generate_title("this is everywhere now", None), "Widespread Issue");
    }

    #[test]
    fn test_department_generic_title() {
        assert_eq!(
            generate_title("something odd going around", Some(Department::Electricity)),
            "Electrical Issue"
        );
    }

    #[test]
    fn test_content_word_extraction() {
        let title = generate_title("strange happenings tonight folks", None);
        assert_eq!(title, "Strange Happenings Issue");
    }

    #[test]
    fn test_stop_words_dropped() {
        // only the first four words are scanned, so a single survivor is expected
        let title = generate_title("the and of towering chimney", None);
        assert_eq!(title, "Towering Issue");
    }

    #[test]
    fn test_single_long_word_truncated() {
        let title = generate_title("pneumonoultramicroscopicsilicovolcanoconiosis", None);
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_empty_input_returns_generic() {
        assert_eq!(generate_title("", None), GENERIC_TITLE);
        assert_eq!(generate_title("   ", None), GENERIC_TITLE);
    }

    #[test]
    fn test_deterministic() {
        let a = generate_title("garbage piling up near school", None);
        let b = generate_title("garbage piling up near school", None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_always_non_empty() {
        for input in ["", "a", "it is", "!!!", "the of at", "x y z"] {
            assert!(!generate_title(input, None).is_empty(), "input: {input:?}");
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("WATER"), "Water");
        assert_eq!(title_case("leak"), "Leak");
        assert_eq!(title_case(""), "");
    }
}
