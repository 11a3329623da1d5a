//! Turns free-form label text into canonical ingredient keys.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::ingredient::entities::IngredientKey;

/// Leading "ingredients:" style section labels, in the languages labels are printed in.
static SECTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:ingredients?|ingr[eé]dients|ingredientes|inci|ing|zutaten|composition|состав)\b\.?\s*[:\-–—]?\s*",
    )
    .expect("section label pattern is valid")
});

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;]+").expect("separator pattern is valid"));

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("non-word pattern is valid"));

/// Splits `raw` into ingredient keys, preserving order and duplicates.
///
/// Returns an empty vector when nothing recognizable is left; callers decide
/// whether that is an input error.
pub fn normalize_text(raw: &str) -> Vec<IngredientKey> {
    let body = strip_section_labels(raw);

    let mut keys: Vec<IngredientKey> = SEPARATORS
        .split(body)
        .filter_map(IngredientKey::normalize)
        .collect();

    // A label wrapped in punctuation, like "(Ingredients)", only shows up once normalized.
    let leading_labels = keys
        .iter()
        .take_while(|key| is_section_label(key.as_str()))
        .count();
    keys.drain(..leading_labels);

    keys
}

/// Canonical form of a single segment: punctuation removed, uppercased,
/// whitespace runs joined by `_`.
pub(crate) fn normalize_segment(segment: &str) -> String {
    let cleaned = NON_WORD.replace_all(segment, "");

    cleaned
        .split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}

fn strip_section_labels(raw: &str) -> &str {
    let mut body = raw;
    while let Some(found) = SECTION_LABEL.find(body) {
        if found.end() == 0 {
            break;
        }
        body = &body[found.end()..];
    }
    body
}

fn is_section_label(key: &str) -> bool {
    SECTION_LABEL
        .find(key)
        .is_some_and(|found| found.end() == key.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &str) -> Vec<String> {
        normalize_text(raw)
            .into_iter()
            .map(|key| key.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_preserves_input_order() {
        assert_eq!(
            keys("Aqua, Glycerin, Panthenol"),
            vec!["AQUA", "GLYCERIN", "PANTHENOL"]
        );
    }

    #[test]
    fn test_strips_section_labels() {
        assert_eq!(keys("Ingredients: Aqua; Glycerin"), vec!["AQUA", "GLYCERIN"]);
        assert_eq!(keys("ING - Aqua, Parfum"), vec!["AQUA", "PARFUM"]);
        assert_eq!(keys("Состав: Aqua, Glycerin"), vec!["AQUA", "GLYCERIN"]);
        assert_eq!(keys("  INGREDIENT:Aqua"), vec!["AQUA"]);
    }

    #[test]
    fn test_strips_labels_wrapped_in_punctuation() {
        assert_eq!(keys("(Ingredients), Aqua, Glycerin"), vec!["AQUA", "GLYCERIN"]);
        assert_eq!(keys("[INCI]; (Состав), Aqua"), vec!["AQUA"]);
        assert_eq!(keys("(INCI) Aqua"), vec!["INCI_AQUA"]);
    }

    #[test]
    fn test_label_is_only_stripped_when_leading() {
        assert_eq!(
            keys("Aqua, Cleansing Agent, Ingredients"),
            vec!["AQUA", "CLEANSING_AGENT", "INGREDIENTS"]
        );
    }

    #[test]
    fn test_label_prefix_of_longer_word_is_kept() {
        assert_eq!(keys("Inga Extract, Aqua"), vec!["INGA_EXTRACT", "AQUA"]);
    }

    #[test]
    fn test_repeated_separators_and_punctuation() {
        assert_eq!(
            keys("Aqua (Water),, Sodium Laureth-Sulfate;;; Parfum."),
            vec!["AQUA_WATER", "SODIUM_LAURETHSULFATE", "PARFUM"]
        );
    }

    #[test]
    fn test_collapses_internal_whitespace() {
        assert_eq!(
            keys("Sodium   Laureth\n Sulfate, \tCetearyl Alcohol "),
            vec!["SODIUM_LAURETH_SULFATE", "CETEARYL_ALCOHOL"]
        );
    }

    #[test]
    fn test_duplicates_are_preserved() {
        assert_eq!(keys("Aqua, Glycerin, Aqua"), vec!["AQUA", "GLYCERIN", "AQUA"]);
    }

    #[test]
    fn test_empty_and_punctuation_only_input() {
        assert!(normalize_text("").is_empty());
        assert!(normalize_text("   ").is_empty());
        assert!(normalize_text(", ; ,, ...").is_empty());
        assert!(normalize_text("Ingredients:").is_empty());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = [
            "Aqua, Glycerin, Panthenol",
            "Ingredients: Aqua (Water); Sodium Laureth Sulfate, Parfum/Fragrance",
            "Состав: Масло ши, Aqua, Composition, Aqua",
            "(Ingredients), Aqua",
            "(INCI) Aqua, [Ingredients], Glycerin",
        ];

        for input in inputs {
            let once = normalize_text(input);
            let joined = once
                .iter()
                .map(IngredientKey::as_str)
                .collect::<Vec<_>>()
                .join(", ");

            assert_eq!(normalize_text(&joined), once, "input: {input}");
        }
    }
}
