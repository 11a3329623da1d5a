//! Deterministic goal-sensitive classification of normalized ingredients.

use crate::domain::{
    composition::{
        entities::{AnalysisReport, Bucket, Category, ReportEntry},
        value_objects::ClassificationRules,
    },
    ingredient::{
        entities::{IngredientKey, IngredientRecord, RiskLevel},
        knowledge_base::IngredientMap,
    },
};

pub const UNKNOWN_NOTE: &str = "no data in base";
pub const MIN_SCORE: u8 = 3;
pub const MAX_SCORE: u8 = 10;

/// Buckets every key in input order and scores the result.
///
/// `category` and `subtype` do not influence the decision table yet. Keys
/// missing from `kb` are reported as risky; this function never performs
/// lookups of its own.
pub fn classify(
    keys: &[IngredientKey],
    goal: &str,
    _category: Category,
    _subtype: &str,
    kb: &IngredientMap,
    rules: &ClassificationRules,
) -> AnalysisReport {
    let goal_sensitive = rules.goal_is_sensitive(goal);

    let mut good = Vec::new();
    let mut risky = Vec::new();
    let mut bad = Vec::new();

    for key in keys {
        let record = kb.get(key);
        let entry = report_entry(key, record);

        match bucket_for(record, goal_sensitive, rules) {
            Bucket::Good => good.push(entry),
            Bucket::Risky => risky.push(entry),
            Bucket::Bad => bad.push(entry),
        }
    }

    let score = score(bad.len(), risky.len());

    AnalysisReport {
        good,
        risky,
        bad,
        score,
        recommendations: rules.recommendations.clone(),
    }
}

/// First matching row of the decision table.
pub fn bucket_for(
    record: Option<&IngredientRecord>,
    goal_sensitive: bool,
    rules: &ClassificationRules,
) -> Bucket {
    let Some(record) = record else {
        return Bucket::Risky;
    };

    match record.risk_level {
        RiskLevel::Low => Bucket::Good,
        RiskLevel::High if goal_sensitive && record.is_adverse_for_any(&rules.strict_avoid_tags) => {
            Bucket::Bad
        }
        RiskLevel::High | RiskLevel::Medium => Bucket::Risky,
    }
}

/// `10 - 2*bad - risky/2`, clamped to `MIN_SCORE..=MAX_SCORE`.
pub fn score(bad: usize, risky: usize) -> u8 {
    let penalty = bad.saturating_mul(2).saturating_add(risky / 2);
    let raw = i64::from(MAX_SCORE) - i64::try_from(penalty).unwrap_or(i64::MAX);

    raw.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE)) as u8
}

fn report_entry(key: &IngredientKey, record: Option<&IngredientRecord>) -> ReportEntry {
    match record {
        Some(record) => ReportEntry {
            key: key.clone(),
            display_name: record.display_name.clone(),
            note: record.notes.clone(),
        },
        None => ReportEntry {
            key: key.clone(),
            display_name: format!("{key} (unknown)"),
            note: UNKNOWN_NOTE.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::composition::normalizer::normalize_text;

    fn key(raw: &str) -> IngredientKey {
        IngredientKey::normalize(raw).unwrap()
    }

    fn sample_kb() -> IngredientMap {
        HashMap::from([
            (
                key("Aqua"),
                IngredientRecord::new("Вода", RiskLevel::Low, "Основа", Vec::<String>::new()),
            ),
            (
                key("Glycerin"),
                IngredientRecord::new("Глицерин", RiskLevel::Low, "Увлажнитель", Vec::<String>::new()),
            ),
            (
                key("Sodium Laureth Sulfate"),
                IngredientRecord::new(
                    "Лауретсульфат натрия",
                    RiskLevel::High,
                    "Агрессивное ПАВ",
                    ["сухие волосы"],
                ),
            ),
            (
                key("Parfum"),
                IngredientRecord::new("Отдушка", RiskLevel::High, "Аллерген", ["жирная кожа"]),
            ),
            (
                key("Dimethicone"),
                IngredientRecord::new("Диметикон", RiskLevel::Medium, "Силикон", Vec::<String>::new()),
            ),
        ])
    }

    fn run(raw: &str, goal: &str) -> AnalysisReport {
        classify(
            &normalize_text(raw),
            goal,
            Category::Hair,
            "Шампунь",
            &sample_kb(),
            &ClassificationRules::default(),
        )
    }

    fn bucket_keys(entries: &[ReportEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.key.as_str()).collect()
    }

    #[test]
    fn test_goal_trigger_with_strict_tag_is_bad() {
        let report = run("Sodium Laureth Sulfate", "сухие волосы, нужно увлажнение");

        assert_eq!(bucket_keys(&report.bad), vec!["SODIUM_LAURETH_SULFATE"]);
        assert!(report.risky.is_empty());
    }

    #[test]
    fn test_goal_without_trigger_keeps_high_risk_as_risky() {
        let report = run("Sodium Laureth Sulfate", "жирные волосы");

        assert!(report.bad.is_empty());
        assert_eq!(bucket_keys(&report.risky), vec!["SODIUM_LAURETH_SULFATE"]);
    }

    #[test]
    fn test_goal_trigger_without_strict_tag_is_risky() {
        let report = run("Parfum", "чувствительная кожа");

        assert!(report.bad.is_empty());
        assert_eq!(bucket_keys(&report.risky), vec!["PARFUM"]);
    }

    #[test]
    fn test_unknown_ingredient_is_risky_for_any_goal() {
        for goal in ["сухие волосы", "жирные волосы", ""] {
            let report = run("Mystery Extract", goal);

            assert_eq!(report.risky.len(), 1, "goal: {goal}");
            assert_eq!(report.risky[0].display_name, "MYSTERY_EXTRACT (unknown)");
            assert_eq!(report.risky[0].note, UNKNOWN_NOTE);
        }
    }

    #[test]
    fn test_buckets_preserve_input_order() {
        let report = run(
            "Glycerin, Dimethicone, Aqua, Mystery, Parfum",
            "объём",
        );

        assert_eq!(bucket_keys(&report.good), vec!["GLYCERIN", "AQUA"]);
        assert_eq!(
            bucket_keys(&report.risky),
            vec!["DIMETHICONE", "MYSTERY", "PARFUM"]
        );
        assert_eq!(report.good[0].display_name, "Глицерин");
        assert_eq!(report.good[0].note, "Увлажнитель");
    }

    #[test]
    fn test_empty_keys_give_perfect_score() {
        let report = classify(
            &[],
            "сухая кожа",
            Category::Skin,
            "Лицо",
            &sample_kb(),
            &ClassificationRules::default(),
        );

        assert!(report.good.is_empty() && report.risky.is_empty() && report.bad.is_empty());
        assert_eq!(report.score, 10);
        assert_eq!(report.recommendations.len(), 3);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let first = run("Aqua, Sodium Laureth Sulfate, Parfum, X", "сухие волосы");
        let second = run("Aqua, Sodium Laureth Sulfate, Parfum, X", "сухие волосы");

        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(score(0, 0), 10);
        assert_eq!(score(0, 1), 10);
        assert_eq!(score(0, 3), 9);
        assert_eq!(score(1, 2), 7);
        assert_eq!(score(2, 4), 4);
    }

    #[test]
    fn test_score_stays_within_bounds() {
        for bad in 0..40 {
            for risky in 0..40 {
                let score = score(bad, risky);
                assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
            }
        }
        assert_eq!(score(usize::MAX, usize::MAX), MIN_SCORE);
    }

    #[test]
    fn test_duplicates_count_twice() {
        let report = run("Parfum, Parfum, Parfum, Parfum", "");

        assert_eq!(report.risky.len(), 4);
        assert_eq!(report.score, 8);
    }
}
