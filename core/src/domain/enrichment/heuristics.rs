//! Keyword-based risk inference for scraped ingredient descriptions.
//!
//! Output only fills gaps in the curated base and never replaces it.

use std::collections::BTreeSet;

use crate::domain::{
    enrichment::entities::LookupPage,
    ingredient::entities::{IngredientRecord, RiskLevel},
};

const HIGH_RISK_MARKERS: &[&str] = &["irritant", "allergen", "toxic", "sensitizer", "carcinogen"];

/// Marker found in a description and the profile tag it implies.
const ADVERSE_TAGS: &[(&str, &str)] = &[
    ("irritant", "sensitive skin"),
    ("allergen", "sensitive skin"),
    ("sensitizer", "sensitive skin"),
    ("drying", "dry hair"),
    ("stripping", "dry hair"),
];

const NEGATIONS: &[&str] = &["non-", "non ", "not an ", "not a ", "not "];

const MAX_NOTE_CHARS: usize = 200;

pub fn infer_record(page: &LookupPage) -> IngredientRecord {
    let description = page.description.to_lowercase();

    let risk_level = if HIGH_RISK_MARKERS
        .iter()
        .any(|marker| mentions(&description, marker))
    {
        RiskLevel::High
    } else {
        RiskLevel::Low
    };

    let adverse_for: BTreeSet<String> = ADVERSE_TAGS
        .iter()
        .filter(|(marker, _)| mentions(&description, marker))
        .map(|(_, tag)| tag.to_string())
        .collect();

    IngredientRecord {
        display_name: page.title.trim().to_string(),
        risk_level,
        notes: summarize(&page.description),
        adverse_for,
    }
}

/// True if `marker` occurs at least once without a negation right before it.
fn mentions(text: &str, marker: &str) -> bool {
    text.match_indices(marker).any(|(start, _)| {
        let before = &text[..start];
        !NEGATIONS.iter().any(|negation| before.ends_with(negation))
    })
}

/// First sentence of the description, capped at `MAX_NOTE_CHARS` characters.
fn summarize(description: &str) -> String {
    let trimmed = description.trim();
    let sentence = trimmed
        .find(". ")
        .map(|end| &trimmed[..=end])
        .unwrap_or(trimmed);

    if sentence.chars().count() <= MAX_NOTE_CHARS {
        return sentence.to_string();
    }

    let mut note: String = sentence.chars().take(MAX_NOTE_CHARS - 1).collect();
    note.push('…');
    note
}
