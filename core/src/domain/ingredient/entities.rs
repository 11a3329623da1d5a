use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::composition::normalizer::normalize_segment;

/// Canonical ingredient identifier, e.g. `SODIUM_LAURETH_SULFATE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "SODIUM_LAURETH_SULFATE")]
pub struct IngredientKey(String);

impl IngredientKey {
    /// Normalizes one label token. Returns `None` when nothing survives.
    pub fn normalize(raw: &str) -> Option<Self> {
        let key = normalize_segment(raw);
        if key.is_empty() { None } else { Some(Self(key)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IngredientKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One knowledge base entry. Field names follow the dataset file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientRecord {
    #[serde(rename = "name_ru", alias = "display_name")]
    pub display_name: String,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "bad_for", default)]
    pub adverse_for: BTreeSet<String>,
}

impl IngredientRecord {
    pub fn new(
        display_name: impl Into<String>,
        risk_level: RiskLevel,
        notes: impl Into<String>,
        adverse_for: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            risk_level,
            notes: notes.into(),
            adverse_for: adverse_for.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_adverse_for_any(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.adverse_for.contains(tag))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientEntry {
    pub key: IngredientKey,
    #[serde(flatten)]
    pub record: IngredientRecord,
}
