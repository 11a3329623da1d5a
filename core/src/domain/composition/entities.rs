use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_timestamp},
    ingredient::entities::IngredientKey,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Skin,
    Hair,
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skin" => Ok(Category::Skin),
            "hair" => Ok(Category::Hair),
            other => Err(CoreError::Invalid(format!("unknown category '{other}'"))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Skin => f.write_str("skin"),
            Category::Hair => f.write_str("hair"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Good,
    Risky,
    Bad,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportEntry {
    pub key: IngredientKey,
    pub display_name: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisReport {
    pub good: Vec<ReportEntry>,
    pub risky: Vec<ReportEntry>,
    pub bad: Vec<ReportEntry>,
    /// 3..=10, higher is better.
    pub score: u8,
    pub recommendations: Vec<String>,
}

/// Result of one `analyze` call: the report plus what the engine saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisOutcome {
    pub id: Uuid,
    pub category: Category,
    pub subtype: String,
    pub goal: String,
    pub ingredients: Vec<IngredientKey>,
    /// Keys learned from the external lookup while serving this request.
    pub enriched: Vec<IngredientKey>,
    pub report: AnalysisReport,
    pub created_at: DateTime<Utc>,
}

impl AnalysisOutcome {
    pub fn new(
        category: Category,
        subtype: String,
        goal: String,
        ingredients: Vec<IngredientKey>,
        enriched: Vec<IngredientKey>,
        report: AnalysisReport,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            category,
            subtype,
            goal,
            ingredients,
            enriched,
            report,
            created_at: now,
        }
    }
}
