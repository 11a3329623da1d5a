use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    composition::{entities::AnalysisOutcome, value_objects::AnalyzeCompositionInput},
    ingredient::entities::IngredientKey,
};

/// Engine entry point used by the front-end.
#[cfg_attr(test, mockall::automock)]
pub trait CompositionService: Send + Sync {
    /// Quota check, normalization, optional enrichment, classification and
    /// request accounting, in that order.
    fn analyze(
        &self,
        input: AnalyzeCompositionInput,
    ) -> impl Future<Output = Result<AnalysisOutcome, CoreError>> + Send;

    /// Normalization preview; not charged against any quota.
    fn normalize(&self, raw: &str) -> Vec<IngredientKey>;
}
