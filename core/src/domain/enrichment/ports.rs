use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    enrichment::entities::LookupPage,
    ingredient::entities::{IngredientKey, IngredientRecord},
};

/// Third-party ingredient reference used to fill knowledge base gaps.
#[cfg_attr(test, mockall::automock)]
pub trait IngredientLookup: Send + Sync {
    /// `Ok(None)` when the source has no usable page for `key`.
    fn lookup(
        &self,
        key: &IngredientKey,
    ) -> impl Future<Output = Result<Option<LookupPage>, CoreError>> + Send;
}

/// Best-effort enrichment of unknown ingredients. Never fails the caller.
pub trait EnrichmentService: Send + Sync {
    fn resolve_unknown(
        &self,
        key: &IngredientKey,
        user_id: &str,
    ) -> impl Future<Output = Option<IngredientRecord>> + Send;

    /// Resolves every distinct key of `keys` missing from the knowledge base.
    /// Returns the keys that were added.
    fn enrich_unknown(
        &self,
        keys: &[IngredientKey],
        user_id: &str,
    ) -> impl Future<Output = Vec<IngredientKey>> + Send;
}
