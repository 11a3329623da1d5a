use futures::{StreamExt, stream};
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    common::{MAX_EXTERNAL_TIMEOUT, entities::app_errors::CoreError, services::Service},
    enrichment::{
        entities::LookupPage,
        heuristics::infer_record,
        ports::{EnrichmentService, IngredientLookup},
    },
    ingredient::entities::{IngredientKey, IngredientRecord},
    quota::ports::{QuotaService, QuotaStore},
};

/// Lookups in flight at once for a single request.
pub const ENRICHMENT_CONCURRENCY: usize = 4;

impl<QS, IL> Service<QS, IL>
where
    QS: QuotaStore,
    IL: IngredientLookup,
{
    async fn fetch_page(&self, key: &IngredientKey) -> Result<Option<LookupPage>, CoreError> {
        tokio::time::timeout(MAX_EXTERNAL_TIMEOUT, self.ingredient_lookup.lookup(key))
            .await
            .map_err(|_| CoreError::EnrichmentFailure("lookup timed out".to_string()))?
    }
}

impl<QS, IL> EnrichmentService for Service<QS, IL>
where
    QS: QuotaStore,
    IL: IngredientLookup,
{
    #[instrument(skip(self, key), fields(key = %key))]
    async fn resolve_unknown(&self, key: &IngredientKey, user_id: &str) -> Option<IngredientRecord> {
        if self.knowledge_base.contains(key) {
            debug!("ingredient already known, skipping lookup");
            return None;
        }

        if !self.is_enrichment_allowed(user_id).await {
            debug!("enrichment quota exhausted, skipping lookup");
            return None;
        }

        let page = match self.fetch_page(key).await {
            Ok(Some(page)) => page,
            Ok(None) => {
                debug!("no external data for ingredient");
                return None;
            }
            Err(err) => {
                warn!(error = %err, "ingredient enrichment failed");
                return None;
            }
        };

        let record = infer_record(&page);
        self.record_enrichment(user_id).await;

        if self
            .knowledge_base
            .insert_if_absent(key.clone(), record.clone())
        {
            info!(risk_level = ?record.risk_level, "ingredient added from external lookup");
            Some(record)
        } else {
            debug!("ingredient added concurrently, keeping existing record");
            None
        }
    }

    #[instrument(skip(self, keys), fields(keys = keys.len()))]
    async fn enrich_unknown(&self, keys: &[IngredientKey], user_id: &str) -> Vec<IngredientKey> {
        let missing = self.knowledge_base.missing_keys(keys);
        if missing.is_empty() {
            return Vec::new();
        }

        stream::iter(missing)
            .map(|key| async move {
                self.resolve_unknown(&key, user_id)
                    .await
                    .map(|_| key)
            })
            .buffered(ENRICHMENT_CONCURRENCY)
            .filter_map(|resolved| async move { resolved })
            .collect()
            .await
    }
}
