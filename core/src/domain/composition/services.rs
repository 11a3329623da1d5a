use tracing::{debug, info, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    composition::{
        classifier::classify,
        entities::AnalysisOutcome,
        normalizer::normalize_text,
        ports::CompositionService,
        value_objects::AnalyzeCompositionInput,
    },
    enrichment::ports::{EnrichmentService, IngredientLookup},
    ingredient::entities::IngredientKey,
    quota::ports::{QuotaService, QuotaStore},
};

impl<QS, IL> CompositionService for Service<QS, IL>
where
    QS: QuotaStore,
    IL: IngredientLookup,
{
    #[instrument(
        skip(self, input),
        fields(user_id = %input.user_id, category = %input.category, subtype = %input.subtype)
    )]
    async fn analyze(&self, input: AnalyzeCompositionInput) -> Result<AnalysisOutcome, CoreError> {
        // 1. Gate the whole request
        if !self.is_request_allowed(&input.user_id).await {
            return Err(CoreError::quota_exceeded());
        }

        // 2. Parse the label text
        let raw = input
            .text_input
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or(CoreError::Parse)?;

        let keys = normalize_text(raw);
        if keys.is_empty() {
            return Err(CoreError::Parse);
        }
        debug!(ingredients = keys.len(), "label parsed");

        // 3. Fill knowledge base gaps before the pure classification step
        let enriched = if self.enrichment_enabled {
            self.enrich_unknown(&keys, &input.user_id).await
        } else {
            Vec::new()
        };

        // 4. Classify against a consistent snapshot
        let snapshot = self.knowledge_base.snapshot();
        let report = classify(
            &keys,
            &input.goal,
            input.category,
            &input.subtype,
            &snapshot,
            &self.rules,
        );

        // 5. Charge only once a report exists
        self.record_request(&input.user_id).await;

        info!(
            score = report.score,
            good = report.good.len(),
            risky = report.risky.len(),
            bad = report.bad.len(),
            enriched = enriched.len(),
            "composition analyzed"
        );

        Ok(AnalysisOutcome::new(
            input.category,
            input.subtype,
            input.goal,
            keys,
            enriched,
            report,
        ))
    }

    fn normalize(&self, raw: &str) -> Vec<IngredientKey> {
        normalize_text(raw)
    }
}
