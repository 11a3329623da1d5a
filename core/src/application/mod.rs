use std::sync::Arc;

use tracing::info;

use crate::{
    domain::{
        common::{InciscopeConfig, services::Service},
        composition::value_objects::ClassificationRules,
        ingredient::{KnowledgeBase, services::load_knowledge_base},
        quota::entities::QuotaLimits,
    },
    infrastructure::{
        enrichment::HttpIngredientLookup, knowledge_base::JsonDatasetSource, quota::QuotaBackend,
    },
};

pub type InciscopeService = Service<QuotaBackend, HttpIngredientLookup>;

/// Builds the production service. A knowledge base that cannot be loaded is fatal.
pub async fn create_service(config: InciscopeConfig) -> Result<InciscopeService, anyhow::Error> {
    let source = JsonDatasetSource::new(config.knowledge_base.path.clone());
    let knowledge_base = load_knowledge_base(&source)?;

    create_service_with_knowledge_base(config, knowledge_base)
}

/// Same as [`create_service`] with an already loaded knowledge base.
pub fn create_service_with_knowledge_base(
    config: InciscopeConfig,
    knowledge_base: KnowledgeBase,
) -> Result<InciscopeService, anyhow::Error> {
    let quota_store = QuotaBackend::from_config(&config.quota)?;
    let ingredient_lookup = HttpIngredientLookup::from_config(&config.enrichment)?;

    let limits = QuotaLimits {
        daily_requests: config.quota.daily_request_limit,
        daily_enrichments: config.quota.daily_enrichment_limit,
    };

    info!(
        ingredients = knowledge_base.len(),
        backend = ?config.quota.backend,
        enrichment = config.enrichment.enabled,
        "inciscope service ready"
    );

    Ok(Service::new(
        Arc::new(knowledge_base),
        quota_store,
        ingredient_lookup,
        limits,
        ClassificationRules::default(),
        config.enrichment.enabled,
    ))
}
