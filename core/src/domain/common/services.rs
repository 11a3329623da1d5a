use std::sync::Arc;

use crate::domain::{
    composition::value_objects::ClassificationRules,
    enrichment::ports::IngredientLookup,
    ingredient::knowledge_base::KnowledgeBase,
    quota::{
        entities::{QuotaLimits, StoreHealth},
        ports::QuotaStore,
    },
};

/// Dependency container every domain service trait is implemented on.
pub struct Service<QS, IL>
where
    QS: QuotaStore,
    IL: IngredientLookup,
{
    pub(crate) knowledge_base: Arc<KnowledgeBase>,
    pub(crate) quota_store: Arc<QS>,
    pub(crate) ingredient_lookup: Arc<IL>,
    pub(crate) store_health: Arc<StoreHealth>,
    pub(crate) limits: QuotaLimits,
    pub(crate) rules: Arc<ClassificationRules>,
    pub(crate) enrichment_enabled: bool,
}

impl<QS, IL> Service<QS, IL>
where
    QS: QuotaStore,
    IL: IngredientLookup,
{
    pub fn new(
        knowledge_base: Arc<KnowledgeBase>,
        quota_store: QS,
        ingredient_lookup: IL,
        limits: QuotaLimits,
        rules: ClassificationRules,
        enrichment_enabled: bool,
    ) -> Self {
        Self {
            knowledge_base,
            quota_store: Arc::new(quota_store),
            ingredient_lookup: Arc::new(ingredient_lookup),
            store_health: Arc::new(StoreHealth::default()),
            limits,
            rules: Arc::new(rules),
            enrichment_enabled,
        }
    }

    pub fn is_quota_degraded(&self) -> bool {
        self.store_health.is_degraded()
    }
}

impl<QS, IL> Clone for Service<QS, IL>
where
    QS: QuotaStore,
    IL: IngredientLookup,
{
    fn clone(&self) -> Self {
        Self {
            knowledge_base: Arc::clone(&self.knowledge_base),
            quota_store: Arc::clone(&self.quota_store),
            ingredient_lookup: Arc::clone(&self.ingredient_lookup),
            store_health: Arc::clone(&self.store_health),
            limits: self.limits,
            rules: Arc::clone(&self.rules),
            enrichment_enabled: self.enrichment_enabled,
        }
    }
}
