use tracing::debug;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    enrichment::ports::IngredientLookup,
    ingredient::{
        entities::{IngredientEntry, IngredientKey},
        knowledge_base::KnowledgeBase,
        ports::{IngredientService, KnowledgeBaseSource},
    },
    quota::ports::QuotaStore,
};

/// Builds the knowledge base from `source`. Failure here is a startup error.
pub fn load_knowledge_base<S>(source: &S) -> Result<KnowledgeBase, CoreError>
where
    S: KnowledgeBaseSource,
{
    let entries = source.load()?;
    if entries.is_empty() {
        return Err(CoreError::KnowledgeBaseLoad(
            "dataset contains no ingredients".to_string(),
        ));
    }

    Ok(KnowledgeBase::new(entries))
}

impl<QS, IL> IngredientService for Service<QS, IL>
where
    QS: QuotaStore,
    IL: IngredientLookup,
{
    fn get_ingredient(&self, name: &str) -> Result<IngredientEntry, CoreError> {
        let key = IngredientKey::normalize(name)
            .ok_or_else(|| CoreError::Invalid("ingredient name is empty".to_string()))?;

        debug!(key = %key, "looking up ingredient");

        let record = self.knowledge_base.get(&key).ok_or(CoreError::NotFound)?;

        Ok(IngredientEntry { key, record })
    }

    fn knowledge_base_size(&self) -> usize {
        self.knowledge_base.len()
    }
}
