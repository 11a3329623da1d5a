use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient::{entities::IngredientEntry, knowledge_base::IngredientMap},
};

/// Static dataset the knowledge base is built from at startup.
#[cfg_attr(test, mockall::automock)]
pub trait KnowledgeBaseSource: Send + Sync {
    fn load(&self) -> Result<IngredientMap, CoreError>;
}

/// Read access to the knowledge base for callers outside the engine.
pub trait IngredientService: Send + Sync {
    /// Looks up an ingredient by raw label spelling or canonical key.
    fn get_ingredient(&self, name: &str) -> Result<IngredientEntry, CoreError>;

    fn knowledge_base_size(&self) -> usize;
}
