use thiserror::Error;

/// Upsell text returned to the front-end when the daily request quota is spent.
pub const QUOTA_EXCEEDED_MESSAGE: &str = "Вы использовали все бесплатные запросы на сегодня. \
     Оформите подписку, чтобы получить безлимитный доступ и персональные рекомендации.";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Raw ingredient text did not yield a single ingredient key.
    #[error("could not parse any ingredient from the provided text")]
    Parse,

    #[error("daily request quota exceeded")]
    QuotaExceeded { message: String },

    /// Internal to the enrichment gateway, never surfaced to callers.
    #[error("enrichment failed: {0}")]
    EnrichmentFailure(String),

    #[error("quota backing store unavailable: {0}")]
    BackingStoreUnavailable(String),

    #[error("knowledge base could not be loaded: {0}")]
    KnowledgeBaseLoad(String),

    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("not found")]
    NotFound,

    #[error("external service error: {0}")]
    ExternalServiceError(String),
}

impl CoreError {
    pub fn quota_exceeded() -> Self {
        CoreError::QuotaExceeded {
            message: QUOTA_EXCEEDED_MESSAGE.to_string(),
        }
    }
}
