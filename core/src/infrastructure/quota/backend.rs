use std::time::Duration;

use crate::{
    domain::{
        common::{QuotaBackendKind, QuotaConfig, entities::app_errors::CoreError},
        quota::ports::QuotaStore,
    },
    infrastructure::quota::{memory_store::MemoryQuotaStore, redis_store::RedisQuotaStore},
};

/// Quota store selected at startup from configuration.
pub enum QuotaBackend {
    Redis(RedisQuotaStore),
    Memory(MemoryQuotaStore),
}

impl QuotaBackend {
    pub fn from_config(config: &QuotaConfig) -> Result<Self, CoreError> {
        match config.backend {
            QuotaBackendKind::Redis => Ok(Self::Redis(RedisQuotaStore::new(
                &config.redis_url,
                config.store_timeout,
            )?)),
            QuotaBackendKind::Memory => Ok(Self::Memory(MemoryQuotaStore::new())),
        }
    }
}

impl QuotaStore for QuotaBackend {
    async fn get_count(&self, key: &str) -> Result<u64, CoreError> {
        match self {
            Self::Redis(store) => store.get_count(key).await,
            Self::Memory(store) => store.get_count(key).await,
        }
    }

    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, CoreError> {
        match self {
            Self::Redis(store) => store.increment(key, ttl).await,
            Self::Memory(store) => store.increment(key, ttl).await,
        }
    }

    async fn get_flag(&self, key: &str) -> Result<bool, CoreError> {
        match self {
            Self::Redis(store) => store.get_flag(key).await,
            Self::Memory(store) => store.get_flag(key).await,
        }
    }

    async fn set_flag(&self, key: &str) -> Result<(), CoreError> {
        match self {
            Self::Redis(store) => store.set_flag(key).await,
            Self::Memory(store) => store.set_flag(key).await,
        }
    }

    async fn clear_flag(&self, key: &str) -> Result<(), CoreError> {
        match self {
            Self::Redis(store) => store.clear_flag(key).await,
            Self::Memory(store) => store.clear_flag(key).await,
        }
    }
}
