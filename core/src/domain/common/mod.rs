use std::{path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp};

pub mod entities;
pub mod services;

/// Upper bound for any blocking call to an external collaborator.
pub const MAX_EXTERNAL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct InciscopeConfig {
    pub knowledge_base: KnowledgeBaseConfig,
    pub quota: QuotaConfig,
    pub enrichment: EnrichmentConfig,
}

#[derive(Clone, Debug)]
pub struct KnowledgeBaseConfig {
    pub path: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuotaBackendKind {
    Redis,
    Memory,
}

#[derive(Clone, Debug)]
pub struct QuotaConfig {
    pub backend: QuotaBackendKind,
    pub redis_url: String,
    pub daily_request_limit: u64,
    pub daily_enrichment_limit: u64,
    pub store_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    pub base_url: String,
    pub timeout: Duration,
}

impl EnrichmentConfig {
    /// Configured timeout, never above [`MAX_EXTERNAL_TIMEOUT`].
    pub fn effective_timeout(&self) -> Duration {
        self.timeout.min(MAX_EXTERNAL_TIMEOUT)
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}
